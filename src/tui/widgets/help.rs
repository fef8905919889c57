//! Help popup widget.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::tui::style::Styles;

const BINDINGS: &[(&str, &str)] = &[
    ("click CPU", "show per-core panels"),
    ("c / Enter", "show per-core panels"),
    ("click outside", "close per-core panels"),
    ("Esc", "close per-core panels or help"),
    ("hover bar", "show bar details"),
    ("?", "toggle help"),
    ("q / Ctrl-C", "quit"),
];

/// Renders the help popup centered on screen.
pub fn render_help(frame: &mut Frame, area: Rect) {
    let popup_width = (area.width * 50 / 100).clamp(40, 60).min(area.width);
    let popup_height = (BINDINGS.len() as u16 + 4).min(area.height);

    let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Help ")
        .border_style(Styles::popup_border());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut content: Vec<Line> = BINDINGS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{:>14}", key), Styles::key()),
                Span::styled(format!("  {}", action), Styles::default()),
            ])
        })
        .collect();
    content.push(Line::from(""));
    content.push(Line::styled("Esc or ? to close", Styles::dim()).alignment(Alignment::Center));

    frame.render_widget(Paragraph::new(content), inner);
}

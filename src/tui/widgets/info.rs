//! System information panel.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::tui::style::Styles;
use crate::view::InfoModel;

/// Renders the info panel: one line per info entry line, title in the footer.
pub fn render_info(frame: &mut Frame, area: Rect, info: &InfoModel) {
    let block = Block::bordered()
        .border_style(Styles::border())
        .title_bottom(Line::styled(format!("ⓘ {}", info.title), Styles::label()).centered());

    let lines: Vec<Line> = info.lines.iter().map(|l| Line::from(l.as_str())).collect();
    let paragraph = Paragraph::new(lines)
        .style(Styles::default())
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, area);
}

//! Hover tooltip.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::tui::style::Styles;

/// Draws `lines` in a bordered box next to `anchor`, kept inside the frame.
pub fn render_tooltip(frame: &mut Frame, anchor: (u16, u16), lines: &[String]) {
    let bounds = frame.area();
    let area = tooltip_area(bounds, anchor, lines);
    if area.is_empty() {
        return;
    }

    frame.render_widget(Clear, area);
    let content: Vec<Line> = lines.iter().map(|l| Line::from(l.as_str())).collect();
    let paragraph = Paragraph::new(content)
        .style(Styles::default())
        .block(Block::bordered().border_style(Styles::popup_border()));
    frame.render_widget(paragraph, area);
}

fn tooltip_area(bounds: Rect, (column, row): (u16, u16), lines: &[String]) -> Rect {
    let text_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
    let width = (text_width + 2).min(bounds.width);
    let height = (lines.len() as u16 + 2).min(bounds.height);

    let x = column.saturating_add(1).min(bounds.right().saturating_sub(width));
    let y = row.saturating_add(1).min(bounds.bottom().saturating_sub(height));
    Rect::new(x.max(bounds.x), y.max(bounds.y), width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooltip_follows_anchor() {
        let lines = vec!["ID: 1".to_string()];
        let area = tooltip_area(Rect::new(0, 0, 80, 24), (10, 5), &lines);
        assert_eq!(area, Rect::new(11, 6, 7, 3));
    }

    #[test]
    fn test_tooltip_clamped_to_frame() {
        let lines = vec!["Title: Cores".to_string(), "Value: 5%".to_string()];
        let area = tooltip_area(Rect::new(0, 0, 20, 10), (19, 9), &lines);
        assert_eq!(area, Rect::new(6, 6, 14, 4));
    }
}

//! Per-core drill-down overlay.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use super::panel::render_panel;
use crate::tui::layout::{centered, fit_columns, grid};
use crate::tui::style::Styles;
use crate::view::PanelModel;

/// Preferred number of core panels per row.
pub const DRILL_DOWN_COLUMNS: u16 = 3;
/// Overlay size as a percentage of the screen.
const OVERLAY_PERCENT: u16 = 75;
/// Smallest core panel height before the grid gets wider.
const MIN_PANEL_HEIGHT: u16 = 5;

/// Renders the overlay and returns its area, which swallows clicks.
pub fn render_drill_down(
    frame: &mut Frame,
    area: Rect,
    cores: &[PanelModel],
    hover: Option<(u16, u16)>,
) -> Rect {
    let overlay = centered(area, OVERLAY_PERCENT, OVERLAY_PERCENT);
    frame.render_widget(Clear, overlay);

    let block = Block::bordered()
        .title(" Cores ")
        .title_bottom(Line::styled(" Esc or click outside to close ", Styles::dim()).centered())
        .border_style(Styles::popup_border());
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    if cores.is_empty() {
        let empty = Paragraph::new("No per-core data")
            .style(Styles::dim())
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return overlay;
    }

    let columns = fit_columns(inner, cores.len(), DRILL_DOWN_COLUMNS, MIN_PANEL_HEIGHT);
    for (panel, cell) in cores.iter().zip(grid(inner, cores.len(), columns)) {
        render_panel(frame, cell, panel, hover);
    }
    overlay
}

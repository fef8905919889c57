//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::view::{self, OverviewModel};

use super::layout::grid;
use super::state::{AppState, HitMap, PanelHit, PopupState};
use super::widgets::{render_drill_down, render_header, render_help, render_info, render_panel};

/// Main render function.
///
/// Records clickable regions in `state.hits` for the input handler.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(3),    // Overview grid
    ])
    .split(area);

    render_header(frame, chunks[0], state);

    state.hits.clear();
    let drill_down = view::drill_down(&state.dashboard);
    // Hover only reaches the top-most layer.
    let (overview_hover, overlay_hover) = match drill_down {
        Some(_) => (None, state.hover),
        None => (state.hover, None),
    };

    let overview = view::overview(&state.dashboard, state.options);
    render_overview(
        frame,
        chunks[1],
        &overview,
        state.columns,
        overview_hover,
        &mut state.hits,
    );

    if let Some(cores) = drill_down {
        let overlay = render_drill_down(frame, area, &cores, overlay_hover);
        state.hits.modal = Some(overlay);
    }

    if state.popup == PopupState::Help {
        render_help(frame, area);
    }
}

/// Info panel first, then metric panels, row-major.
fn render_overview(
    frame: &mut Frame,
    area: Rect,
    overview: &OverviewModel,
    columns: u16,
    hover: Option<(u16, u16)>,
    hits: &mut HitMap,
) {
    let cells = grid(area, overview.panels.len() + 1, columns);
    let Some((info_cell, panel_cells)) = cells.split_first() else {
        return;
    };

    render_info(frame, *info_cell, &overview.info);
    for (panel, cell) in overview.panels.iter().zip(panel_cells) {
        render_panel(frame, *cell, panel, hover);
        if let Some(action) = panel.action {
            hits.panels.push(PanelHit {
                area: *cell,
                action,
            });
        }
    }
}

//! Application state for the TUI.

use std::time::Duration;

use ratatui::layout::Rect;

use crate::dashboard::DashboardState;
use crate::stream::ConnectionState;
use crate::view::{OverviewOptions, PanelAction};

use super::layout::contains;

/// Active popup on top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupState {
    #[default]
    None,
    Help,
}

/// Connection details shown in the header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConnectionStatus {
    pub state: ConnectionState,
    pub endpoint: String,
    /// Frames accepted on the current connection.
    pub accepted: u64,
    /// Frames rejected by the decoder.
    pub rejected: u64,
    pub last_error: Option<String>,
    /// Set while waiting to reconnect.
    pub retry_in: Option<Duration>,
}

/// Clickable panel recorded during the last render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelHit {
    pub area: Rect,
    pub action: PanelAction,
}

/// Screen regions recorded by the last render, used for mouse hit-testing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    pub panels: Vec<PanelHit>,
    /// Content area of the drill-down overlay while it is shown.
    pub modal: Option<Rect>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.panels.clear();
        self.modal = None;
    }

    /// Action of the panel under (`column`, `row`), if any.
    pub fn action_at(&self, column: u16, row: u16) -> Option<PanelAction> {
        self.panels
            .iter()
            .find(|hit| contains(hit.area, column, row))
            .map(|hit| hit.action)
    }

    /// True when (`column`, `row`) lies inside the drill-down content.
    pub fn in_modal(&self, column: u16, row: u16) -> bool {
        self.modal.is_some_and(|area| contains(area, column, row))
    }
}

/// Main application state.
#[derive(Debug)]
pub struct AppState {
    pub dashboard: DashboardState,
    pub connection: ConnectionStatus,
    pub popup: PopupState,
    pub options: OverviewOptions,
    /// Overview grid width in panels.
    pub columns: u16,
    /// Last known mouse position.
    pub hover: Option<(u16, u16)>,
    pub hits: HitMap,
}

impl AppState {
    pub fn new(endpoint: impl Into<String>, columns: u16, options: OverviewOptions) -> Self {
        Self {
            dashboard: DashboardState::new(),
            connection: ConnectionStatus {
                endpoint: endpoint.into(),
                ..ConnectionStatus::default()
            },
            popup: PopupState::None,
            options,
            columns: columns.max(1),
            hover: None,
            hits: HitMap::default(),
        }
    }
}

//! Terminal User Interface for sysdash.
//!
//! Renders the overview grid, the per-core drill-down and the connection
//! header, and routes keyboard and mouse input to the dashboard state.

mod app;
mod event;
mod input;
mod layout;
mod render;
mod state;
mod style;
mod widgets;

pub use app::App;
pub use event::Event;
pub use input::{KeyAction, handle_key, handle_mouse};
pub use render::render;
pub use state::{AppState, ConnectionStatus, HitMap, PanelHit, PopupState};

//! sysdash - live system telemetry dashboard.
//!
//! The library is split into:
//! - `model`, `classify` - metric series and severity tiers
//! - `stream` - frame sources, decoding and the connection state machine
//! - `dashboard`, `view` - composed state and UI-agnostic panel models
//! - `tui` - interactive terminal front end

pub mod classify;
pub mod config;
pub mod dashboard;
pub mod model;
pub mod stream;
pub mod tui;
pub mod view;

//! Stream ingestion: connection lifecycle and frame decoding.
//!
//! A [`FrameSource`] owns the transport and pushes [`StreamEvent`]s into a
//! channel. The [`StreamController`] consumes those events on the UI thread,
//! tracks the connection state and turns accepted frames into snapshots.

pub mod backoff;
mod decode;
pub mod demo;
pub mod ws;

pub use backoff::Backoff;
pub use decode::{DecodeError, decode_snapshot};
pub use demo::DemoSource;
pub use ws::WsSource;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::model::Snapshot;

/// Connection lifecycle. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Connecting,
    Open,
    Closed,
}

impl ConnectionState {
    pub fn name(&self) -> &'static str {
        match self {
            ConnectionState::Connecting => "CONNECTING",
            ConnectionState::Open => "LIVE",
            ConnectionState::Closed => "CLOSED",
        }
    }
}

/// Event reported by a frame source, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Handshake finished.
    Opened,
    /// One text frame.
    Frame(String),
    /// Transport failure.
    Error(String),
    /// Remote or local close.
    Closed,
}

/// Errors observed by the controller. None of them are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Transport that delivers [`StreamEvent`]s.
///
/// Implementations must release their connection in [`FrameSource::close`]
/// and in `Drop`; calling `close` more than once is a no-op.
pub trait FrameSource {
    /// Human-readable endpoint, shown in the header.
    fn endpoint(&self) -> &str;

    /// Force-closes the connection.
    fn close(&mut self);
}

/// Connection state machine for one session.
///
/// A fresh controller is needed to reconnect.
#[derive(Debug, Default)]
pub struct StreamController {
    state: ConnectionState,
    error_observed: bool,
    accepted: u64,
    rejected: u64,
    last_error: Option<StreamError>,
}

impl StreamController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// True once any transport error was seen.
    pub fn error_observed(&self) -> bool {
        self.error_observed
    }

    /// Number of frames turned into snapshots.
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Number of frames dropped because they failed to decode.
    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    pub fn last_error(&self) -> Option<&StreamError> {
        self.last_error.as_ref()
    }

    /// Applies one event. Returns a snapshot when a frame was accepted.
    pub fn handle(&mut self, event: StreamEvent) -> Option<Snapshot> {
        if self.state == ConnectionState::Closed {
            debug!(?event, "event after close ignored");
            return None;
        }

        match event {
            StreamEvent::Opened => {
                if self.state == ConnectionState::Connecting {
                    info!("stream connected");
                    self.state = ConnectionState::Open;
                }
                None
            }
            StreamEvent::Frame(text) => {
                if self.state != ConnectionState::Open {
                    debug!(len = text.len(), "frame before open ignored");
                    return None;
                }
                match decode_snapshot(&text) {
                    Ok(snapshot) => {
                        self.accepted += 1;
                        debug!(
                            stats = snapshot.stats.len(),
                            cores = snapshot.cores.len(),
                            "snapshot accepted"
                        );
                        Some(snapshot)
                    }
                    Err(e) => {
                        self.rejected += 1;
                        warn!(error = %e, "frame rejected, keeping previous state");
                        self.last_error = Some(e.into());
                        None
                    }
                }
            }
            StreamEvent::Error(message) => {
                warn!(error = %message, state = self.state.name(), "stream transport error");
                self.error_observed = true;
                self.last_error = Some(StreamError::Transport(message));
                self.state = ConnectionState::Closed;
                None
            }
            StreamEvent::Closed => {
                info!("stream closed");
                self.state = ConnectionState::Closed;
                None
            }
        }
    }

    /// Local teardown: closes the source and moves to `Closed`.
    pub fn teardown(&mut self, source: &mut dyn FrameSource) {
        source.close();
        if self.state != ConnectionState::Closed {
            debug!(endpoint = source.endpoint(), "stream torn down");
            self.state = ConnectionState::Closed;
        }
    }
}

//! Event handling for TUI.
//!
//! Uses a separate thread to poll for terminal events and timer ticks. Frame
//! sources feed the same channel through [`EventHandler::sender`], so every
//! state change happens on the UI thread in arrival order.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};

use crate::stream::StreamEvent;

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Timer tick.
    Tick,
    /// Keyboard input.
    Key(KeyEvent),
    /// Mouse click or motion.
    Mouse(MouseEvent),
    /// Terminal resize (width, height).
    Resize(u16, u16),
    /// Event from the frame source started as connection `generation`.
    Stream {
        generation: u64,
        event: StreamEvent,
    },
}

/// Event handler that polls for terminal events in a separate thread.
pub struct EventHandler {
    rx: Receiver<Event>,
    tx: Sender<Event>,
}

impl EventHandler {
    /// Creates a new event handler with the specified tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let event = match evt {
                            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                                Event::Key(key)
                            }
                            CrosstermEvent::Mouse(mouse) => Event::Mouse(mouse),
                            CrosstermEvent::Resize(w, h) => Event::Resize(w, h),
                            _ => continue,
                        };
                        if event_tx.send(event).is_err() {
                            break;
                        }
                    }
                } else if event_tx.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, tx }
    }

    /// Sender for frame sources.
    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    /// Receives the next event, blocking until one is available.
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}

/// Sink that tags stream events with `generation` and forwards them.
pub fn stream_sink(
    tx: Sender<Event>,
    generation: u64,
) -> impl FnMut(StreamEvent) -> bool + Send + 'static {
    move |event| tx.send(Event::Stream { generation, event }).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_sink_tags_generation() {
        let (tx, rx) = mpsc::channel();
        let mut sink = stream_sink(tx, 7);
        assert!(sink(StreamEvent::Opened));

        match rx.recv().unwrap() {
            Event::Stream { generation, event } => {
                assert_eq!(generation, 7);
                assert_eq!(event, StreamEvent::Opened);
            }
            other => panic!("unexpected event {:?}", other),
        }

        drop(rx);
        assert!(!sink(StreamEvent::Closed));
    }
}

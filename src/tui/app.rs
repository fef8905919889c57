//! Main TUI application.

use std::io;
use std::panic;
use std::sync::mpsc::Sender;
use std::time::Instant;

use crossterm::cursor::Show;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info};

use crate::config::{Config, ReconnectPolicy, SourceKind};
use crate::stream::demo::DemoGenerator;
use crate::stream::{
    Backoff, ConnectionState, DemoSource, FrameSource, StreamController, StreamEvent, WsSource,
};

use super::event::{Event, EventHandler, stream_sink};
use super::input::{KeyAction, handle_key, handle_mouse};
use super::render::render;
use super::state::AppState;

/// Raw mode, alternate screen and mouse capture, restored on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;

        // Release builds abort on panic; restore before the default hook runs.
        let default_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal();
            default_hook(info);
        }));
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        debug!(error = %e, "disable raw mode");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show) {
        debug!(error = %e, "leave alternate screen");
    }
}

/// Main TUI application.
pub struct App {
    config: Config,
    state: AppState,
    controller: StreamController,
    source: Option<Box<dyn FrameSource>>,
    /// Bumped for every new source; events tagged with an older value are dropped.
    generation: u64,
    backoff: Backoff,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let state = AppState::new(config.endpoint(), config.columns, config.overview_options());
        Self {
            config,
            state,
            controller: StreamController::new(),
            source: None,
            generation: 0,
            backoff: Backoff::default(),
            should_quit: false,
        }
    }

    /// Runs the TUI application until the user quits.
    ///
    /// The terminal is restored and the source closed on every exit path.
    pub fn run(mut self) -> io::Result<()> {
        let _guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        let events = EventHandler::new(self.config.tick_rate);
        let tx = events.sender();
        self.connect(tx.clone());

        let result = loop {
            if let Err(e) = terminal.draw(|frame| render(frame, &mut self.state)) {
                break Err(e);
            }
            match events.next() {
                Ok(event) => self.handle_event(event, &tx),
                Err(_) => self.should_quit = true,
            }
            if self.should_quit {
                break Ok(());
            }
        };

        self.shutdown();
        result
    }

    fn handle_event(&mut self, event: Event, tx: &Sender<Event>) {
        match event {
            Event::Tick => self.on_tick(Instant::now(), tx),
            Event::Key(key) => {
                if handle_key(&mut self.state, key) == KeyAction::Quit {
                    self.should_quit = true;
                }
            }
            Event::Mouse(mouse) => handle_mouse(&mut self.state, mouse),
            Event::Resize(width, height) => debug!(width, height, "terminal resized"),
            Event::Stream { generation, event } => self.on_stream_event(generation, event),
        }
    }

    fn on_stream_event(&mut self, generation: u64, event: StreamEvent) {
        if generation != self.generation {
            debug!(generation, current = self.generation, "event from replaced source ignored");
            return;
        }

        let before = self.controller.state();
        if let Some(snapshot) = self.controller.handle(event) {
            self.state.dashboard.apply_snapshot(snapshot);
        }
        let after = self.controller.state();

        let now = Instant::now();
        if before != after {
            match after {
                ConnectionState::Open => self.backoff.mark_success(),
                ConnectionState::Closed if self.config.reconnect == ReconnectPolicy::Backoff => {
                    let delay = self.backoff.mark_failure(now);
                    info!(delay_ms = delay.as_millis() as u64, "reconnect scheduled");
                }
                _ => {}
            }
        }
        self.sync_status(now);
    }

    fn on_tick(&mut self, now: Instant, tx: &Sender<Event>) {
        if self.backoff.should_retry(now) {
            self.backoff.consume();
            info!(endpoint = %self.config.endpoint(), "reconnecting");
            self.connect(tx.clone());
        }
        self.sync_status(now);
    }

    /// Replaces the current source with a fresh connection.
    fn connect(&mut self, tx: Sender<Event>) {
        if let Some(mut old) = self.source.take() {
            self.controller.teardown(old.as_mut());
        }
        self.generation += 1;
        self.controller = StreamController::new();

        let sink = stream_sink(tx, self.generation);
        let source: Box<dyn FrameSource> = match &self.config.source {
            SourceKind::WebSocket { url } => Box::new(WsSource::connect(url.clone(), sink)),
            SourceKind::Demo { interval } => Box::new(DemoSource::start(
                DemoGenerator::for_host(),
                *interval,
                sink,
            )),
        };
        self.source = Some(source);
        self.sync_status(Instant::now());
    }

    fn shutdown(&mut self) {
        if let Some(mut source) = self.source.take() {
            self.controller.teardown(source.as_mut());
            info!(endpoint = %self.config.endpoint(), "source closed");
        }
        self.sync_status(Instant::now());
    }

    fn sync_status(&mut self, now: Instant) {
        let status = &mut self.state.connection;
        status.state = self.controller.state();
        status.accepted = self.controller.accepted();
        status.rejected = self.controller.rejected();
        status.last_error = self.controller.last_error().map(ToString::to_string);
        status.retry_in = self.backoff.remaining(now);
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::sync::mpsc::{self, Receiver};
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyEvent};

    const FRAME: &str = r#"{"stats":[{"id":"cpu","title":"CPU","data":[10,20,39]}],"cores":[[{"value":12}]],"info":["host1"]}"#;

    /// Endpoint nobody listens on.
    fn dead_url() -> String {
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        format!("ws://127.0.0.1:{}/ws", port)
    }

    fn app(policy: ReconnectPolicy) -> (App, Sender<Event>, Receiver<Event>) {
        let config = Config::websocket(dead_url()).unwrap().with_reconnect(policy);
        let (tx, rx) = mpsc::channel();
        (App::new(config), tx, rx)
    }

    #[test]
    fn test_frames_update_dashboard() {
        let (mut app, _tx, _rx) = app(ReconnectPolicy::Freeze);
        app.on_stream_event(0, StreamEvent::Opened);
        app.on_stream_event(0, StreamEvent::Frame(FRAME.into()));

        assert_eq!(app.state.connection.state, ConnectionState::Open);
        assert_eq!(app.state.dashboard.snapshots(), 1);
        assert!(app.state.dashboard.cpu_panel_visible());
    }

    #[test]
    fn test_bad_frame_keeps_state_and_reports() {
        let (mut app, _tx, _rx) = app(ReconnectPolicy::Freeze);
        app.on_stream_event(0, StreamEvent::Opened);
        app.on_stream_event(0, StreamEvent::Frame(FRAME.into()));
        app.on_stream_event(0, StreamEvent::Frame("{not json".into()));

        assert_eq!(app.state.dashboard.snapshots(), 1);
        assert_eq!(app.state.connection.accepted, 1);
        assert_eq!(app.state.connection.rejected, 1);
        assert!(app.state.connection.last_error.is_some());
        assert_eq!(app.state.connection.state, ConnectionState::Open);
    }

    #[test]
    fn test_stale_generation_ignored() {
        let (mut app, _tx, _rx) = app(ReconnectPolicy::Freeze);
        app.generation = 2;
        app.on_stream_event(1, StreamEvent::Closed);
        assert_eq!(app.controller.state(), ConnectionState::Connecting);
    }

    #[test]
    fn test_freeze_keeps_last_state_after_close() {
        let (mut app, tx, _rx) = app(ReconnectPolicy::Freeze);
        app.on_stream_event(0, StreamEvent::Opened);
        app.on_stream_event(0, StreamEvent::Frame(FRAME.into()));
        app.on_stream_event(0, StreamEvent::Error("reset by peer".into()));

        assert_eq!(app.state.connection.state, ConnectionState::Closed);
        assert_eq!(app.state.connection.retry_in, None);

        app.on_tick(Instant::now() + Duration::from_secs(60), &tx);
        assert_eq!(app.generation, 0);
        assert_eq!(app.state.dashboard.snapshots(), 1);
        assert!(app.state.dashboard.cpu_panel_visible());
    }

    #[test]
    fn test_backoff_reconnects_after_delay() {
        let (mut app, tx, _rx) = app(ReconnectPolicy::Backoff);
        app.on_stream_event(0, StreamEvent::Opened);
        app.on_stream_event(0, StreamEvent::Error("reset by peer".into()));

        assert_eq!(app.state.connection.state, ConnectionState::Closed);
        assert!(app.state.connection.retry_in.is_some());
        assert!(
            app.state
                .connection
                .last_error
                .as_deref()
                .is_some_and(|e| e.contains("reset by peer"))
        );

        app.on_tick(Instant::now() + Duration::from_secs(2), &tx);
        assert_eq!(app.generation, 1);
        assert_eq!(app.state.connection.state, ConnectionState::Connecting);
        assert_eq!(app.state.connection.retry_in, None);
        assert!(app.source.is_some());
    }

    #[test]
    fn test_quit_key() {
        let (mut app, tx, _rx) = app(ReconnectPolicy::Freeze);
        app.handle_event(Event::Key(KeyEvent::from(KeyCode::Char('q'))), &tx);
        assert!(app.should_quit);
    }

    #[test]
    fn test_demo_source_end_to_end() {
        let mut app = App::new(Config::demo(5).unwrap());
        let (tx, rx) = mpsc::channel();
        app.connect(tx.clone());

        while app.state.dashboard.snapshots() == 0 {
            let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
            app.handle_event(event, &tx);
        }
        assert_eq!(app.state.connection.state, ConnectionState::Open);
        assert!(app.state.dashboard.cpu_panel_visible());
        assert!(!app.state.dashboard.cores().is_empty());

        app.shutdown();
        assert!(app.source.is_none());
        assert_eq!(app.state.connection.state, ConnectionState::Closed);
    }
}

//! End-to-end dashboard scenarios: frames go through the stream controller,
//! the dashboard state and the TUI renderer into a test terminal.

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::style::Color;

use sysdash::classify::{GREEN, RED, SeverityTier};
use sysdash::stream::{ConnectionState, StreamController, StreamEvent};
use sysdash::tui::{AppState, handle_mouse, render};
use sysdash::view::{self, OverviewOptions};

const WIDTH: u16 = 120;
const HEIGHT: u16 = 40;

struct Harness {
    controller: StreamController,
    state: AppState,
    terminal: Terminal<TestBackend>,
}

impl Harness {
    fn new() -> Self {
        let mut controller = StreamController::new();
        controller.handle(StreamEvent::Opened);
        Self {
            controller,
            state: AppState::new("ws://test/ws", 3, OverviewOptions::default()),
            terminal: Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap(),
        }
    }

    fn receive(&mut self, frame: &str) {
        if let Some(snapshot) = self.controller.handle(StreamEvent::Frame(frame.to_string())) {
            self.state.dashboard.apply_snapshot(snapshot);
        }
    }

    fn draw(&mut self) -> String {
        let state = &mut self.state;
        self.terminal.draw(|frame| render(frame, state)).unwrap();
        text(self.terminal.backend().buffer())
    }

    fn click(&mut self, column: u16, row: u16) {
        handle_mouse(
            &mut self.state,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    fn has_color(&self, color: Color) -> bool {
        self.terminal
            .backend()
            .buffer()
            .content
            .iter()
            .any(|cell| cell.fg == color)
    }
}

fn text(buffer: &Buffer) -> String {
    let width = buffer.area.width as usize;
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn frame_with_cpu(data: &str, cores: usize) -> String {
    let cores: Vec<String> = (0..cores)
        .map(|i| format!(r#"[{{"value":{}}}]"#, 10 * (i + 1)))
        .collect();
    format!(
        r#"{{"stats":[{{"id":"cpu","title":"CPU","data":{}}}],"cores":[{}],"info":["host1"]}}"#,
        data,
        cores.join(",")
    )
}

fn rgb(c: sysdash::classify::Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

#[test]
fn single_cpu_metric_renders_green_panel() {
    let mut h = Harness::new();
    h.receive(&frame_with_cpu("[10,20,39]", 0));

    let model = view::overview(&h.state.dashboard, OverviewOptions::default());
    assert_eq!(model.panels.len(), 1);
    assert_eq!(model.panels[0].label(), "CPU: 39%");
    assert_eq!(model.panels[0].classification().tier, SeverityTier::Normal);

    let screen = h.draw();
    assert!(screen.contains("CPU: 39%"));
    assert!(screen.contains("host1"));
    assert!(!screen.contains("Core 1"));
    assert!(h.has_color(rgb(GREEN)));
    assert!(!h.has_color(rgb(RED)));
}

#[test]
fn critical_cpu_metric_renders_red_panel() {
    let mut h = Harness::new();
    h.receive(&frame_with_cpu("[10,20,70]", 0));

    let screen = h.draw();
    assert!(screen.contains("CPU: 70%"));
    assert!(h.has_color(rgb(RED)));
    assert!(!h.has_color(rgb(GREEN)));
}

#[test]
fn clicking_cpu_opens_and_closes_core_overlay() {
    let mut h = Harness::new();
    h.receive(&frame_with_cpu("[10,20,39]", 4));
    h.draw();

    // Info panel takes the first cell; CPU is the second.
    let cpu = h.state.hits.panels[0].area;
    h.click(cpu.x + cpu.width / 2, cpu.y + cpu.height / 2);
    assert!(h.state.dashboard.is_expanded());

    let screen = h.draw();
    for label in ["Core 1: 10%", "Core 2: 20%", "Core 3: 30%", "Core 4: 40%"] {
        assert!(screen.contains(label), "missing {}", label);
    }
    assert!(!screen.contains("Core 5"));

    // Inside a core panel: stays open.
    let overlay = h.state.hits.modal.unwrap();
    h.click(overlay.x + 3, overlay.y + 3);
    h.draw();
    assert!(h.state.dashboard.is_expanded());

    // Outside the overlay: closes.
    h.click(0, HEIGHT - 1);
    let screen = h.draw();
    assert!(!h.state.dashboard.is_expanded());
    assert!(!screen.contains("Core 1"));
}

#[test]
fn malformed_frame_keeps_previous_panels() {
    let mut h = Harness::new();
    h.receive(&frame_with_cpu("[10,20,39]", 0));
    let before = h.draw();

    h.receive("{\"stats\": [");
    h.receive("\u{0}garbage");
    h.receive(r#"{"stats":"cpu","cores":[],"info":[]}"#);

    assert_eq!(h.controller.rejected(), 3);
    assert_eq!(h.controller.state(), ConnectionState::Open);
    assert_eq!(h.state.dashboard.snapshots(), 1);
    let after = h.draw();
    assert!(after.contains("CPU: 39%"));
    assert_eq!(before.contains("host1"), after.contains("host1"));
}

#[test]
fn before_first_snapshot_only_info_panel() {
    let mut h = Harness::new();
    let model = view::overview(&h.state.dashboard, OverviewOptions::default());
    assert!(model.panels.is_empty());

    let screen = h.draw();
    assert!(screen.contains("N/A"));
    assert!(screen.contains("System Information"));
    for title in ["CPU", "Memory", "Disk I/O", "Network I/O"] {
        assert!(!screen.contains(&format!("{}:", title)));
    }
    assert!(h.state.hits.panels.is_empty());
}

#[test]
fn frames_after_close_are_ignored() {
    let mut h = Harness::new();
    h.receive(&frame_with_cpu("[10]", 0));
    h.controller.handle(StreamEvent::Error("connection reset".into()));
    h.receive(&frame_with_cpu("[90]", 0));

    assert_eq!(h.controller.state(), ConnectionState::Closed);
    assert!(h.controller.error_observed());
    assert!(h.draw().contains("CPU: 10%"));
}

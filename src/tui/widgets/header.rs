//! Header widget showing time, connection state and counters.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::AppState;
use crate::tui::style::Styles;

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Length(21), // Time
        Constraint::Length(14), // State
        Constraint::Min(10),    // Endpoint / error
        Constraint::Length(32), // Counters
    ])
    .split(area);

    let time = Local::now().format(" %Y-%m-%d %H:%M:%S").to_string();
    frame.render_widget(Paragraph::new(time).style(Styles::header()), chunks[0]);

    let connection = &state.connection;
    let badge = format!(" {} ", connection.state.name());
    frame.render_widget(
        Paragraph::new(badge).style(Styles::connection(connection.state)),
        chunks[1],
    );

    let detail = match (&connection.last_error, connection.retry_in) {
        (Some(error), Some(delay)) => Line::from(vec![
            Span::styled(format!(" {} ", error), Styles::header_error()),
            Span::styled(format!("retry in {}s", delay.as_secs()), Styles::header()),
        ]),
        (Some(error), None) => Line::styled(format!(" {}", error), Styles::header_error()),
        (None, _) => Line::styled(format!(" {}", connection.endpoint), Styles::header()),
    };
    frame.render_widget(Paragraph::new(detail).style(Styles::header()), chunks[2]);

    let mut counters = format!(
        "snap {} ok {}",
        state.dashboard.snapshots(),
        connection.accepted
    );
    if connection.rejected > 0 {
        counters.push_str(&format!(" rej {}", connection.rejected));
    }
    counters.push(' ');
    frame.render_widget(
        Paragraph::new(Line::from(counters).right_aligned()).style(Styles::header()),
        chunks[3],
    );
}

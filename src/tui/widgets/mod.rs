//! TUI widgets.

mod drill_down;
mod header;
mod help;
mod info;
mod panel;
mod tooltip;

pub use drill_down::render_drill_down;
pub use header::render_header;
pub use help::render_help;
pub use info::render_info;
pub use panel::render_panel;

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::{Frame, Terminal};

    /// Draws once into a `width` x `height` test terminal and returns the buffer.
    pub fn draw<F>(width: u16, height: u16, f: F) -> Buffer
    where
        F: FnOnce(&mut Frame, Rect),
    {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                f(frame, area)
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    /// Buffer content, one string per row.
    pub fn buffer_lines(buffer: &Buffer) -> Vec<String> {
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width.max(1))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    pub fn buffer_text(buffer: &Buffer) -> String {
        buffer_lines(buffer).join("\n")
    }
}

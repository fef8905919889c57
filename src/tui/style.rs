//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

use crate::classify::Rgb;
use crate::stream::ConnectionState;

/// Dashboard color palette.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Reset;
    pub const HEADER_BG: Color = Color::Blue;

    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;
    pub const HEADER_FG: Color = Color::White;

    pub const LIVE: Color = Color::Green;
    pub const CONNECTING: Color = Color::Yellow;
    pub const CLOSED: Color = Color::Red;

    pub const BORDER: Color = Color::DarkGray;
    pub const INTERACTIVE_BORDER: Color = Color::Cyan;
    pub const POPUP_BORDER: Color = Color::Cyan;
    pub const KEY: Color = Color::Yellow;
}

/// Maps a classification color to a terminal color.
pub fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Header bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Connection state badge in the header.
    pub fn connection(state: ConnectionState) -> Style {
        let fg = match state {
            ConnectionState::Connecting => Theme::CONNECTING,
            ConnectionState::Open => Theme::LIVE,
            ConnectionState::Closed => Theme::CLOSED,
        };
        Style::default()
            .fg(fg)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Error text in the header.
    pub fn header_error() -> Style {
        Style::default().fg(Color::LightRed).bg(Theme::HEADER_BG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    pub fn border() -> Style {
        Style::default().fg(Theme::BORDER)
    }

    /// Border of panels that react to clicks.
    pub fn interactive_border() -> Style {
        Style::default().fg(Theme::INTERACTIVE_BORDER)
    }

    pub fn popup_border() -> Style {
        Style::default().fg(Theme::POPUP_BORDER)
    }

    /// Panel footer label.
    pub fn label() -> Style {
        Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD)
    }

    /// Series line.
    pub fn stroke(color: Rgb) -> Style {
        Style::default().fg(rgb(color))
    }

    /// Area under the series line.
    pub fn fill(color: Rgb) -> Style {
        Style::default().fg(rgb(color)).add_modifier(Modifier::DIM)
    }

    /// Key name in help text.
    pub fn key() -> Style {
        Style::default().fg(Theme::KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{AMBER, GREEN};

    #[test]
    fn test_rgb_mapping() {
        assert_eq!(rgb(GREEN), Color::Rgb(0x00, 0xff, 0x88));
        assert_eq!(rgb(AMBER), Color::Rgb(0xff, 0xcc, 0x00));
    }

    #[test]
    fn test_fill_is_dimmed_stroke() {
        let fill = Styles::fill(GREEN);
        assert_eq!(fill.fg, Styles::stroke(GREEN).fg);
        assert!(fill.add_modifier.contains(Modifier::DIM));
    }
}

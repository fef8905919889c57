//! Severity tiers and panel colors.
//!
//! Framework-agnostic: colors are plain RGB triples, the TUI maps them to
//! ratatui colors in `tui::style`.

/// RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const GREEN: Rgb = Rgb(0x00, 0xff, 0x88);
pub const AMBER: Rgb = Rgb(0xff, 0xcc, 0x00);
pub const RED: Rgb = Rgb(0xff, 0x00, 0x00);

/// Lower bound (inclusive) of the warning tier.
pub const WARNING_THRESHOLD: i64 = 40;
/// Lower bound (inclusive) of the critical tier.
pub const CRITICAL_THRESHOLD: i64 = 70;

/// Severity of a current percentage value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeverityTier {
    Normal,
    Warning,
    Critical,
}

impl SeverityTier {
    pub fn name(&self) -> &'static str {
        match self {
            SeverityTier::Normal => "normal",
            SeverityTier::Warning => "warning",
            SeverityTier::Critical => "critical",
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            SeverityTier::Normal => GREEN,
            SeverityTier::Warning => AMBER,
            SeverityTier::Critical => RED,
        }
    }
}

/// Result of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub tier: SeverityTier,
    /// Area fill color, drawn dimmed.
    pub fill: Rgb,
    /// Line color, drawn at full intensity.
    pub stroke: Rgb,
}

/// Maps a percentage to its tier and colors. Total over all integers.
pub fn classify(percentage: i64) -> Classification {
    let tier = if percentage < WARNING_THRESHOLD {
        SeverityTier::Normal
    } else if percentage < CRITICAL_THRESHOLD {
        SeverityTier::Warning
    } else {
        SeverityTier::Critical
    };
    let color = tier.color();
    Classification {
        tier,
        fill: color,
        stroke: color,
    }
}

/// Positional palette for categorical panels.
pub const PALETTE: [Rgb; 7] = [
    Rgb(0x88, 0x84, 0xd8),
    Rgb(0x82, 0xca, 0x9d),
    Rgb(0xff, 0xc6, 0x58),
    Rgb(0xff, 0x7c, 0x7c),
    Rgb(0x8d, 0xd1, 0xe1),
    Rgb(0xd0, 0x84, 0xd0),
    Rgb(0xff, 0xb3, 0x47),
];

/// Palette color for the bar at `position`, cycling.
pub fn palette_color(position: usize) -> Rgb {
    PALETTE[position % PALETTE.len()]
}

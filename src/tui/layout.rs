//! Grid and overlay geometry.

use ratatui::layout::{Constraint, Layout, Rect};

/// Splits `area` into `count` cells laid out row-major, `columns` wide.
///
/// All rows share the height equally; the last row may be partially filled.
pub fn grid(area: Rect, count: usize, columns: u16) -> Vec<Rect> {
    if count == 0 || columns == 0 {
        return Vec::new();
    }
    let columns = columns as usize;
    let rows = count.div_ceil(columns);

    let row_areas = Layout::vertical(vec![Constraint::Ratio(1, rows as u32); rows]).split(area);
    let mut cells = Vec::with_capacity(rows * columns);
    for row in row_areas.iter() {
        let cols =
            Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns]).split(*row);
        cells.extend(cols.iter().copied());
    }
    cells.truncate(count);
    cells
}

/// Columns needed so that `count` cells get at least `min_height` rows each.
pub fn fit_columns(area: Rect, count: usize, preferred: u16, min_height: u16) -> u16 {
    let preferred = preferred.max(1);
    let max_rows = (area.height / min_height.max(1)).max(1) as usize;
    let needed = count.div_ceil(max_rows) as u16;
    preferred.max(needed)
}

/// Rect of `percent_x` x `percent_y` of `area`, centered.
pub fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = percent_of(area.width, percent_x);
    let height = percent_of(area.height, percent_y);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn percent_of(length: u16, percent: u16) -> u16 {
    // Never exceeds `length` once percent is capped at 100.
    (u32::from(length) * u32::from(percent.min(100)) / 100) as u16
}

pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

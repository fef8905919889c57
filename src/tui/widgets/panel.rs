//! Chart panel widget.
//!
//! Time-series panels draw a dimmed area under a line on a fixed 0-100
//! scale. Categorical panels draw one bar per record with palette colors and
//! a tooltip for the hovered bar. Both carry a `"{title}: {percentage}%"`
//! footer.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::symbols::Marker;
use ratatui::text::Line;
use ratatui::widgets::{Axis, Bar, BarChart, BarGroup, Block, Chart, Dataset, GraphType};

use super::tooltip::render_tooltip;
use crate::model::Sample;
use crate::tui::layout::contains;
use crate::tui::style::{Styles, rgb};
use crate::view::{Category, Coloring, PanelBody, PanelModel};

/// Upper bound of the y axis.
const Y_MAX: f64 = 100.0;
const BAR_GAP: u16 = 1;
const MAX_BAR_WIDTH: u16 = 7;

/// Renders one panel into `area`. `hover` is the mouse position, if known.
pub fn render_panel(frame: &mut Frame, area: Rect, panel: &PanelModel, hover: Option<(u16, u16)>) {
    let border = if panel.is_interactive() {
        Styles::interactive_border()
    } else {
        Styles::border()
    };
    let block = Block::bordered()
        .border_style(border)
        .title_bottom(Line::styled(panel.label(), Styles::label()).centered());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &panel.body {
        PanelBody::TimeSeries(samples) => render_series(frame, inner, panel, samples),
        PanelBody::Categorical(records) => render_bars(frame, inner, panel, records, hover),
    }
}

fn render_series(frame: &mut Frame, area: Rect, panel: &PanelModel, samples: &[Sample]) {
    let (fill, stroke) = match panel.coloring {
        Coloring::Severity => {
            let class = panel.classification();
            (class.fill, class.stroke)
        }
        Coloring::Palette => (panel.color_at(0), panel.color_at(0)),
    };

    let line = series_points(samples);
    let area_fill = fill_points(&line, area.width);
    let x_max = (line.len().saturating_sub(1)).max(1) as f64;

    let datasets = vec![
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Bar)
            .style(Styles::fill(fill))
            .data(&area_fill),
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Styles::stroke(stroke))
            .data(&line),
    ];
    let chart = Chart::new(datasets)
        .x_axis(Axis::default().bounds([0.0, x_max]))
        .y_axis(Axis::default().bounds([0.0, Y_MAX]));
    frame.render_widget(chart, area);
}

/// (index, value) points of a series, clamped to the y axis.
pub(crate) fn series_points(samples: &[Sample]) -> Vec<(f64, f64)> {
    samples
        .iter()
        .enumerate()
        .map(|(i, s)| (i as f64, s.value.clamp(0.0, Y_MAX)))
        .collect()
}

/// Densifies `line` so vertical bars cover the area under it.
///
/// Braille cells are two dots wide, so `width` cells need `2 * width` bars.
pub(crate) fn fill_points(line: &[(f64, f64)], width: u16) -> Vec<(f64, f64)> {
    match line {
        [] => Vec::new(),
        [single] => vec![*single],
        _ => {
            let steps = (width as usize * 2).max(line.len());
            let x_max = line[line.len() - 1].0;
            (0..=steps)
                .map(|step| {
                    let x = x_max * step as f64 / steps as f64;
                    (x, interpolate(line, x))
                })
                .collect()
        }
    }
}

fn interpolate(line: &[(f64, f64)], x: f64) -> f64 {
    let i = (x.floor() as usize).min(line.len() - 1);
    match line.get(i + 1) {
        Some(&(x1, y1)) => {
            let (x0, y0) = line[i];
            y0 + (y1 - y0) * (x - x0) / (x1 - x0)
        }
        None => line[i].1,
    }
}

fn render_bars(
    frame: &mut Frame,
    area: Rect,
    panel: &PanelModel,
    records: &[Category],
    hover: Option<(u16, u16)>,
) {
    if records.is_empty() || area.is_empty() {
        return;
    }
    let width = bar_width(area.width, records.len());

    let bars: Vec<Bar> = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let color = rgb(panel.color_at(i));
            Bar::default()
                .value(record.value.clamp(0.0, Y_MAX).round() as u64)
                .label(Line::from(record.id.clone()))
                .style(color)
                .value_style(Styles::label().bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(width)
        .bar_gap(BAR_GAP)
        .max(Y_MAX as u64);
    frame.render_widget(chart, area);

    if let Some((column, row)) = hover
        && contains(area, column, row)
        && let Some(index) = bar_at(area, column, width, records.len())
    {
        let record = &records[index];
        let lines = [
            format!("ID: {}", record.id),
            format!("Title: {}", panel.title),
            format!("Value: {}%", record.value),
        ];
        render_tooltip(frame, (column, row), &lines);
    }
}

/// Width of each bar so that `count` bars fit in `width` cells.
pub(crate) fn bar_width(width: u16, count: usize) -> u16 {
    let count = count.clamp(1, u16::MAX as usize) as u16;
    (width.saturating_sub(BAR_GAP.saturating_mul(count - 1)) / count).clamp(1, MAX_BAR_WIDTH)
}

/// Index of the bar drawn under `column`, if any.
pub(crate) fn bar_at(area: Rect, column: u16, bar_width: u16, count: usize) -> Option<usize> {
    let offset = column.checked_sub(area.x)?;
    let stride = bar_width + BAR_GAP;
    let index = (offset / stride) as usize;
    (offset % stride < bar_width && index < count).then_some(index)
}

//! UI-agnostic view models.
//!
//! Builds the panels of the overview grid and of the drill-down from the
//! dashboard state. The TUI maps these to ratatui widgets; nothing here
//! depends on a rendering framework.

use crate::classify::{Classification, Rgb, classify, palette_color};
use crate::dashboard::DashboardState;
use crate::model::{CPU_METRIC_ID, CoreSeries, MetricSeries, Sample, current_percentage};

/// Footer title of the info panel.
pub const INFO_TITLE: &str = "System Information";

/// One bar of a categorical panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: String,
    pub value: f64,
}

/// What a panel draws.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelBody {
    /// Area + line chart of a sample window.
    TimeSeries(Vec<Sample>),
    /// One bar per named value.
    Categorical(Vec<Category>),
}

/// How a panel picks its colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coloring {
    /// Tier color of the panel's own percentage.
    Severity,
    /// Fixed palette cycled by bar position.
    Palette,
}

/// What clicking a panel does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    ExpandCores,
}

/// A single renderable panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelModel {
    pub id: String,
    pub title: String,
    pub percentage: i64,
    pub body: PanelBody,
    pub coloring: Coloring,
    pub action: Option<PanelAction>,
}

impl PanelModel {
    /// Time-series panel for a metric. Only the CPU metric is clickable.
    pub fn metric(metric: &MetricSeries) -> Self {
        let action = (metric.id == CPU_METRIC_ID).then_some(PanelAction::ExpandCores);
        Self {
            id: metric.id.clone(),
            title: metric.title.clone(),
            percentage: metric.percentage(),
            body: PanelBody::TimeSeries(metric.samples.clone()),
            coloring: Coloring::Severity,
            action,
        }
    }

    /// Drill-down panel for one core.
    pub fn core(core: &CoreSeries) -> Self {
        Self {
            id: format!("core-{}", core.index),
            title: format!("Core {}", core.index + 1),
            percentage: core.percentage(),
            body: PanelBody::TimeSeries(core.samples.clone()),
            coloring: Coloring::Severity,
            action: None,
        }
    }

    /// Footer text, e.g. `CPU: 39%`.
    pub fn label(&self) -> String {
        format!("{}: {}%", self.title, self.percentage)
    }

    pub fn classification(&self) -> Classification {
        classify(self.percentage)
    }

    /// Color of the series or of the bar at `position`.
    pub fn color_at(&self, position: usize) -> Rgb {
        match self.coloring {
            Coloring::Severity => self.classification().stroke,
            Coloring::Palette => palette_color(position),
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.action.is_some()
    }
}

/// Content of the info panel.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoModel {
    pub title: &'static str,
    /// Display lines; embedded newlines are split into separate lines.
    pub lines: Vec<String>,
}

impl InfoModel {
    pub fn new(info: &[String]) -> Self {
        Self {
            title: INFO_TITLE,
            lines: info
                .iter()
                .flat_map(|entry| entry.split('\n'))
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Overview options coming from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverviewOptions {
    /// Append a categorical panel with the current value of every core.
    pub core_bars: bool,
}

/// The overview grid: info panel first, then metric panels.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewModel {
    pub info: InfoModel,
    pub panels: Vec<PanelModel>,
}

/// Builds the overview grid. Metrics without a leading sample are omitted.
pub fn overview(state: &DashboardState, options: OverviewOptions) -> OverviewModel {
    let mut panels: Vec<PanelModel> = state.populated_stats().map(PanelModel::metric).collect();
    if options.core_bars
        && let Some(panel) = core_breakdown(state.cores())
    {
        panels.push(panel);
    }
    OverviewModel {
        info: InfoModel::new(state.info()),
        panels,
    }
}

/// Drill-down panels, one per core. `None` while collapsed.
pub fn drill_down(state: &DashboardState) -> Option<Vec<PanelModel>> {
    state
        .is_expanded()
        .then(|| state.cores().iter().map(PanelModel::core).collect())
}

/// Categorical panel with one bar per core. `None` without cores.
pub fn core_breakdown(cores: &[CoreSeries]) -> Option<PanelModel> {
    if cores.is_empty() {
        return None;
    }
    let records: Vec<Category> = cores
        .iter()
        .map(|c| Category {
            id: (c.index + 1).to_string(),
            value: c.samples.last().map_or(0.0, |s| s.value),
        })
        .collect();
    let mean = records.iter().map(|r| r.value).sum::<f64>() / records.len() as f64;
    Some(PanelModel {
        id: "cores".to_string(),
        title: "Cores".to_string(),
        percentage: current_percentage(&[Sample::new(mean)]),
        body: PanelBody::Categorical(records),
        coloring: Coloring::Palette,
        action: None,
    })
}

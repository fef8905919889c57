//! Dashboard state owned by the composer.
//!
//! Mutated only by [`DashboardState::apply_snapshot`] and the expand/collapse
//! transitions; renderers receive shared references.

use crate::model::{CPU_METRIC_ID, CoreSeries, MetricSeries, Snapshot};

/// Drill-down visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrillDown {
    #[default]
    Collapsed,
    Expanded,
}

/// Current metrics, cores, info lines and drill-down flag.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    stats: Vec<MetricSeries>,
    cores: Vec<CoreSeries>,
    info: Vec<String>,
    drill_down: DrillDown,
    snapshots: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    /// State before the first snapshot.
    pub fn new() -> Self {
        let Snapshot { stats, cores, info } = Snapshot::placeholder();
        Self {
            stats,
            cores,
            info,
            drill_down: DrillDown::Collapsed,
            snapshots: 0,
        }
    }

    pub fn stats(&self) -> &[MetricSeries] {
        &self.stats
    }

    pub fn cores(&self) -> &[CoreSeries] {
        &self.cores
    }

    pub fn info(&self) -> &[String] {
        &self.info
    }

    pub fn drill_down(&self) -> DrillDown {
        self.drill_down
    }

    pub fn is_expanded(&self) -> bool {
        self.drill_down == DrillDown::Expanded
    }

    /// Number of snapshots applied so far.
    pub fn snapshots(&self) -> u64 {
        self.snapshots
    }

    /// Replaces stats, cores and info wholesale.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.stats = snapshot.stats;
        self.cores = snapshot.cores;
        self.info = snapshot.info;
        self.snapshots += 1;
    }

    /// Metrics shown in the overview grid, in order.
    pub fn populated_stats(&self) -> impl Iterator<Item = &MetricSeries> {
        self.stats.iter().filter(|m| m.populated)
    }

    /// True when the CPU panel is currently part of the overview.
    pub fn cpu_panel_visible(&self) -> bool {
        self.populated_stats().any(|m| m.id == CPU_METRIC_ID)
    }

    /// Collapsed -> Expanded.
    pub fn expand(&mut self) {
        self.drill_down = DrillDown::Expanded;
    }

    /// Expanded -> Collapsed.
    pub fn collapse(&mut self) {
        self.drill_down = DrillDown::Collapsed;
    }
}

//! Dashboard data model.
//!
//! Every snapshot replaces the whole model: metric series, per-core series and
//! info lines are never merged with what was shown before.

/// A single cleaned sample. Always a real number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub value: f64,
}

impl Sample {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

/// Drops `None` and NaN entries, keeping the remaining values oldest-first.
pub fn clean_samples<I>(raw: I) -> Vec<Sample>
where
    I: IntoIterator<Item = Option<f64>>,
{
    raw.into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .map(Sample::new)
        .collect()
}

/// Integer percentage of the newest sample, rounded down. Zero for an empty series.
pub fn current_percentage(samples: &[Sample]) -> i64 {
    samples
        .last()
        .map(|s| s.value.floor() as i64)
        .unwrap_or(0)
}

/// One named metric and its sample window.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    /// Stable key, e.g. `cpu`, `mem`.
    pub id: String,
    pub title: String,
    /// Cleaned samples, oldest first.
    pub samples: Vec<Sample>,
    /// Whether the raw window had a valid leading sample.
    ///
    /// Metrics without one are left out of the overview grid.
    pub populated: bool,
}

impl MetricSeries {
    /// Builds a series from a raw producer window.
    pub fn from_raw(id: impl Into<String>, title: impl Into<String>, raw: &[Option<f64>]) -> Self {
        let populated = matches!(raw.first(), Some(Some(v)) if !v.is_nan());
        Self {
            id: id.into(),
            title: title.into(),
            samples: clean_samples(raw.iter().copied()),
            populated,
        }
    }

    /// Placeholder shown before the first snapshot.
    pub fn empty(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::from_raw(id, title, &[])
    }

    pub fn percentage(&self) -> i64 {
        current_percentage(&self.samples)
    }
}

/// Sample window of one CPU core.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreSeries {
    /// 0-based core index.
    pub index: usize,
    pub samples: Vec<Sample>,
}

impl CoreSeries {
    pub fn new(index: usize, samples: Vec<Sample>) -> Self {
        Self { index, samples }
    }

    pub fn percentage(&self) -> i64 {
        current_percentage(&self.samples)
    }
}

/// One fully decoded stream message.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub stats: Vec<MetricSeries>,
    pub cores: Vec<CoreSeries>,
    pub info: Vec<String>,
}

/// Metric id of the interactive CPU panel.
pub const CPU_METRIC_ID: &str = "cpu";

/// Metrics shown before any snapshot arrives, in display order.
pub const DEFAULT_METRICS: [(&str, &str); 8] = [
    ("cpu", "CPU"),
    ("gpu", "GPU"),
    ("mem", "Memory"),
    ("gtemp", "GPU Temp"),
    ("gpower", "GPU Power"),
    ("gmem", "GPU Memory"),
    ("disk", "Disk I/O"),
    ("net", "Network I/O"),
];

/// Info line shown before any snapshot arrives.
pub const DEFAULT_INFO: &str = "N/A";

impl Snapshot {
    /// State displayed before the first snapshot: every default metric empty,
    /// no cores, placeholder info.
    pub fn placeholder() -> Self {
        Self {
            stats: DEFAULT_METRICS
                .iter()
                .map(|(id, title)| MetricSeries::empty(*id, *title))
                .collect(),
            cores: Vec::new(),
            info: vec![DEFAULT_INFO.to_string()],
        }
    }
}

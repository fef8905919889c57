//! Wire format of stream messages.
//!
//! ```json
//! {
//!   "stats": [ { "id": "cpu", "title": "CPU", "data": [10.0, null, 12.5] } ],
//!   "cores": [ [ { "value": 3.0 } ], [ { "value": 7.5 } ] ],
//!   "info":  [ "OS: Linux 6.1" ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use thiserror::Error;

use crate::model::{CoreSeries, MetricSeries, Snapshot, clean_samples};

/// Reasons a frame is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Frame is not well-formed JSON.
    #[error("malformed frame: {0}")]
    Syntax(String),
    /// JSON is valid but a field is missing or has the wrong type.
    #[error("unexpected frame layout: {0}")]
    Schema(String),
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        match e.classify() {
            Category::Data => DecodeError::Schema(e.to_string()),
            Category::Syntax | Category::Eof | Category::Io => DecodeError::Syntax(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub(crate) struct WireSnapshot {
    pub stats: Vec<WireStat>,
    pub cores: Vec<Vec<WirePoint>>,
    pub info: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub(crate) struct WireStat {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub data: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub(crate) struct WirePoint {
    #[serde(default)]
    pub value: Option<f64>,
}

impl From<WireSnapshot> for Snapshot {
    fn from(wire: WireSnapshot) -> Self {
        Snapshot {
            stats: wire
                .stats
                .into_iter()
                .map(|s| MetricSeries::from_raw(s.id, s.title, &s.data))
                .collect(),
            cores: wire
                .cores
                .into_iter()
                .enumerate()
                .map(|(index, points)| {
                    CoreSeries::new(index, clean_samples(points.into_iter().map(|p| p.value)))
                })
                .collect(),
            info: wire.info,
        }
    }
}

/// Decodes one text frame into a snapshot.
pub fn decode_snapshot(text: &str) -> Result<Snapshot, DecodeError> {
    let wire: WireSnapshot = serde_json::from_str(text)?;
    Ok(wire.into())
}

// Chart series domain models
use super::packet::RawValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One chart record per packet. Serializes flat, the shape the charting
/// collaborator reads: `{ name, timestamp, unit, <label>: value, .. }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    #[serde(rename = "name")]
    pub display_name: String,
    pub timestamp: String,
    #[serde(default)]
    pub unit: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, RawValue>,
}

impl SeriesPoint {
    pub fn new(timestamp: impl Into<String>) -> Self {
        let timestamp = timestamp.into();
        let display_name = Self::format_display_name(&timestamp);
        Self {
            display_name,
            timestamp,
            unit: String::new(),
            values: BTreeMap::new(),
        }
    }

    fn format_display_name(timestamp: &str) -> String {
        // "2020-01-01T00:00:00Z" -> "2020-01-01 00:00:00Z"
        timestamp.replacen('T', " ", 1)
    }

    pub fn value(&self, label: &str) -> Option<&RawValue> {
        self.values.get(label)
    }
}

/// Output of one dataset build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuiltSeries {
    /// Sorted ascending by timestamp.
    pub points: Vec<SeriesPoint>,
    /// Distinct labels in first-encounter order.
    pub line_names: Vec<String>,
    /// Upper bound of the value axis; the lower bound is always 0.
    pub domain: u64,
    /// Requested field ids that matched no descriptor.
    pub unresolved_fields: Vec<String>,
}

impl BuiltSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

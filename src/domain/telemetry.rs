// Telemetry configuration domain models
use serde::{Deserialize, Deserializer, Serialize};

/// Describes one decoded telemetry field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryFieldDescriptor {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub unit: String,
}

impl TelemetryFieldDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            unit: unit.into(),
        }
    }
}

/// Field metadata published by the decoder. Descriptors are kept in scan
/// order; ids are not required to be unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfiguration {
    #[serde(default, deserialize_with = "deserialize_fields")]
    pub fields: Vec<TelemetryFieldDescriptor>,
}

impl TelemetryConfiguration {
    pub fn new(fields: Vec<TelemetryFieldDescriptor>) -> Self {
        Self { fields }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FieldTable {
    List(Vec<TelemetryFieldDescriptor>),
    Keyed(serde_json::Map<String, serde_json::Value>),
}

/// Accepts `fields` either as an array or as an object keyed by anything.
/// Object entries are visited the way a JavaScript `Object.keys` scan would:
/// array-index keys ascending, then the rest in document order.
fn deserialize_fields<'de, D>(deserializer: D) -> Result<Vec<TelemetryFieldDescriptor>, D::Error>
where
    D: Deserializer<'de>,
{
    match FieldTable::deserialize(deserializer)? {
        FieldTable::List(fields) => Ok(fields),
        FieldTable::Keyed(map) => {
            let mut indexed = Vec::new();
            let mut named = Vec::new();
            for (key, value) in map {
                match array_index(&key) {
                    Some(index) => indexed.push((index, value)),
                    None => named.push(value),
                }
            }
            indexed.sort_by_key(|(index, _)| *index);

            indexed
                .into_iter()
                .map(|(_, value)| value)
                .chain(named)
                .map(|value| serde_json::from_value(value).map_err(serde::de::Error::custom))
                .collect()
        }
    }
}

fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>().ok().filter(|index| *index != u32::MAX)
}

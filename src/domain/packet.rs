// Decoded packet domain model
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A raw field value as produced by the packet decoder. Kept as-is; no
/// coercion happens until the axis domain is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(serde_json::Number),
    Text(String),
}

impl RawValue {
    /// Integer reading of the value with `parseInt(value, 10)` semantics:
    /// leading whitespace is skipped, an optional sign is accepted and the
    /// longest run of decimal digits is taken. Numbers are truncated toward
    /// zero. Returns `None` when no digits can be read.
    pub fn parse_int(&self) -> Option<i64> {
        match self {
            RawValue::Number(n) => match n.as_i64() {
                Some(i) => Some(i),
                None => n
                    .as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64),
            },
            RawValue::Text(s) => parse_int_prefix(s),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{}", n),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Number(value.into())
    }
}

fn parse_int_prefix(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits_len == 0 {
        return None;
    }

    // Saturate instead of failing on absurdly long digit runs
    let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// One timestamped telemetry sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Packet {
    #[serde(rename = "packet_timestamp")]
    pub timestamp: String,
    #[serde(default)]
    pub fields: HashMap<String, RawValue>,
}

impl Packet {
    pub fn new(timestamp: impl Into<String>, fields: HashMap<String, RawValue>) -> Self {
        Self {
            timestamp: timestamp.into(),
            fields,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecodedPackets {
    #[serde(default)]
    pub packets: Vec<Packet>,
}

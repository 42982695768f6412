// Graph description domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GraphKind {
    Line,
    Other(String),
}

impl From<String> for GraphKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "line" => GraphKind::Line,
            _ => GraphKind::Other(value),
        }
    }
}

impl From<GraphKind> for String {
    fn from(kind: GraphKind) -> Self {
        match kind {
            GraphKind::Line => "line".to_string(),
            GraphKind::Other(other) => other,
        }
    }
}

/// What to plot: the chart kind, the field ids on the Y axis and labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphInfo {
    #[serde(rename = "type")]
    pub kind: GraphKind,
    #[serde(default)]
    pub y_axis: Vec<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub x_axis: String,
}

impl GraphInfo {
    pub fn line(title: impl Into<String>, x_axis: impl Into<String>, y_axis: Vec<String>) -> Self {
        Self {
            kind: GraphKind::Line,
            y_axis,
            title: title.into(),
            x_axis: x_axis.into(),
        }
    }

    pub fn is_line(&self) -> bool {
        self.kind == GraphKind::Line
    }
}

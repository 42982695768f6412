// Mapper to convert the chart view into the renderer's JSON shape
use crate::application::chart_service::{ChartView, LineStyle};
use crate::application::time_window::WindowOutcome;
use crate::application::visibility::VisibilityState;
use crate::domain::series::SeriesPoint;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOutput {
    pub title: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub chart_data: Vec<SeriesPoint>,
    pub chart_line_names: Vec<String>,
    pub chart_domain: u64,
    pub line_visibility: VisibilityState,
    pub lines: Vec<LineOutput>,
    pub window: WindowOutput,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unresolved_fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineOutput {
    pub name: String,
    pub color: Option<String>,
    pub opacity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowOutput {
    pub from: String,
    pub to: String,
    #[serde(flatten)]
    pub outcome: WindowOutcome,
}

pub fn chart_view_to_output(view: ChartView<'_>) -> ChartOutput {
    ChartOutput {
        title: view.title.to_string(),
        x_axis_label: view.x_axis_label.to_string(),
        y_axis_label: view.y_axis_label.to_string(),
        chart_data: view.data.points.into_iter().cloned().collect(),
        chart_line_names: view.line_names.to_vec(),
        chart_domain: view.domain,
        line_visibility: view.visibility.clone(),
        lines: view.lines.into_iter().map(line_to_output).collect(),
        window: WindowOutput {
            from: view.window.from.clone(),
            to: view.window.to.clone(),
            outcome: view.data.outcome,
        },
        unresolved_fields: view.unresolved_fields.to_vec(),
    }
}

fn line_to_output(line: LineStyle<'_>) -> LineOutput {
    LineOutput {
        name: line.name.to_string(),
        color: line.color.map(str::to_string),
        // Hidden lines stay in the legend so they can be clicked back
        opacity: if line.visible { 1 } else { 0 },
    }
}

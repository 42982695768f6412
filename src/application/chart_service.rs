// Chart view service - Explicit view state and its event transitions
use crate::application::palette::color_for;
use crate::application::series_builder::SeriesBuilder;
use crate::application::time_window::{filter, DateEdge, TimeWindow, WindowedPoints};
use crate::application::visibility::{LineClick, VisibilityState};
use crate::domain::error::ChartError;
use crate::domain::graph::GraphInfo;
use crate::domain::packet::DecodedPackets;
use crate::domain::series::BuiltSeries;
use crate::domain::telemetry::TelemetryConfiguration;
use thiserror::Error;

/// Axis upper bound reported before any dataset has been loaded.
pub const INITIAL_DOMAIN: u64 = 300;

#[derive(Debug, Clone)]
pub enum ChartEvent {
    DatasetLoaded {
        packets: DecodedPackets,
        configuration: TelemetryConfiguration,
    },
    DateChanged {
        raw: String,
        edge: DateEdge,
    },
    LineClicked(LineClick),
}

/// An event the state could not take. The untouched state is handed back.
#[derive(Debug, Error)]
#[error("chart event rejected: {error}")]
pub struct Rejected {
    pub state: Box<ChartViewState>,
    #[source]
    pub error: ChartError,
}

/// Everything one chart view owns. Transitions consume the state and return
/// the next one; nothing is mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartViewState {
    pub graph: GraphInfo,
    pub built: Option<BuiltSeries>,
    pub window: TimeWindow,
    pub visibility: VisibilityState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle<'a> {
    pub name: &'a str,
    pub color: Option<&'static str>,
    pub visible: bool,
}

/// Render-ready projection of the state.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView<'a> {
    pub title: &'a str,
    pub x_axis_label: &'a str,
    pub y_axis_label: &'a str,
    pub data: WindowedPoints<'a>,
    pub line_names: &'a [String],
    pub domain: u64,
    pub lines: Vec<LineStyle<'a>>,
    pub visibility: &'a VisibilityState,
    pub window: &'a TimeWindow,
    pub unresolved_fields: &'a [String],
}

impl ChartViewState {
    pub fn new(graph: GraphInfo, window: TimeWindow) -> Self {
        Self {
            graph,
            built: None,
            window,
            visibility: VisibilityState::default(),
        }
    }

    pub fn apply(self, event: ChartEvent) -> Result<Self, Rejected> {
        match event {
            ChartEvent::DatasetLoaded {
                packets,
                configuration,
            } => Ok(self.load(&packets, &configuration)),
            ChartEvent::DateChanged { raw, edge } => {
                match self.window.clone().with_edge(edge, &raw) {
                    Ok(window) => Ok(Self { window, ..self }),
                    Err(error) => Err(Rejected {
                        state: Box::new(self),
                        error,
                    }),
                }
            }
            ChartEvent::LineClicked(click) => {
                let visibility = self.visibility.on_click(&click);
                Ok(Self { visibility, ..self })
            }
        }
    }

    /// Rebuild the series for a new dataset. The window is kept and every
    /// new line starts out visible.
    pub fn load(self, packets: &DecodedPackets, configuration: &TelemetryConfiguration) -> Self {
        let built = SeriesBuilder::new(configuration).build(&packets.packets, &self.graph.y_axis);
        if !built.unresolved_fields.is_empty() {
            tracing::warn!(
                "Graph '{}' requests unknown fields: {}",
                self.graph.title,
                built.unresolved_fields.join(", ")
            );
        }

        Self {
            visibility: VisibilityState::new(&built.line_names),
            built: Some(built),
            ..self
        }
    }

    /// Project the state for rendering. Only line graphs produce output.
    pub fn view(&self) -> Option<ChartView<'_>> {
        if !self.graph.is_line() {
            tracing::debug!("Graph '{}' is not a line graph, nothing to chart", self.graph.title);
            return None;
        }

        let (points, line_names, domain, unresolved_fields) = match &self.built {
            Some(built) => (
                built.points.as_slice(),
                built.line_names.as_slice(),
                built.domain,
                built.unresolved_fields.as_slice(),
            ),
            None => (&[][..], &[][..], INITIAL_DOMAIN, &[][..]),
        };

        let data = filter(points, &self.window);
        let y_axis_label = data.points.first().copied().map_or("", |point| point.unit.as_str());

        let lines = line_names
            .iter()
            .enumerate()
            .map(|(index, name)| LineStyle {
                name: name.as_str(),
                color: color_for(index),
                visible: self.visibility.is_visible(name),
            })
            .collect();

        Some(ChartView {
            title: &self.graph.title,
            x_axis_label: &self.graph.x_axis,
            y_axis_label,
            data,
            line_names,
            domain,
            lines,
            visibility: &self.visibility,
            window: &self.window,
            unresolved_fields,
        })
    }
}

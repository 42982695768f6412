// Main entry point - Load a dataset, replay view events and print the chart
use anyhow::Context;
use chrono::{Duration, Utc};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use satellite_telemetry_charts::application::chart_service::{ChartEvent, ChartViewState};
use satellite_telemetry_charts::application::time_window::{DateEdge, TimeWindow};
use satellite_telemetry_charts::application::visibility::LineClick;
use satellite_telemetry_charts::infrastructure::config::{load_app_config, AppConfig};
use satellite_telemetry_charts::infrastructure::dataset_loader::{load_dataset, Dataset};
use satellite_telemetry_charts::presentation::chart_output::chart_view_to_output;

fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = load_app_config()?;

    // Initialize tracing; stdout is reserved for the chart JSON
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let dataset = load_dataset(Path::new(&config.dataset_path))
        .with_context(|| format!("Failed to load dataset {}", config.dataset_path))?;

    let lookback = Duration::try_hours(config.lookback_hours)
        .with_context(|| format!("lookback_hours out of range: {}", config.lookback_hours))?;
    let window = TimeWindow::ending_at(Utc::now(), lookback)
        .with_context(|| format!("lookback_hours out of range: {}", config.lookback_hours))?;

    let mut state = ChartViewState::new(dataset.graph_info.clone(), window);
    for event in startup_events(dataset, &config) {
        state = match state.apply(event) {
            Ok(next) => next,
            Err(rejected) => {
                tracing::warn!("{}", rejected);
                *rejected.state
            }
        };
    }

    match state.view() {
        Some(view) => {
            let output = chart_view_to_output(view);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        None => {
            tracing::info!("Graph type {:?} has no chart output", state.graph.kind);
        }
    }

    Ok(())
}

/// The dataset load, then configured window edges, then legend clicks.
fn startup_events(dataset: Dataset, config: &AppConfig) -> Vec<ChartEvent> {
    let mut events = vec![ChartEvent::DatasetLoaded {
        packets: dataset.decoded_packets,
        configuration: dataset.telemetry_configuration,
    }];

    let edges = [
        (DateEdge::From, &config.window_from),
        (DateEdge::To, &config.window_to),
    ];
    for (edge, raw) in edges {
        if let Some(raw) = raw {
            events.push(ChartEvent::DateChanged {
                raw: raw.clone(),
                edge,
            });
        }
    }

    events.extend(
        config
            .clicks
            .iter()
            .map(|data_key| ChartEvent::LineClicked(LineClick::new(data_key.as_str()))),
    );

    events
}

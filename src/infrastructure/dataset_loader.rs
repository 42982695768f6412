// Dataset loader - Reads the decoder's JSON export from disk
use crate::domain::error::{ChartError, Result};
use crate::domain::graph::GraphInfo;
use crate::domain::packet::DecodedPackets;
use crate::domain::telemetry::TelemetryConfiguration;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub decoded_packets: DecodedPackets,
    #[serde(default)]
    pub telemetry_configuration: TelemetryConfiguration,
    pub graph_info: GraphInfo,
}

pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let contents = std::fs::read_to_string(path).map_err(|source| ChartError::DatasetIo {
        path: path.display().to_string(),
        source,
    })?;
    let dataset = parse_dataset(&contents)?;

    tracing::info!(
        "Loaded {} packets and {} telemetry fields from {}",
        dataset.decoded_packets.packets.len(),
        dataset.telemetry_configuration.fields.len(),
        path.display()
    );

    Ok(dataset)
}

pub fn parse_dataset(contents: &str) -> Result<Dataset> {
    Ok(serde_json::from_str(contents)?)
}

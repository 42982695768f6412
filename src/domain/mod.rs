// Domain layer - Telemetry and chart models
pub mod error;
pub mod graph;
pub mod packet;
pub mod series;
pub mod telemetry;

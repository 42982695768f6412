// Satellite telemetry chart core
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

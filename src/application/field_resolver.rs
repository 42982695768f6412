// Field resolver - Maps raw field ids to their descriptors
use crate::domain::telemetry::{TelemetryConfiguration, TelemetryFieldDescriptor};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldResolution<'a> {
    Resolved(&'a TelemetryFieldDescriptor),
    Unresolved,
}

impl<'a> FieldResolution<'a> {
    pub fn descriptor(self) -> Option<&'a TelemetryFieldDescriptor> {
        match self {
            FieldResolution::Resolved(descriptor) => Some(descriptor),
            FieldResolution::Unresolved => None,
        }
    }
}

/// Resolve a field id against the configuration.
///
/// Every descriptor is scanned and the last one with a matching id wins, so
/// a configuration that repeats an id is resolved to its final entry.
pub fn resolve<'a>(
    configuration: &'a TelemetryConfiguration,
    field_id: &str,
) -> FieldResolution<'a> {
    configuration
        .fields
        .iter()
        .rev()
        .find(|descriptor| descriptor.id == field_id)
        .map_or(FieldResolution::Unresolved, FieldResolution::Resolved)
}

// Series builder - Turns decoded packets into sorted chart records
use crate::application::field_resolver::{resolve, FieldResolution};
use crate::domain::packet::Packet;
use crate::domain::series::{BuiltSeries, SeriesPoint};
use crate::domain::telemetry::TelemetryConfiguration;

#[derive(Debug, Clone, Copy)]
pub struct SeriesBuilder<'a> {
    configuration: &'a TelemetryConfiguration,
}

impl<'a> SeriesBuilder<'a> {
    pub fn new(configuration: &'a TelemetryConfiguration) -> Self {
        Self { configuration }
    }

    /// Build one record per packet for the requested field ids.
    ///
    /// Values are stored raw under the resolved label. The point's unit is
    /// the unit of the last field resolved for it. The domain is the largest
    /// integer reading of any requested value, including ids that match no
    /// descriptor, and never below 0.
    pub fn build(&self, packets: &[Packet], y_axis: &[String]) -> BuiltSeries {
        let mut line_names: Vec<String> = Vec::new();
        let mut unresolved_fields: Vec<String> = Vec::new();
        let mut best_domain: i64 = 0;

        let mut points: Vec<SeriesPoint> = packets
            .iter()
            .map(|packet| {
                let mut point = SeriesPoint::new(packet.timestamp.clone());

                for field_id in y_axis {
                    let raw = packet.fields.get(field_id);

                    // Every requested value counts toward the domain, matched or not
                    if let Some(value) = raw.and_then(|raw| raw.parse_int()) {
                        if value > best_domain {
                            best_domain = value;
                        }
                    }

                    let descriptor = match resolve(self.configuration, field_id) {
                        FieldResolution::Resolved(descriptor) => descriptor,
                        FieldResolution::Unresolved => {
                            if !unresolved_fields.contains(field_id) {
                                tracing::debug!("No telemetry field matches id {}", field_id);
                                unresolved_fields.push(field_id.clone());
                            }
                            continue;
                        }
                    };

                    if !line_names.contains(&descriptor.label) {
                        line_names.push(descriptor.label.clone());
                    }
                    point.unit = descriptor.unit.clone();

                    if let Some(raw) = raw {
                        point.values.insert(descriptor.label.clone(), raw.clone());
                    }
                }

                point
            })
            .collect();

        // Stable: packets sharing a timestamp keep their arrival order
        points.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        tracing::debug!(
            "Built {} chart points across {} lines (domain {})",
            points.len(),
            line_names.len(),
            best_domain
        );

        BuiltSeries {
            points,
            line_names,
            domain: best_domain.max(0) as u64,
            unresolved_fields,
        }
    }
}

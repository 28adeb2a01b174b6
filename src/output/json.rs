use serde_json::json;

use crate::config::ActiveSpaceInput;
use crate::signal::AttenuationTrace;
use crate::sonar::{ActiveSpace, SourceLevel};
use crate::sweep::SweepPoint;

use super::{Formatter, input_key, iso8601_timestamp};

/// One JSON object per line
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn active_space(&self, result: &ActiveSpace) -> String {
        json!({
            "ts": iso8601_timestamp(),
            "pl_db": result.propagation_loss_db,
            "spreading": result.geometric_spreading,
            "range_m": result.max_range_m,
            "range_km": result.max_range_km,
            "area_km2": result.area_km2,
        })
        .to_string()
    }

    fn source_level(&self, result: &SourceLevel) -> String {
        json!({
            "ts": iso8601_timestamp(),
            "sl_db": result.source_level_db,
        })
        .to_string()
    }

    fn attenuation(&self, trace: &AttenuationTrace) -> String {
        json!({
            "ts": iso8601_timestamp(),
            "frequency_hz": trace.frequency_hz,
            "distance_m": trace.distance_m,
            "sl_db": trace.source_level_db,
            "amplitude_pa": trace.amplitude_pa,
            "tl_db": trace.transmission_loss_db,
            "attenuation_factor": trace.attenuation_factor,
            "samples": trace.len(),
            "source": trace.source_summary(),
            "received": trace.received_summary(),
        })
        .to_string()
    }

    fn sweep_point(&self, input: ActiveSpaceInput, point: &SweepPoint) -> String {
        let space = &point.active_space;
        json!({
            "ts": iso8601_timestamp(),
            (input_key(input)): point.value,
            "pl_db": space.propagation_loss_db,
            "range_km": space.max_range_km,
            "area_km2": space.area_km2,
        })
        .to_string()
    }
}

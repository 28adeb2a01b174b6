use std::io::{self, Write};

use crate::config::ActiveSpaceInput;
use crate::signal::{AttenuationTrace, WaveformSummary};
use crate::sonar::{ActiveSpace, SourceLevel};
use crate::sweep::SweepPoint;

use super::{Formatter, RecordKind, iso8601_timestamp};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn active_space(&self, result: &ActiveSpace) -> String {
        format!(
            "{},{},{},{},{},{:.2}",
            iso8601_timestamp(),
            result.propagation_loss_db,
            result.geometric_spreading,
            result.max_range_m,
            result.max_range_km,
            result.area_km2
        )
    }

    fn source_level(&self, result: &SourceLevel) -> String {
        format!("{},{}", iso8601_timestamp(), result.source_level_db)
    }

    fn attenuation(&self, trace: &AttenuationTrace) -> String {
        // Empty summary columns when the trace has no samples
        let columns = |summary: Option<WaveformSummary>, precision: usize| match summary {
            Some(s) => format!("{:.*},{:.*}", precision, s.peak(), precision, s.std_dev),
            None => ",".to_string(),
        };
        format!(
            "{},{},{},{:.4},{:.6e},{},{}",
            iso8601_timestamp(),
            trace.frequency_hz,
            trace.distance_m,
            trace.transmission_loss_db,
            trace.attenuation_factor,
            columns(trace.source_summary(), 3),
            columns(trace.received_summary(), 6)
        )
    }

    fn sweep_point(&self, _input: ActiveSpaceInput, point: &SweepPoint) -> String {
        let space = &point.active_space;
        format!(
            "{},{},{},{},{:.2}",
            iso8601_timestamp(),
            point.value,
            space.propagation_loss_db,
            space.max_range_km,
            space.area_km2
        )
    }

    fn header(&self, kind: RecordKind) -> Option<&'static str> {
        Some(match kind {
            RecordKind::ActiveSpace => "ts,pl_db,spreading,range_m,range_km,area_km2",
            RecordKind::SourceLevel => "ts,sl_db",
            RecordKind::Attenuation => {
                "ts,frequency_hz,distance_m,tl_db,attenuation_factor,source_peak_pa,source_rms_pa,received_peak_pa,received_rms_pa"
            }
            RecordKind::Sweep => "ts,value,pl_db,range_km,area_km2",
        })
    }
}

/// Write every sample of a trace as CSV rows, one per time step.
pub fn write_samples_csv<W: Write>(trace: &AttenuationTrace, mut writer: W) -> io::Result<()> {
    writeln!(writer, "time_s,source_pa,received_pa,source_db,received_db")?;
    for i in 0..trace.len() {
        writeln!(
            writer,
            "{},{},{},{},{}",
            trace.time[i],
            trace.source[i],
            trace.received[i],
            trace.source_db[i],
            trace.received_db[i]
        )?;
    }
    writer.flush()
}

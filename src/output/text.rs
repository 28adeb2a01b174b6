use crate::config::ActiveSpaceInput;
use crate::signal::{AttenuationTrace, WaveformSummary};
use crate::sonar::{ActiveSpace, SourceLevel};
use crate::sweep::SweepPoint;

use super::{Formatter, input_key};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

fn summary_line(name: &str, summary: Option<WaveformSummary>) -> String {
    match summary {
        Some(summary) => format!(
            "{}: peak {:.3} Pa ({:.1} dB re. 1µPa), rms {:.3} Pa",
            name,
            summary.peak(),
            summary.peak_db(),
            summary.std_dev
        ),
        None => format!("{}: no samples", name),
    }
}

impl Formatter for TextFormatter {
    fn active_space(&self, result: &ActiveSpace) -> String {
        // Range printed at full precision, area to two decimals
        let mut out = format!(
            "PL = {} dB re. 1µPa\nDetection range = {:?} km, Active space = {:.2} km^2",
            result.propagation_loss_db, result.max_range_km, result.area_km2
        );
        if self.verbose {
            out.push_str(&format!(
                "\nGeometric spreading = {}, r_max = {:.1} m",
                result.geometric_spreading, result.max_range_m
            ));
        }
        out
    }

    fn source_level(&self, result: &SourceLevel) -> String {
        format!("SL = {} dB re. 20µPa @ 1m", result.source_level_db)
    }

    fn attenuation(&self, trace: &AttenuationTrace) -> String {
        let mut out = format!(
            "f = {} Hz, r = {} m: TL = {:.2} dB, received = source x {:.6e}",
            trace.frequency_hz,
            trace.distance_m,
            trace.transmission_loss_db,
            trace.attenuation_factor
        );
        if self.verbose {
            out.push_str(&format!(
                "\nSL = {} dB re. 1µPa @ 1m, amplitude = {:.3} Pa, {} samples over {} s",
                trace.source_level_db,
                trace.amplitude_pa,
                trace.len(),
                trace.time.last().copied().unwrap_or(0.0)
            ));
        }
        out.push('\n');
        out.push_str(&summary_line("Source", trace.source_summary()));
        out.push('\n');
        out.push_str(&summary_line("Received", trace.received_summary()));
        out
    }

    fn sweep_point(&self, input: ActiveSpaceInput, point: &SweepPoint) -> String {
        let space = &point.active_space;
        format!(
            "{} = {:>5}: PL = {:>4} dB, range = {:>12.3} km, active space = {:>14.2} km^2",
            input_key(input).to_uppercase(),
            point.value,
            space.propagation_loss_db,
            space.max_range_km,
            space.area_km2
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ActiveSpaceParams, AttenuationParams, SourceLevelParams};

    #[test]
    fn test_active_space_defaults() {
        let text = TextFormatter::new(false)
            .active_space(&ActiveSpace::evaluate(&ActiveSpaceParams::default()));
        assert_eq!(
            text,
            "PL = 50 dB re. 1µPa\nDetection range = 100.0 km, Active space = 31415.93 km^2"
        );
    }

    #[test]
    fn test_active_space_verbose() {
        let text = TextFormatter::new(true)
            .active_space(&ActiveSpace::evaluate(&ActiveSpaceParams::default()));
        assert!(text.ends_with("Geometric spreading = 10, r_max = 100000.0 m"));
    }

    #[test]
    fn test_source_level_defaults() {
        let text = TextFormatter::new(false)
            .source_level(&SourceLevel::evaluate(&SourceLevelParams::default()));
        assert_eq!(text, "SL = 127 dB re. 20µPa @ 1m");
    }

    #[test]
    fn test_attenuation_lines() {
        let trace = AttenuationTrace::simulate(&AttenuationParams::default());
        let text = TextFormatter::new(false).attenuation(&trace);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("f = 20 Hz, r = 10 m: TL = 10.00 dB"));
        assert!(lines[1].starts_with("Source: peak"));
        assert!(lines[2].starts_with("Received: peak"));
    }

    #[test]
    fn test_attenuation_without_samples() {
        let trace = AttenuationTrace::simulate_with(&AttenuationParams::default(), 189.0, 1.0, 0);
        let text = TextFormatter::new(false).attenuation(&trace);
        assert!(text.ends_with("Source: no samples\nReceived: no samples"));
        assert!(!text.contains("inf"));
    }

    #[test]
    fn test_sweep_point() {
        let point = SweepPoint {
            value: 75.0,
            active_space: ActiveSpace::evaluate(&ActiveSpaceParams {
                noise_level: 75.0,
                ..Default::default()
            }),
        };
        let text = TextFormatter::new(false).sweep_point(ActiveSpaceInput::NoiseLevel, &point);
        assert!(text.starts_with("NL =    75: PL =   60 dB"));
    }
}

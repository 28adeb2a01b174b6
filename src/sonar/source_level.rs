use crate::config::SourceLevelParams;

/// Solve the sonar equation for the source level: `SL = DT + TL + NL - PG`.
pub fn source_level(
    detection_threshold: f64,
    transmission_loss: f64,
    noise_level: f64,
    processing_gain: f64,
) -> f64 {
    detection_threshold + transmission_loss + noise_level - processing_gain
}

/// Source level estimated from a measurement setup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceLevel {
    /// dB re 20 µPa @ 1 m
    pub source_level_db: f64,
}

impl SourceLevel {
    pub fn evaluate(params: &SourceLevelParams) -> Self {
        let source_level_db = source_level(
            params.detection_threshold,
            params.transmission_loss,
            params.noise_level,
            params.processing_gain,
        );
        log::debug!("Source level: SL={} dB", source_level_db);
        Self { source_level_db }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        SL_DETECTION_THRESHOLD, SL_NOISE_LEVEL, SL_PROCESSING_GAIN, SL_TRANSMISSION_LOSS,
    };

    #[test]
    fn test_default_source_level() {
        let sl = SourceLevel::evaluate(&SourceLevelParams::default());
        assert_eq!(sl.source_level_db, 127.0);
    }

    #[test]
    fn test_bellbird_measurement() {
        // PL 65 dB, PG 4 dB, DT 0 dB, NL 60 dB
        assert_eq!(source_level(0.0, 65.0, 60.0, 4.0), 121.0);
    }

    #[test]
    fn test_source_level_matches_formula_over_grid() {
        for dt in SL_DETECTION_THRESHOLD.values() {
            for tl in SL_TRANSMISSION_LOSS.values() {
                for nl in SL_NOISE_LEVEL.values() {
                    for pg in SL_PROCESSING_GAIN.values() {
                        assert_eq!(source_level(dt, tl, nl, pg), dt + tl + nl - pg);
                    }
                }
            }
        }
    }
}

//! Detection range and active space from the passive sonar equation.
//!
//! At the maximum detection range the sonar equation holds with equality:
//!
//! ```text
//! SL - PL - NL + PG = DT
//! ```
//!
//! so the largest tolerable loss is `PL = SL - NL - DT + PG`. With a geometric
//! spreading law `PL = a·log10(r)` the range follows as `r = 10^(PL/a)`.

use std::f64::consts::PI;

use crate::config::ActiveSpaceParams;
use crate::constants::METRES_PER_KM;

/// Propagation loss tolerated at the maximum detection range (dB)
pub fn propagation_loss(
    source_level: f64,
    noise_level: f64,
    detection_threshold: f64,
    processing_gain: f64,
) -> f64 {
    source_level - noise_level - detection_threshold + processing_gain
}

/// Invert `PL = a·log10(r)` for `r` in metres.
pub fn max_detection_range_m(propagation_loss_db: f64, geometric_spreading: f64) -> f64 {
    10f64.powf(propagation_loss_db / geometric_spreading)
}

/// Area of the disc of radius `range_km`
pub fn active_space_area_km2(range_km: f64) -> f64 {
    PI * range_km * range_km
}

/// Evaluated active space for one set of inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveSpace {
    /// Propagation loss at maximum range in dB re 1 µPa
    pub propagation_loss_db: f64,
    /// Geometric spreading coefficient used for the range
    pub geometric_spreading: f64,
    /// Maximum detection range in metres
    pub max_range_m: f64,
    /// Maximum detection range in kilometres
    pub max_range_km: f64,
    /// Area of the active space in km²
    pub area_km2: f64,
}

impl ActiveSpace {
    pub fn evaluate(params: &ActiveSpaceParams) -> Self {
        let propagation_loss_db = propagation_loss(
            params.source_level,
            params.noise_level,
            params.detection_threshold,
            params.processing_gain,
        );
        let max_range_m = max_detection_range_m(propagation_loss_db, params.geometric_spreading);
        let max_range_km = max_range_m / METRES_PER_KM;

        log::debug!(
            "Active space: PL={} dB, spreading={}, r_max={:.1} m",
            propagation_loss_db,
            params.geometric_spreading,
            max_range_m
        );

        Self {
            propagation_loss_db,
            geometric_spreading: params.geometric_spreading,
            max_range_m,
            max_range_km,
            area_km2: active_space_area_km2(max_range_km),
        }
    }

    /// Closed polygon approximating the active-space boundary in km,
    /// centred on the source. The first point is repeated at the end.
    pub fn outline_km(&self, segments: usize) -> Vec<[f64; 2]> {
        let segments = segments.max(3);
        (0..=segments)
            .map(|i| {
                let theta = 2.0 * PI * i as f64 / segments as f64;
                [
                    self.max_range_km * theta.cos(),
                    self.max_range_km * theta.sin(),
                ]
            })
            .collect()
    }
}

//! Active space as a function of one input.
//!
//! Answers questions such as "how does the active space change when the
//! noise level increases?" by evaluating every grid value of a control while
//! holding the other inputs fixed.

use crate::config::{ActiveSpaceInput, ActiveSpaceParams};
use crate::sonar::ActiveSpace;

/// One evaluated point of a sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    /// Value of the swept input
    pub value: f64,
    pub active_space: ActiveSpace,
}

/// Evaluate the active space at every value the `input` control can take.
pub fn sweep(params: &ActiveSpaceParams, input: ActiveSpaceInput) -> Vec<SweepPoint> {
    let slider = input.slider();
    log::info!(
        "Sweeping {} over {}..={} step {}",
        slider.label,
        slider.min,
        slider.max,
        slider.step
    );

    slider
        .values()
        .map(|value| {
            let mut p = *params;
            p.set(input, value);
            SweepPoint {
                value,
                active_space: ActiveSpace::evaluate(&p),
            }
        })
        .collect()
}

/// Sweep the ambient noise level
pub fn noise_sweep(params: &ActiveSpaceParams) -> Vec<SweepPoint> {
    sweep(params, ActiveSpaceInput::NoiseLevel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_noise_sweep_rows() {
        let rows = noise_sweep(&ActiveSpaceParams::default());
        assert_eq!(rows.len(), 13);
        assert_eq!(rows[0].value, 75.0);
        assert_eq!(rows[12].value, 99.0);
        assert_eq!(rows[0].active_space.propagation_loss_db, 60.0);
        assert_relative_eq!(
            rows[0].active_space.max_range_km,
            1000.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_noise_sweep_monotonic() {
        let rows = noise_sweep(&ActiveSpaceParams::default());
        for pair in rows.windows(2) {
            let (a, b) = (&pair[0].active_space, &pair[1].active_space);
            assert!(b.propagation_loss_db < a.propagation_loss_db);
            assert!(b.max_range_m < a.max_range_m);
            assert!(b.area_km2 < a.area_km2);
        }
    }

    #[test]
    fn test_sweep_keeps_other_inputs() {
        let params = ActiveSpaceParams {
            source_level: 180.0,
            ..Default::default()
        };
        let rows = sweep(&params, ActiveSpaceInput::GeometricSpreading);
        assert_eq!(rows.len(), 3);
        for row in &rows {
            assert_eq!(row.active_space.propagation_loss_db, 65.0);
            assert_eq!(row.active_space.geometric_spreading, row.value);
        }
    }
}

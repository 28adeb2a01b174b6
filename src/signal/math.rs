use std::f64::consts::PI;

use crate::constants::{CYLINDRICAL_SPREADING, REFERENCE_PRESSURE_PA};

/// Convert a level in dB re 1 µPa to a pressure amplitude in Pa
pub fn db_to_pressure(level_db: f64) -> f64 {
    REFERENCE_PRESSURE_PA * 10f64.powf(level_db / 20.0)
}

/// Convert a pressure in Pa to dB re 1 µPa.
///
/// Uses the magnitude, so negative half-cycles map to the same level. A zero
/// pressure yields negative infinity.
pub fn pressure_to_db(pressure_pa: f64) -> f64 {
    20.0 * (pressure_pa.abs() / REFERENCE_PRESSURE_PA).log10()
}

/// Transmission loss for cylindrical spreading, `10·log10(r)` dB
pub fn cylindrical_transmission_loss(distance_m: f64) -> f64 {
    CYLINDRICAL_SPREADING * distance_m.log10()
}

/// Linear factor applied to the source waveform for a given loss
pub fn attenuation_factor(transmission_loss_db: f64) -> f64 {
    10f64.powf(-transmission_loss_db / 10.0)
}

/// `count` evenly spaced values over `[start, end]`, both ends included
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        start + i as f64 * step
                    }
                })
                .collect()
        }
    }
}

/// Sample `amplitude · sin(2π f t)` at each time in `time`
pub fn sine_wave(amplitude: f64, frequency_hz: f64, time: &[f64]) -> Vec<f64> {
    let omega = 2.0 * PI * frequency_hz;
    time.iter().map(|&t| amplitude * (omega * t).sin()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_db_to_pressure() {
        assert_relative_eq!(db_to_pressure(0.0), 1e-6);
        assert_relative_eq!(db_to_pressure(120.0), 1.0, max_relative = 1e-12);
        assert_relative_eq!(
            db_to_pressure(189.0),
            2818.382_931_264_449,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_pressure_to_db_inverts() {
        for level in [40.0, 100.0, 189.0] {
            assert_relative_eq!(pressure_to_db(db_to_pressure(level)), level, epsilon = 1e-9);
            assert_relative_eq!(
                pressure_to_db(-db_to_pressure(level)),
                level,
                epsilon = 1e-9
            );
        }
        assert_eq!(pressure_to_db(0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_transmission_loss() {
        assert_eq!(cylindrical_transmission_loss(1.0), 0.0);
        assert_relative_eq!(cylindrical_transmission_loss(10.0), 10.0);
        assert_relative_eq!(cylindrical_transmission_loss(10000.0), 40.0);
    }

    #[test]
    fn test_attenuation_factor() {
        assert_eq!(attenuation_factor(0.0), 1.0);
        assert_relative_eq!(attenuation_factor(10.0), 0.1, max_relative = 1e-15);
        assert_relative_eq!(attenuation_factor(40.0), 1e-4, max_relative = 1e-12);
    }

    #[test]
    fn test_linspace() {
        let t = linspace(0.0, 1.0, 5);
        assert_eq!(t, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);

        let t = linspace(0.0, 1.0, 10_000);
        assert_eq!(t.len(), 10_000);
        assert_eq!(t[0], 0.0);
        assert_eq!(t[9_999], 1.0);
    }

    #[test]
    fn test_sine_wave_quarter_period() {
        // 1 Hz sampled at quarter periods
        let y = sine_wave(2.0, 1.0, &[0.0, 0.25, 0.5, 0.75]);
        assert_relative_eq!(y[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(y[1], 2.0, epsilon = 1e-12);
        assert_relative_eq!(y[2], 0.0, epsilon = 1e-12);
        assert_relative_eq!(y[3], -2.0, epsilon = 1e-12);
    }
}

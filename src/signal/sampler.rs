use rolling_stats::Stats;

use crate::config::AttenuationParams;
use crate::constants::{FIN_WHALE_SOURCE_LEVEL_DB, SAMPLE_COUNT, SAMPLE_WINDOW_SECS};

use super::math::{
    attenuation_factor, cylindrical_transmission_loss, db_to_pressure, linspace, pressure_to_db,
    sine_wave,
};

/// Source and received waveforms for the wave-attenuation demo
///
/// All sample vectors share the length of `time`.
#[derive(Debug, Clone)]
pub struct AttenuationTrace {
    pub frequency_hz: f64,
    pub distance_m: f64,
    /// Source level in dB re 1 µPa @ 1 m
    pub source_level_db: f64,
    /// Peak pressure of the source waveform in Pa
    pub amplitude_pa: f64,
    pub transmission_loss_db: f64,
    /// Linear scale from source to received waveform
    pub attenuation_factor: f64,
    /// Sample times in seconds
    pub time: Vec<f64>,
    /// Source pressure in Pa
    pub source: Vec<f64>,
    /// Received pressure in Pa
    pub received: Vec<f64>,
    /// Source level per sample in dB re 1 µPa
    pub source_db: Vec<f64>,
    /// Received level per sample in dB re 1 µPa
    pub received_db: Vec<f64>,
}

impl AttenuationTrace {
    /// Sample the fin whale source over the standard one-second window.
    pub fn simulate(params: &AttenuationParams) -> Self {
        Self::simulate_with(
            params,
            FIN_WHALE_SOURCE_LEVEL_DB,
            SAMPLE_WINDOW_SECS,
            SAMPLE_COUNT,
        )
    }

    pub fn simulate_with(
        params: &AttenuationParams,
        source_level_db: f64,
        window_secs: f64,
        sample_count: usize,
    ) -> Self {
        let amplitude_pa = db_to_pressure(source_level_db);
        let time = linspace(0.0, window_secs, sample_count);
        let source = sine_wave(amplitude_pa, params.frequency_hz, &time);

        let transmission_loss_db = cylindrical_transmission_loss(params.distance_m);
        let factor = attenuation_factor(transmission_loss_db);
        let received: Vec<f64> = source.iter().map(|&y| y * factor).collect();

        let source_db = source.iter().map(|&y| pressure_to_db(y)).collect();
        let received_db = received.iter().map(|&y| pressure_to_db(y)).collect();

        log::debug!(
            "Attenuation: f={} Hz, r={} m, TL={:.2} dB, factor={:.3e}",
            params.frequency_hz,
            params.distance_m,
            transmission_loss_db,
            factor
        );

        Self {
            frequency_hz: params.frequency_hz,
            distance_m: params.distance_m,
            source_level_db,
            amplitude_pa,
            transmission_loss_db,
            attenuation_factor: factor,
            time,
            source,
            received,
            source_db,
            received_db,
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn source_summary(&self) -> Option<WaveformSummary> {
        WaveformSummary::from_samples(&self.source)
    }

    pub fn received_summary(&self) -> Option<WaveformSummary> {
        WaveformSummary::from_samples(&self.received)
    }
}

/// Amplitude statistics of a sampled waveform in Pa
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct WaveformSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Standard deviation; the RMS pressure of a zero-mean waveform
    pub std_dev: f64,
}

impl WaveformSummary {
    /// Summarise a waveform; `None` when there are no samples.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        let mut stats: Stats<f64> = Stats::new();
        for &s in samples {
            stats.update(s);
        }
        if stats.count == 0 {
            return None;
        }
        Some(Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean,
            std_dev: stats.std_dev,
        })
    }

    pub fn peak(&self) -> f64 {
        self.min.abs().max(self.max.abs())
    }

    /// Peak level in dB re 1 µPa
    pub fn peak_db(&self) -> f64 {
        pressure_to_db(self.peak())
    }
}

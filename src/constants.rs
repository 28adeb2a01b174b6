//! Physical and presentation constants shared by the demos.

/// Reference pressure for underwater decibels: 1 µPa expressed in Pa.
pub const REFERENCE_PRESSURE_PA: f64 = 1e-6;

/// Source level used by the attenuation demo, representative of fin whale
/// calls (dB re 1 µPa @ 1 m).
pub const FIN_WHALE_SOURCE_LEVEL_DB: f64 = 189.0;

/// Number of points in the attenuation demo's time axis.
pub const SAMPLE_COUNT: usize = 10_000;

/// Length of the attenuation demo's time window in seconds.
pub const SAMPLE_WINDOW_SECS: f64 = 1.0;

/// Geometric spreading coefficient for cylindrical spreading (`10·log10(r)`).
pub const CYLINDRICAL_SPREADING: f64 = 10.0;

/// Geometric spreading coefficient for spherical spreading (`20·log10(r)`).
pub const SPHERICAL_SPREADING: f64 = 20.0;

/// Half-width of the square active-space plot, in km.
pub const ACTIVE_SPACE_PLOT_EXTENT_KM: f64 = 500.0;

/// Fixed y range of the decibel waveform chart (dB re 1 µPa).
pub const DB_PLOT_RANGE: (f64, f64) = (40.0, 200.0);

pub const METRES_PER_KM: f64 = 1000.0;

pub mod math;
pub mod sampler;

pub use math::{
    attenuation_factor, cylindrical_transmission_loss, db_to_pressure, linspace, pressure_to_db,
    sine_wave,
};
pub use sampler::{AttenuationTrace, WaveformSummary};

use std::path::Path;

use hound::{WavSpec, WavWriter};

use crate::error::{Result, SonarError};
use crate::signal::AttenuationTrace;

/// Sample rate implied by the trace's time axis, in Hz
pub fn trace_sample_rate(trace: &AttenuationTrace) -> Result<u32> {
    let window = match (trace.time.first(), trace.time.last()) {
        (Some(first), Some(last)) if last > first => last - first,
        _ => {
            return Err(SonarError::Config(
                "trace needs at least two distinct sample times".to_string(),
            ));
        }
    };
    Ok(((trace.len() - 1) as f64 / window).round() as u32)
}

/// Write a trace as stereo 32-bit float WAV: left = source, right = received.
///
/// Both channels are divided by the source amplitude so the source peaks at
/// full scale and the received channel keeps its relative level.
pub fn save_trace_wav(path: &Path, trace: &AttenuationTrace) -> Result<()> {
    let spec = WavSpec {
        channels: 2,
        sample_rate: trace_sample_rate(trace)?,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let scale = if trace.amplitude_pa > 0.0 {
        1.0 / trace.amplitude_pa
    } else {
        1.0
    };

    let mut writer = WavWriter::create(path, spec)?;
    for (&source, &received) in trace.source.iter().zip(&trace.received) {
        writer.write_sample((source * scale) as f32)?;
        writer.write_sample((received * scale) as f32)?;
    }
    writer.finalize()?;

    log::info!(
        "Wrote {} frames at {} Hz to {}",
        trace.len(),
        spec.sample_rate,
        path.display()
    );
    Ok(())
}

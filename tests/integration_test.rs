use std::sync::{Arc, Mutex};

use approx::assert_relative_eq;

use sonarlab::config::{
    ActiveSpaceInput, AttenuationInput, AttenuationParams, Control, Demo, Scenario,
};
use sonarlab::output::{Formatter, TextFormatter};
use sonarlab::session::{Evaluation, Session, evaluate};
use sonarlab::signal::AttenuationTrace;
use sonarlab::sweep::noise_sweep;

#[test]
fn test_active_space_default_scenario() {
    let Evaluation::ActiveSpace(space) = evaluate(&Scenario::default(), Demo::ActiveSpace) else {
        panic!("expected active space evaluation");
    };

    assert_eq!(space.propagation_loss_db, 50.0);
    assert_relative_eq!(space.max_range_m, 100_000.0, max_relative = 1e-12);
    assert_eq!(
        TextFormatter::new(false).active_space(&space),
        "PL = 50 dB re. 1µPa\nDetection range = 100.0 km, Active space = 31415.93 km^2"
    );
}

#[test]
fn test_source_level_default_scenario() {
    let Evaluation::SourceLevel(result) = evaluate(&Scenario::default(), Demo::SourceLevel) else {
        panic!("expected source level evaluation");
    };
    assert_eq!(result.source_level_db, 127.0);
}

#[test]
fn test_attenuation_twenty_hertz_ten_metres() {
    let trace = AttenuationTrace::simulate(&AttenuationParams {
        frequency_hz: 20.0,
        distance_m: 10.0,
    });

    assert_eq!(trace.time.len(), 10_000);
    assert_eq!(trace.source.len(), 10_000);
    assert_eq!(trace.received.len(), 10_000);
    assert_relative_eq!(trace.transmission_loss_db, 10.0);
    assert_relative_eq!(trace.amplitude_pa, 1e-6 * 10f64.powf(189.0 / 20.0));

    for (s, r) in trace.source.iter().zip(&trace.received) {
        assert_relative_eq!(*r, s * 0.1, max_relative = 1e-12);
    }
}

#[test]
fn test_attenuation_over_distance_grid() {
    let distance = AttenuationInput::Distance.slider();
    for distance_m in distance.values().step_by(97) {
        let trace = AttenuationTrace::simulate(&AttenuationParams {
            frequency_hz: 100.0,
            distance_m,
        });
        assert!(trace.transmission_loss_db >= 0.0);
        assert_eq!(trace.received.len(), trace.time.len());
        let source = trace.source_summary().unwrap();
        let received = trace.received_summary().unwrap();
        assert!(received.peak() <= source.peak());
    }
}

#[test]
fn test_session_drives_observer() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut session = Session::default();
    let sink = Arc::clone(&seen);
    session.subscribe(move |evaluation| {
        if let Evaluation::ActiveSpace(space) = evaluation {
            sink.lock().unwrap().push(space.max_range_km);
        }
    });

    // Raising the noise level shrinks the range
    let noise = Control::ActiveSpace(ActiveSpaceInput::NoiseLevel);
    session.set(noise, 87.0);
    session.set(noise, 95.0);

    let ranges = seen.lock().unwrap();
    assert_eq!(ranges.len(), 2);
    assert!(ranges[1] < ranges[0]);
    assert_relative_eq!(ranges[1], 10.0, max_relative = 1e-12);
}

#[test]
fn test_noise_sweep_matches_individual_evaluations() {
    let scenario = Scenario::default();
    for point in noise_sweep(&scenario.active_space) {
        let mut s = scenario;
        s.active_space.noise_level = point.value;
        let Evaluation::ActiveSpace(space) = evaluate(&s, Demo::ActiveSpace) else {
            panic!("expected active space evaluation");
        };
        assert_eq!(space, point.active_space);
    }
}

#[test]
fn test_scenario_file_round_trip() {
    let path =
        std::env::temp_dir().join(format!("sonarlab_scenario_{}.toml", std::process::id()));
    let text = "[source_level]
transmission_loss = 65
processing_gain = 4
detection_threshold = 0
noise_level = 60
";
    std::fs::write(&path, text).unwrap();

    let scenario = Scenario::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let Evaluation::SourceLevel(result) = evaluate(&scenario, Demo::SourceLevel) else {
        panic!("expected source level evaluation");
    };
    assert_eq!(result.source_level_db, 121.0);
}

#[test]
fn test_wav_export() {
    let trace = AttenuationTrace::simulate(&AttenuationParams {
        frequency_hz: 20.0,
        distance_m: 10.0,
    });
    let path =
        std::env::temp_dir().join(format!("sonarlab_trace_{}.wav", std::process::id()));
    sonarlab::save_trace_wav(&path, &trace).unwrap();

    let mut reader = hound::WavReader::open(&path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 9999);

    let samples: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
    std::fs::remove_file(&path).ok();

    assert_eq!(samples.len(), 2 * 10_000);
    let peak = |channel: usize| {
        samples
            .iter()
            .skip(channel)
            .step_by(2)
            .fold(0.0f32, |a, &b| a.max(b.abs()))
    };
    let (left_peak, right_peak) = (peak(0), peak(1));
    assert!(left_peak <= 1.0 && left_peak > 0.99);
    assert!((right_peak - 0.1 * left_peak).abs() < 1e-4);
}

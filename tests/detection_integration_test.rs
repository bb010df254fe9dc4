//! Integration tests for the public detection API
//!
//! These tests drive `VoiceDetector` the way an embedding application would:
//! - Configuration loaded from a JSON file
//! - Custom threshold estimators (closures and built-ins)
//! - Segment timing derived from hop size and sample rate

use std::fs;

use voice_segmenter::analysis::threshold::{FixedThreshold, PercentileThreshold};
use voice_segmenter::fixtures::SyntheticSignal;
use voice_segmenter::{AppConfig, DetectionConfig, ThresholdConfig, VoiceDetector};

const SAMPLE_RATE: u32 = 16_000;

fn tone_signal() -> Vec<f32> {
    SyntheticSignal::new(SAMPLE_RATE, 42)
        .noise_floor(0.01)
        .silence(60 * 90)
        .sine(160 * 90, 200.0, 0.5)
        .pad_to(299 * 90 + 256)
        .build()
}

/// Test that the documented short-burst scenario produces nothing
#[test]
fn test_short_burst_is_rejected() {
    let signal = SyntheticSignal::new(SAMPLE_RATE, 1)
        .silence(10_000)
        .burst(3_000..3_200, 0.8)
        .build();

    let segments = VoiceDetector::new()
        .detect(&signal, 10_000, SAMPLE_RATE)
        .expect("valid input");
    assert!(segments.is_empty());
}

/// Test that a file-loaded configuration drives the pass
#[test]
fn test_config_file_overrides() {
    let path = std::env::temp_dir().join(format!(
        "voice_segmenter_integration_{}.json",
        std::process::id()
    ));
    fs::write(
        &path,
        r#"{
            "detection": { "min_silence": 20 },
            "threshold": { "kind": "fixed", "value": 25.0 }
        }"#,
    )
    .expect("write config");
    let config = AppConfig::load_from_file(&path);
    let _ = fs::remove_file(&path);

    assert_eq!(config.detection.min_silence, 20);
    assert_eq!(config.detection.min_voice, 100);
    assert_eq!(config.threshold, ThresholdConfig::Fixed { value: 25.0 });

    // Voice frames 60..=217; the run closes after 20 gap frames and loses 10.
    let segments = VoiceDetector::from_app_config(&config)
        .detect_buffer(&tone_signal(), SAMPLE_RATE)
        .expect("valid input");
    assert_eq!(segments.len(), 1, "got {:?}", segments);
    assert_eq!(segments[0].end_frame, 225);
}

/// Test that raising min_voice above the run length discards the segment
#[test]
fn test_min_voice_discards_long_run() {
    let config = DetectionConfig {
        min_voice: 250,
        ..DetectionConfig::default()
    };
    let segments = VoiceDetector::with_config(config, FixedThreshold(25.0))
        .detect_buffer(&tone_signal(), SAMPLE_RATE)
        .expect("valid input");
    assert!(segments.is_empty(), "got {:?}", segments);
}

/// Test that a closure works as a threshold estimator
#[test]
fn test_closure_estimator() {
    let half_peak = |energy: &[f64], _zcr: &[u32]| energy.iter().cloned().fold(0.0, f64::max) * 0.5;

    let segments = VoiceDetector::with_config(DetectionConfig::default(), half_peak)
        .detect_buffer(&tone_signal(), SAMPLE_RATE)
        .expect("valid input");

    assert_eq!(segments.len(), 1, "got {:?}", segments);
    assert!(
        (238..=243).contains(&segments[0].end_frame),
        "end {}",
        segments[0].end_frame
    );
}

/// Test that the 100th percentile leaves no frame strictly above threshold
#[test]
fn test_percentile_estimator_at_peak() {
    let detector = VoiceDetector::with_config(
        DetectionConfig::default(),
        PercentileThreshold::new(100.0),
    );
    let report = detector
        .analyze(&tone_signal(), 299 * 90 + 256, SAMPLE_RATE)
        .expect("valid input");

    let peak = report.features.energy.iter().cloned().fold(0.0, f64::max);
    assert_eq!(report.threshold, peak);
    assert!(report.segments.is_empty(), "got {:?}", report.segments);
}

/// Test that duration and velocity follow from hop, sample rate and energy
#[test]
fn test_segment_timing_and_velocity() {
    let detector = VoiceDetector::with_config(DetectionConfig::default(), FixedThreshold(25.0));
    let report = detector
        .analyze(&tone_signal(), 299 * 90 + 256, SAMPLE_RATE)
        .expect("valid input");

    let segment = report.segments[0];
    let span = segment.end_frame - segment.start_frame;
    assert_eq!(segment.duration_secs, (span * 90) as f32 / SAMPLE_RATE as f32);

    let energy = &report.features.energy[segment.start_frame..segment.end_frame];
    let mean = energy.iter().sum::<f64>() / energy.len() as f64;
    assert!((segment.velocity - mean).abs() < 1e-9);
}

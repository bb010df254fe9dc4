//! Fixture utilities for the deterministic CLI harness.
//!
//! This module loads mono PCM WAV input, parses optional expectation JSON
//! describing the segments a fixture should produce, and compares detector
//! output against it. Synthetic signal generation for tests lives in
//! [`synthetic`].

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::SpeechSegment;

pub mod synthetic;

pub use synthetic::SyntheticSignal;

/// JSON expectation schema for fixture verification.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureExpectations {
    #[serde(default)]
    pub fixture: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub segments: Vec<ExpectedSegment>,
}

/// Expected segment definition, in frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedSegment {
    pub start_frame: usize,
    pub end_frame: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance_frames: usize,
}

fn default_tolerance() -> usize {
    2
}

impl FixtureExpectations {
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading expectation {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn verify(&self, actual: &[SpeechSegment]) -> std::result::Result<(), ExpectationDiff> {
        let mut failures = Vec::new();

        for (idx, expected) in self.segments.iter().enumerate() {
            match actual.get(idx) {
                Some(segment) => {
                    let start_delta = segment.start_frame.abs_diff(expected.start_frame);
                    let end_delta = segment.end_frame.abs_diff(expected.end_frame);
                    if start_delta > expected.tolerance_frames
                        || end_delta > expected.tolerance_frames
                    {
                        failures.push(ExpectationFailure {
                            index: idx,
                            expected: Some(expected.clone()),
                            actual: Some(*segment),
                        });
                    }
                }
                None => failures.push(ExpectationFailure {
                    index: idx,
                    expected: Some(expected.clone()),
                    actual: None,
                }),
            }
        }

        for (idx, segment) in actual.iter().enumerate().skip(self.segments.len()) {
            failures.push(ExpectationFailure {
                index: idx,
                expected: None,
                actual: Some(*segment),
            });
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ExpectationDiff { failures })
        }
    }
}

/// Outcome of comparing actual segments with expectations.
#[derive(Debug)]
pub struct ExpectationDiff {
    pub failures: Vec<ExpectationFailure>,
}

impl ExpectationDiff {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "failures": self.failures.iter().map(|failure| {
                serde_json::json!({
                    "index": failure.index,
                    "expected": failure.expected,
                    "actual": failure.actual,
                })
            }).collect::<Vec<_>>()
        })
    }
}

/// Detailed diff entry for a single failure.
#[derive(Debug)]
pub struct ExpectationFailure {
    pub index: usize,
    pub expected: Option<ExpectedSegment>,
    pub actual: Option<SpeechSegment>,
}

/// Decode a mono WAV file into `f32` samples in [-1, 1].
///
/// Integer PCM is scaled by the format's full-scale value; float WAV is
/// passed through. Multi-channel files are rejected.
pub fn read_wav(path: &Path) -> Result<(Vec<f32>, u32)> {
    let mut reader =
        hound::WavReader::open(path).with_context(|| format!("opening {}", path.display()))?;
    let spec = reader.spec();
    if spec.channels != 1 {
        return Err(anyhow!(
            "{} must be mono (found {} channels)",
            path.display(),
            spec.channels
        ));
    }

    let sample_rate = spec.sample_rate;

    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|sample| sample.map_err(|err| anyhow!(err)))
            .collect::<Result<Vec<f32>>>()?,
        hound::SampleFormat::Int => {
            let max = (1i64 << (spec.bits_per_sample - 1)) - 1;
            match spec.bits_per_sample {
                8 | 16 => reader
                    .samples::<i16>()
                    .map(|sample| {
                        sample
                            .map(|value| value as f32 / max as f32)
                            .map_err(|err| anyhow!(err))
                    })
                    .collect::<Result<Vec<f32>>>()?,
                24 | 32 => reader
                    .samples::<i32>()
                    .map(|sample| {
                        sample
                            .map(|value| value as f32 / max as f32)
                            .map_err(|err| anyhow!(err))
                    })
                    .collect::<Result<Vec<f32>>>()?,
                other => {
                    return Err(anyhow!(
                        "Unsupported bits per sample {} in {}",
                        other,
                        path.display()
                    ))
                }
            }
        }
    };

    Ok((samples, sample_rate))
}

/// Write mono `f32` samples as a 32-bit float WAV file.
pub fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer =
        hound::WavWriter::create(path, spec).with_context(|| format!("creating {}", path.display()))?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer
        .finalize()
        .with_context(|| format!("finalizing {}", path.display()))?;
    Ok(())
}

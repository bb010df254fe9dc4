//! Configuration management for detection parameter tuning
//!
//! This module provides runtime configuration loading from JSON files,
//! so framing, hysteresis and threshold estimation can be adjusted
//! without recompilation. Missing or malformed files fall back to the
//! compiled-in defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::analysis::threshold::{
    FixedThreshold, MeanStdThreshold, PercentileThreshold, ThresholdEstimator,
};
use crate::error::DetectionError;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub threshold: ThresholdConfig,
}

/// Framing and hysteresis parameters for the segment detector
///
/// There is no energy threshold here: it is produced by a
/// [`ThresholdEstimator`] on every detection call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Frame length in samples
    pub win_size: usize,
    /// Stride between consecutive frame starts, in samples
    pub hop: usize,
    /// Frames with fewer qualifying zero crossings count as "maybe voice"
    pub zcr_threshold: u32,
    /// Non-voice frames (cumulative since the segment opened) that close it
    pub min_silence: usize,
    /// Minimum run length (frames) for a segment to be kept
    pub min_voice: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            win_size: 256,
            hop: 90,
            zcr_threshold: 10,
            min_silence: 50,
            min_voice: 100,
        }
    }
}

impl DetectionConfig {
    /// Check the parameters before any frame is touched
    ///
    /// Besides non-zero framing, this rejects hysteresis settings whose
    /// trailing-silence correction could shrink a finished segment to zero
    /// frames: a closed run is at least `max(min_voice, min_silence)` long
    /// and loses `min_silence / 2` frames, which must leave two or more.
    pub fn validate(&self) -> Result<(), DetectionError> {
        if self.win_size == 0 {
            return Err(DetectionError::InvalidConfig {
                reason: "win_size must be > 0".to_string(),
            });
        }
        if self.hop == 0 {
            return Err(DetectionError::InvalidConfig {
                reason: "hop must be > 0".to_string(),
            });
        }

        let shortest_run = self.min_voice.max(self.min_silence.max(1));
        if shortest_run.saturating_sub(self.min_silence / 2) < 2 {
            return Err(DetectionError::InvalidConfig {
                reason: format!(
                    "min_voice {} with min_silence {} can produce empty segments",
                    self.min_voice, self.min_silence
                ),
            });
        }

        Ok(())
    }
}

/// Selects the energy threshold estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThresholdConfig {
    /// `mean(energy) + k * stddev(energy)`
    MeanStd { k: f64 },
    /// Nearest-rank percentile of the frame energies (0-100)
    Percentile { percentile: f64 },
    /// Constant threshold, e.g. from an offline calibration
    Fixed { value: f64 },
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        ThresholdConfig::MeanStd { k: 0.5 }
    }
}

impl ThresholdConfig {
    pub fn build(&self) -> Box<dyn ThresholdEstimator> {
        match *self {
            ThresholdConfig::MeanStd { k } => Box::new(MeanStdThreshold::new(k)),
            ThresholdConfig::Percentile { percentile } => {
                Box::new(PercentileThreshold::new(percentile))
            }
            ThresholdConfig::Fixed { value } => Box::new(FixedThreshold(value)),
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The parsed configuration, or the defaults if the file doesn't exist
    /// or the JSON is invalid (a warning is logged in both cases)
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.detection.win_size, 256);
        assert_eq!(config.detection.hop, 90);
        assert_eq!(config.detection.zcr_threshold, 10);
        assert_eq!(config.detection.min_silence, 50);
        assert_eq!(config.detection.min_voice, 100);
        assert_eq!(config.threshold, ThresholdConfig::MeanStd { k: 0.5 });
        assert!(config.detection.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AppConfig {
            detection: DetectionConfig {
                hop: 128,
                ..DetectionConfig::default()
            },
            threshold: ThresholdConfig::Percentile { percentile: 80.0 },
        };
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.detection, config.detection);
        assert_eq!(parsed.threshold, config.threshold);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let parsed: AppConfig =
            serde_json::from_str(r#"{ "detection": { "min_voice": 40 } }"#).unwrap();
        assert_eq!(parsed.detection.min_voice, 40);
        assert_eq!(parsed.detection.win_size, 256);
        assert_eq!(parsed.threshold, ThresholdConfig::default());
    }

    #[test]
    fn test_threshold_kind_tag() {
        let parsed: ThresholdConfig =
            serde_json::from_str(r#"{ "kind": "fixed", "value": 3.5 }"#).unwrap();
        assert_eq!(parsed, ThresholdConfig::Fixed { value: 3.5 });
        assert_eq!(parsed.build().estimate(&[1.0, 100.0], &[0, 0]), 3.5);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_from_file("/nonexistent/voice_segmenter.json");
        assert_eq!(config.detection, DetectionConfig::default());
    }

    #[test]
    fn test_validate_rejects_zero_framing() {
        let config = DetectionConfig {
            hop: 0,
            ..DetectionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DetectionError::InvalidConfig { .. })
        ));

        let config = DetectionConfig {
            win_size: 0,
            ..DetectionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_degenerate_hysteresis() {
        // A single tolerated gap frame with min_voice 1 closes one-frame runs.
        let config = DetectionConfig {
            min_silence: 1,
            min_voice: 1,
            ..DetectionConfig::default()
        };
        assert!(config.validate().is_err());

        let config = DetectionConfig {
            min_silence: 4,
            min_voice: 3,
            ..DetectionConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}

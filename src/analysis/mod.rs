// Analysis module - offline voice segmentation pipeline
//
// This module finds voiced segments in a fully buffered mono signal and
// reports each segment's frame span, duration and mean energy.
//
// Architecture:
// - VoiceDetector: validates the call and runs one complete pass
// - Pipeline: Framer → FeatureExtractor → ThresholdEstimator
//             → SegmentDetector → Summarizer
// - Output: Vec<SpeechSegment> in increasing start-frame order
//
// The detector owns configuration only. Features, threshold and state
// machine counters are created inside each call, so a single VoiceDetector
// can be shared across threads.

use serde::Serialize;

use crate::config::{AppConfig, DetectionConfig};
use crate::error::{log_detection_error, DetectionError};

pub mod features;
pub mod framer;
pub mod segmenter;
pub mod summarizer;
pub mod threshold;

use features::{FeatureExtractor, FrameFeatures};
use segmenter::SegmentDetector;
use threshold::{MeanStdThreshold, ThresholdEstimator};

pub use summarizer::SpeechSegment;

/// Everything one detection pass produced
///
/// Returned by [`VoiceDetector::analyze`] for diagnostics; `detect` keeps
/// only the segments.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionReport {
    pub frame_count: usize,
    /// Energy threshold the estimator produced for this pass
    pub threshold: f64,
    pub features: FrameFeatures,
    pub segments: Vec<SpeechSegment>,
}

/// Voice segment detector for pre-loaded mono buffers
pub struct VoiceDetector {
    config: DetectionConfig,
    estimator: Box<dyn ThresholdEstimator>,
}

impl Default for VoiceDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl VoiceDetector {
    /// Detector with default framing/hysteresis and a mean + 0.5·stddev
    /// energy threshold
    pub fn new() -> Self {
        Self::with_config(DetectionConfig::default(), MeanStdThreshold::default())
    }

    /// Create a detector with explicit configuration and threshold estimator
    pub fn with_config<E>(config: DetectionConfig, estimator: E) -> Self
    where
        E: ThresholdEstimator + 'static,
    {
        Self {
            config,
            estimator: Box::new(estimator),
        }
    }

    /// Create a detector from a loaded [`AppConfig`]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            config: config.detection,
            estimator: config.threshold.build(),
        }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Detect speech segments in the first `sample_count` samples of `buffer`
    ///
    /// # Arguments
    /// * `buffer` - Mono samples
    /// * `sample_count` - Number of leading samples to analyse (>= win_size)
    /// * `sample_rate` - Sample rate in Hz (> 0), used for durations
    ///
    /// # Returns
    /// * `Ok(segments)` - Segments in increasing start-frame order
    /// * `Err(DetectionError)` - Input or configuration rejected before any
    ///   processing
    pub fn detect(
        &self,
        buffer: &[f32],
        sample_count: usize,
        sample_rate: u32,
    ) -> Result<Vec<SpeechSegment>, DetectionError> {
        self.analyze(buffer, sample_count, sample_rate)
            .map(|report| report.segments)
    }

    /// Detect speech segments over the whole buffer
    pub fn detect_buffer(
        &self,
        buffer: &[f32],
        sample_rate: u32,
    ) -> Result<Vec<SpeechSegment>, DetectionError> {
        self.detect(buffer, buffer.len(), sample_rate)
    }

    /// Run a detection pass and keep the intermediate features and threshold
    pub fn analyze(
        &self,
        buffer: &[f32],
        sample_count: usize,
        sample_rate: u32,
    ) -> Result<DetectionReport, DetectionError> {
        let samples = self
            .validate(buffer, sample_count, sample_rate)
            .map_err(|err| {
                log_detection_error(&err, "VoiceDetector::analyze");
                err
            })?;

        let features =
            FeatureExtractor::new(self.config.win_size, self.config.hop).extract(samples);
        let threshold = self.estimator.estimate(&features.energy, &features.zcr);

        let boundaries = SegmentDetector::new(self.config).detect_boundaries(&features, threshold);
        let segments =
            summarizer::summarize(&boundaries, &features.energy, self.config.hop, sample_rate);

        tracing::debug!(
            "[VoiceDetector] {} samples @ {} Hz: {} frames, threshold {:.6}, {} segments",
            samples.len(),
            sample_rate,
            features.frame_count(),
            threshold,
            segments.len()
        );

        Ok(DetectionReport {
            frame_count: features.frame_count(),
            threshold,
            features,
            segments,
        })
    }

    fn validate<'a>(
        &self,
        buffer: &'a [f32],
        sample_count: usize,
        sample_rate: u32,
    ) -> Result<&'a [f32], DetectionError> {
        self.config.validate()?;

        if sample_rate == 0 {
            return Err(DetectionError::InvalidSampleRate { sample_rate });
        }

        if sample_count > buffer.len() {
            return Err(DetectionError::SampleCountOutOfRange {
                sample_count,
                buffer_len: buffer.len(),
            });
        }

        if sample_count < self.config.win_size {
            return Err(DetectionError::BufferTooShort {
                sample_count,
                win_size: self.config.win_size,
            });
        }

        Ok(&buffer[..sample_count])
    }
}

// SegmentDetector - hysteresis state machine over per-frame features
//
// Converts per-frame voice/silence classification into (start, end) frame
// boundaries in a single forward pass, without backtracking.
//
// States:
// - Idle:   no candidate run
// - Maybe:  counting "maybe voice" frames that may prefix a segment
// - Voice:  inside a segment; gaps shorter than min_silence are tolerated
// - Ending: run closed by min_silence non-voice frames; finalized on the
//           next frame
//
// Boundary arithmetic:
// - Entering Voice back-dates the start over the preceding maybe-voice run:
//   start = max(i - voice_run - 1, 1)
// - Finalizing removes half the trailing silence from the run:
//   voice_run -= silence_run / 2, end = start + voice_run - 1
//
// A run still open when the frames run out is dropped, even if it is long
// enough; only runs that pass through Ending are reported.

use std::collections::BTreeMap;

use crate::analysis::features::FrameFeatures;
use crate::config::DetectionConfig;

/// Detector status, numbered as in the classic four-state endpoint detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectorStatus {
    #[default]
    Idle = 0,
    Maybe = 1,
    Voice = 2,
    Ending = 3,
}

/// Classification of a single frame against the call's thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameClass {
    /// Energy above the threshold
    Voice,
    /// Not voice, but ZCR below the ZCR threshold
    MaybeVoice,
    /// Neither
    Silence,
}

/// `energy > threshold`
pub fn is_voice(energy: f64, threshold: f64) -> bool {
    energy > threshold
}

/// `energy > threshold OR zcr < zcr_threshold`
pub fn is_maybe_voice(energy: f64, zcr: u32, threshold: f64, zcr_threshold: u32) -> bool {
    energy > threshold || zcr < zcr_threshold
}

impl FrameClass {
    pub fn classify(energy: f64, zcr: u32, threshold: f64, zcr_threshold: u32) -> Self {
        if is_voice(energy, threshold) {
            FrameClass::Voice
        } else if is_maybe_voice(energy, zcr, threshold, zcr_threshold) {
            FrameClass::MaybeVoice
        } else {
            FrameClass::Silence
        }
    }
}

/// Transient state for one detection pass
///
/// Created fresh for every call and dropped afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetectorState {
    pub status: DetectorStatus,
    /// Frames counted toward the current run (includes tolerated gaps)
    pub voice_run: usize,
    /// Non-voice frames seen since the run entered Voice
    pub silence_run: usize,
    /// First frame of the current segment, valid from Voice onwards
    pub segment_start: usize,
}

impl DetectorState {
    /// Back to Idle with both counters cleared
    fn reset(self) -> Self {
        Self {
            status: DetectorStatus::Idle,
            voice_run: 0,
            silence_run: 0,
            segment_start: self.segment_start,
        }
    }
}

/// Side effect of a single transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Run closed before reaching `min_voice` frames
    Discard { start: usize, voice_run: usize },
    /// Segment finalized
    Emit { start: usize, end: usize },
}

/// Advance the state machine by one frame
///
/// Pure: the result depends only on the arguments.
///
/// # Arguments
/// * `state` - State before frame `frame_index`
/// * `class` - Classification of frame `frame_index`
/// * `frame_index` - Index of the frame being consumed
/// * `config` - Hysteresis parameters (`min_silence`, `min_voice`)
pub fn transition(
    state: DetectorState,
    class: FrameClass,
    frame_index: usize,
    config: &DetectionConfig,
) -> (DetectorState, Effect) {
    match state.status {
        DetectorStatus::Idle | DetectorStatus::Maybe => match class {
            FrameClass::Voice => (
                DetectorState {
                    status: DetectorStatus::Voice,
                    voice_run: state.voice_run + 1,
                    silence_run: 0,
                    segment_start: frame_index.saturating_sub(state.voice_run + 1).max(1),
                },
                Effect::None,
            ),
            FrameClass::MaybeVoice => (
                DetectorState {
                    status: DetectorStatus::Maybe,
                    voice_run: state.voice_run + 1,
                    ..state
                },
                Effect::None,
            ),
            FrameClass::Silence => (
                DetectorState {
                    status: DetectorStatus::Idle,
                    voice_run: 0,
                    ..state
                },
                Effect::None,
            ),
        },
        DetectorStatus::Voice => {
            if class == FrameClass::Voice {
                return (
                    DetectorState {
                        voice_run: state.voice_run + 1,
                        ..state
                    },
                    Effect::None,
                );
            }

            let silence_run = state.silence_run + 1;
            if silence_run < config.min_silence {
                (
                    DetectorState {
                        voice_run: state.voice_run + 1,
                        silence_run,
                        ..state
                    },
                    Effect::None,
                )
            } else if state.voice_run < config.min_voice {
                (
                    state.reset(),
                    Effect::Discard {
                        start: state.segment_start,
                        voice_run: state.voice_run,
                    },
                )
            } else {
                (
                    DetectorState {
                        status: DetectorStatus::Ending,
                        silence_run,
                        ..state
                    },
                    Effect::None,
                )
            }
        }
        // The frame that lands here is consumed by finalization whatever
        // its class.
        DetectorStatus::Ending => {
            let voice_run = state.voice_run.saturating_sub(state.silence_run / 2);
            let end = (state.segment_start + voice_run).saturating_sub(1);
            (
                state.reset(),
                Effect::Emit {
                    start: state.segment_start,
                    end,
                },
            )
        }
    }
}

/// SegmentDetector runs the state machine over a full feature set
///
/// Holds only configuration; all per-pass state lives inside
/// [`SegmentDetector::detect_boundaries`].
#[derive(Debug, Clone, Copy)]
pub struct SegmentDetector {
    config: DetectionConfig,
}

impl SegmentDetector {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// Classify every frame and collect finalized segment boundaries
    ///
    /// # Arguments
    /// * `features` - Per-frame energy and ZCR
    /// * `threshold` - Energy threshold for this pass
    ///
    /// # Returns
    /// `(start_frame, end_frame)` pairs in increasing start order. A later
    /// segment with the same start replaces an earlier one.
    pub fn detect_boundaries(&self, features: &FrameFeatures, threshold: f64) -> Vec<(usize, usize)> {
        let mut boundaries = BTreeMap::new();
        let mut state = DetectorState::default();

        for (i, (&energy, &zcr)) in features.energy.iter().zip(features.zcr.iter()).enumerate() {
            let class = FrameClass::classify(energy, zcr, threshold, self.config.zcr_threshold);
            let (next, effect) = transition(state, class, i, &self.config);

            match effect {
                Effect::Emit { start, end } => {
                    tracing::trace!("[SegmentDetector] frame {}: segment {}..={}", i, start, end);
                    boundaries.insert(start, end);
                }
                Effect::Discard { start, voice_run } => {
                    tracing::trace!(
                        "[SegmentDetector] frame {}: discarded run from {} ({} frames < min_voice {})",
                        i,
                        start,
                        voice_run,
                        self.config.min_voice
                    );
                }
                Effect::None => {}
            }

            state = next;
        }

        if state.status != DetectorStatus::Idle {
            tracing::debug!(
                "[SegmentDetector] dropping open {:?} run at end of buffer ({} frames)",
                state.status,
                state.voice_run
            );
        }

        boundaries.into_iter().collect()
    }
}

#[cfg(test)]
#[path = "segmenter_tests.rs"]
mod tests;

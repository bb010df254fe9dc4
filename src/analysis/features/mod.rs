// FeatureExtractor - per-frame features for voice segmentation
//
// This module turns a sample buffer into two parallel per-frame sequences
// used to separate voiced frames from silence:
//
// 1. Energy: sum of squared samples (loudness cue)
// 2. Zero-Crossing Rate (ZCR): falling sign changes above a noise floor
//    (voicing cue; voiced speech crosses zero slowly)
//
// Module organization:
// - types: Data structures (FrameFeatures)
// - temporal: Time-domain feature functions (ZCR, energy)
// - mod.rs: Coordinator (FeatureExtractor)

mod temporal;
mod types;

pub use temporal::{compute_energy, compute_zcr, ZCR_NOISE_FLOOR};
pub use types::FrameFeatures;

use crate::analysis::framer;

/// FeatureExtractor walks the frames of a buffer and computes features
///
/// Holds only the framing parameters, so one extractor can serve any
/// number of buffers.
#[derive(Debug, Clone, Copy)]
pub struct FeatureExtractor {
    win_size: usize,
    hop: usize,
}

impl FeatureExtractor {
    /// Create a new FeatureExtractor
    ///
    /// # Arguments
    /// * `win_size` - Frame length in samples (> 0)
    /// * `hop` - Stride between frames in samples (> 0)
    pub fn new(win_size: usize, hop: usize) -> Self {
        Self { win_size, hop }
    }

    /// Extract energy and ZCR for every complete frame of `buffer`
    ///
    /// # Returns
    /// FrameFeatures with `framer::frame_count(buffer.len(), win_size, hop)`
    /// entries in each sequence (empty if the buffer is shorter than a frame)
    pub fn extract(&self, buffer: &[f32]) -> FrameFeatures {
        let count = framer::frame_count(buffer.len(), self.win_size, self.hop);
        let mut features = FrameFeatures::with_capacity(count);

        for frame in framer::frames(buffer, self.win_size, self.hop) {
            features.push(compute_energy(frame), compute_zcr(frame));
        }

        features
    }
}

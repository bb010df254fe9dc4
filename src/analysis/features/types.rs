// Types module - Data structures for frame features
//
// This module defines the per-frame feature sequences produced by the
// extraction pipeline and consumed by threshold estimation and segmentation.

use serde::Serialize;

/// Per-frame features for one detection call
///
/// `energy` and `zcr` are parallel sequences indexed by frame number;
/// both always have exactly one entry per frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrameFeatures {
    /// Sum of squared samples over the frame (last sample excluded)
    ///
    /// Loudness cue compared against the per-call energy threshold.
    pub energy: Vec<f64>,

    /// Count of falling zero crossings above the noise floor
    ///
    /// Voicing cue: low counts mark "maybe voice" frames.
    pub zcr: Vec<u32>,
}

impl FrameFeatures {
    pub fn with_capacity(frame_count: usize) -> Self {
        Self {
            energy: Vec::with_capacity(frame_count),
            zcr: Vec::with_capacity(frame_count),
        }
    }

    pub fn push(&mut self, energy: f64, zcr: u32) {
        self.energy.push(energy);
        self.zcr.push(zcr);
    }

    pub fn frame_count(&self) -> usize {
        debug_assert_eq!(self.energy.len(), self.zcr.len());
        self.energy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }
}

// SegmentSummarizer - boundary pairs to reported speech segments
//
// Each (start, end) pair from the segment detector becomes a SpeechSegment
// with its duration in seconds and its mean frame energy ("velocity").

use serde::{Deserialize, Serialize};

/// A detected speech segment
///
/// Frame indices refer to the framing used for the detection call; the
/// segment covers frames `start_frame..end_frame`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeechSegment {
    /// Reserved for pitch estimation; always 0 on this path
    pub pitch_frequency: u32,
    /// First frame of the segment
    pub start_frame: usize,
    /// End frame (exclusive for the energy average, always > start_frame)
    pub end_frame: usize,
    /// `(end_frame - start_frame) * hop / sample_rate`
    pub duration_secs: f32,
    /// Mean frame energy over `start_frame..end_frame`
    pub velocity: f64,
}

/// Build segments from boundary pairs
///
/// # Arguments
/// * `boundaries` - `(start, end)` pairs in increasing start order
/// * `energy` - Per-frame energy the boundaries were detected on
/// * `hop` - Frame stride in samples
/// * `sample_rate` - Sample rate in Hz (> 0)
///
/// # Panics
/// Panics if a pair has `end <= start`. The detector never produces such a
/// pair for a validated config, so this signals a broken invariant rather
/// than bad input.
pub fn summarize(
    boundaries: &[(usize, usize)],
    energy: &[f64],
    hop: usize,
    sample_rate: u32,
) -> Vec<SpeechSegment> {
    boundaries
        .iter()
        .map(|&(start, end)| {
            assert!(
                end > start,
                "zero-length segment {}..{} reached the summarizer",
                start,
                end
            );

            let span = end - start;
            let duration_secs = (span * hop) as f32 / sample_rate as f32;
            let velocity = energy[start..end].iter().sum::<f64>() / span as f64;

            SpeechSegment {
                pitch_frequency: 0,
                start_frame: start,
                end_frame: end,
                duration_secs,
                velocity,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_and_velocity() {
        let energy = vec![0.0, 1.0, 2.0, 3.0, 4.0, 100.0];
        let segments = summarize(&[(1, 5)], &energy, 90, 16_000);

        assert_eq!(segments.len(), 1);
        let segment = segments[0];
        assert_eq!(segment.start_frame, 1);
        assert_eq!(segment.end_frame, 5);
        assert_eq!(segment.pitch_frequency, 0);
        // frames 1..5 exclude the end frame's energy
        assert_eq!(segment.velocity, 2.5);
        assert!((segment.duration_secs - 360.0 / 16_000.0).abs() < 1e-7);
    }

    #[test]
    fn test_preserves_input_order() {
        let energy = vec![1.0; 50];
        let segments = summarize(&[(2, 10), (20, 30), (31, 40)], &energy, 90, 8_000);
        let starts: Vec<usize> = segments.iter().map(|s| s.start_frame).collect();
        assert_eq!(starts, vec![2, 20, 31]);
    }

    #[test]
    fn test_empty_boundaries() {
        assert!(summarize(&[], &[1.0, 2.0], 90, 16_000).is_empty());
    }

    #[test]
    #[should_panic(expected = "zero-length segment")]
    fn test_zero_length_segment_panics() {
        summarize(&[(4, 4)], &[1.0; 10], 90, 16_000);
    }
}

// Temporal module - Time-domain frame features
//
// Both features are computed directly on the raw samples of one frame.
// Their exact boundaries matter: segmentation results are only comparable
// across implementations if these counts and sums match sample for sample.

/// Minimum drop between adjacent samples for a crossing to count
pub const ZCR_NOISE_FLOOR: f64 = 0.0002;

/// Count falling zero crossings in a frame
///
/// A pair `(x[j], x[j+1])` counts only when the signs differ AND
/// `x[j] - x[j+1] > ZCR_NOISE_FLOOR`. Rising crossings never count, and
/// neither do sign flips smaller than the floor. The difference is taken
/// in `f32` and compared in `f64`.
///
/// # Arguments
/// * `frame` - Time-domain samples of one frame
///
/// # Returns
/// Number of qualifying crossings (0 for frames shorter than 2 samples)
pub fn compute_zcr(frame: &[f32]) -> u32 {
    frame
        .windows(2)
        .filter(|pair| {
            pair[0] * pair[1] < 0.0 && f64::from(pair[0] - pair[1]) > ZCR_NOISE_FLOOR
        })
        .count() as u32
}

/// Frame energy as the sum of squared samples
///
/// Sums indices `0..len-1`: the final sample of the window is left out.
/// Squares are taken in `f32` and accumulated in `f64`.
pub fn compute_energy(frame: &[f32]) -> f64 {
    let end = frame.len().saturating_sub(1);
    frame[..end]
        .iter()
        .map(|&sample| f64::from(sample * sample))
        .sum()
}

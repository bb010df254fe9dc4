// Framer - overlapping fixed-size windows over a sample buffer
//
// Frame i covers samples [i * hop, i * hop + win_size). Frames are borrowed
// views into the caller's buffer; nothing is copied.

/// Number of complete frames that fit in `sample_count` samples
///
/// `floor((N - W) / H) + 1` when `N >= W`, otherwise 0.
pub fn frame_count(sample_count: usize, win_size: usize, hop: usize) -> usize {
    if win_size == 0 || hop == 0 || sample_count < win_size {
        return 0;
    }
    (sample_count - win_size) / hop + 1
}

/// Iterate over every complete frame of `buffer`
///
/// Trailing samples that don't fill a whole window are not visited.
/// Yields nothing if the buffer is shorter than one window.
///
/// # Panics
/// Panics if `win_size` or `hop` is 0; callers validate the config first.
pub fn frames(buffer: &[f32], win_size: usize, hop: usize) -> impl Iterator<Item = &[f32]> {
    buffer.windows(win_size).step_by(hop)
}

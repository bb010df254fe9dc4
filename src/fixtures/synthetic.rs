//! Deterministic synthetic signals for detector tests and demos.
//!
//! A [`SyntheticSignal`] is built left to right from silence, noise floor,
//! constant bursts and sine bursts. Noise comes from a seeded `StdRng`, so
//! the same builder calls always yield the same samples.

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f32::consts::PI;
use std::ops::Range;

/// Builder for mono test buffers
pub struct SyntheticSignal {
    sample_rate: u32,
    samples: Vec<f32>,
    noise_amplitude: f32,
    rng: StdRng,
}

impl SyntheticSignal {
    /// Start an empty signal; `seed` drives every noise sample
    pub fn new(sample_rate: u32, seed: u64) -> Self {
        Self {
            sample_rate,
            samples: Vec::new(),
            noise_amplitude: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform noise in `[-amplitude, amplitude]` used by [`Self::silence`]
    ///
    /// With the default of 0 silence is digital zero.
    pub fn noise_floor(mut self, amplitude: f32) -> Self {
        self.noise_amplitude = amplitude.abs();
        self
    }

    /// Append `count` samples of silence (noise floor only)
    pub fn silence(mut self, count: usize) -> Self {
        for _ in 0..count {
            let value = self.next_noise();
            self.samples.push(value);
        }
        self
    }

    /// Append `count` samples at a constant amplitude
    pub fn constant(mut self, count: usize, amplitude: f32) -> Self {
        self.samples.extend(std::iter::repeat(amplitude).take(count));
        self
    }

    /// Append a sine burst starting at phase 0
    pub fn sine(mut self, count: usize, frequency_hz: f32, amplitude: f32) -> Self {
        let step = 2.0 * PI * frequency_hz / self.sample_rate as f32;
        self.samples
            .extend((0..count).map(|i| amplitude * (step * i as f32).sin()));
        self
    }

    /// Overwrite an already built range with a constant amplitude
    ///
    /// The range is clipped to the current length.
    pub fn burst(mut self, range: Range<usize>, amplitude: f32) -> Self {
        let end = range.end.min(self.samples.len());
        let start = range.start.min(end);
        self.samples[start..end].fill(amplitude);
        self
    }

    /// Append silence until the signal holds `total` samples
    pub fn pad_to(self, total: usize) -> Self {
        let missing = total.saturating_sub(self.samples.len());
        self.silence(missing)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn build(self) -> Vec<f32> {
        self.samples
    }

    fn next_noise(&mut self) -> f32 {
        if self.noise_amplitude == 0.0 {
            0.0
        } else {
            self.rng
                .gen_range(-self.noise_amplitude..=self.noise_amplitude)
        }
    }
}

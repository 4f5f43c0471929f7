//! Noise segment offset selection.
//!
//! Each channel mixes in a contiguous noise segment as long as the speech.
//! A [`NoiseOffset`] picks where that segment starts. The mixer checks that
//! the segment fits before slicing, so a strategy may return any offset.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default fixed noise offset in samples.
pub const DEFAULT_NOISE_OFFSET: usize = 10;

/// Chooses the start of the noise segment for one channel.
///
/// Implemented for closures `FnMut(noise_len, segment_len) -> offset`.
pub trait NoiseOffset {
    /// Start index into a noise buffer of `noise_len` samples for a segment
    /// of `segment_len` samples.
    fn select(&mut self, noise_len: usize, segment_len: usize) -> usize;
}

impl<F> NoiseOffset for F
where
    F: FnMut(usize, usize) -> usize,
{
    fn select(&mut self, noise_len: usize, segment_len: usize) -> usize {
        self(noise_len, segment_len)
    }
}

/// Always the same offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedOffset(pub usize);

impl Default for FixedOffset {
    fn default() -> Self {
        Self(DEFAULT_NOISE_OFFSET)
    }
}

impl NoiseOffset for FixedOffset {
    fn select(&mut self, _noise_len: usize, _segment_len: usize) -> usize {
        self.0
    }
}

/// Uniformly random offset in `0..=noise_len - segment_len`.
#[derive(Debug, Clone)]
pub struct RandomOffset {
    rng: StdRng,
}

impl RandomOffset {
    /// Reproducible offsets from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Offsets seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl NoiseOffset for RandomOffset {
    fn select(&mut self, noise_len: usize, segment_len: usize) -> usize {
        match noise_len.checked_sub(segment_len) {
            Some(limit) => self.rng.gen_range(0..=limit),
            // Too short for any offset; the mixer reports it.
            None => 0,
        }
    }
}

/// Consecutive, non-overlapping segments, wrapping to the start when the
/// next segment would run past the end of the noise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundRobinOffset {
    next: usize,
}

impl NoiseOffset for RoundRobinOffset {
    fn select(&mut self, noise_len: usize, segment_len: usize) -> usize {
        if self.next + segment_len > noise_len {
            self.next = 0;
        }
        let offset = self.next;
        self.next += segment_len;
        offset
    }
}

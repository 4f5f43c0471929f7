//! Quantization threshold ladder.

use crate::common::{EPS, REFERENCE_BIT_DEPTH, amplitude_to_db};
use crate::error::AslError;

/// Largest bit depth accepted when building a ladder.
pub const MAX_BIT_DEPTH: u32 = 32;

/// Ascending thresholds `c[j] = 2^(j - 15)` for `j` in `0..bits - 1`.
///
/// For 16-bit audio this spans one quantization step (`2^-15`) up to half
/// the maximum code (`0.5`). The activity scan breaks at the first
/// threshold that is neither exceeded nor in hangover, which is only
/// correct because the ladder is sorted ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdLadder {
    linear: Vec<f64>,
    db: Vec<f64>,
}

impl ThresholdLadder {
    /// Builds the ladder for the given bit depth.
    pub fn new(bits: u32) -> Result<Self, AslError> {
        if !(2..=MAX_BIT_DEPTH).contains(&bits) {
            return Err(AslError::UnsupportedBitDepth { bits });
        }
        let lowest = -(REFERENCE_BIT_DEPTH as i32 - 1);
        let linear: Vec<f64> = (0..bits as i32 - 1)
            .map(|j| 2.0_f64.powi(lowest + j))
            .collect();
        let db = linear.iter().map(|&c| amplitude_to_db(c + EPS)).collect();
        Ok(Self { linear, db })
    }

    /// Number of thresholds (`bits - 1`).
    #[inline]
    pub fn len(&self) -> usize {
        self.linear.len()
    }

    /// Always `false`: a valid ladder holds at least one threshold.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.linear.is_empty()
    }

    /// Linear thresholds, ascending.
    #[inline]
    pub fn linear(&self) -> &[f64] {
        &self.linear
    }

    /// Thresholds in dB, `20 * log10(c + eps)`.
    #[inline]
    pub fn db(&self) -> &[f64] {
        &self.db
    }
}

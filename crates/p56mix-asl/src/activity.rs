//! Per-threshold activity counting with hangover.

use crate::threshold_ladder::ThresholdLadder;

/// Activity counters `a[j]` and hangover counters `hang[j]`, one pair per
/// ladder threshold.
///
/// Counters live for a single forward pass over one channel.
#[derive(Debug, Clone)]
pub struct ActivityCounters {
    active: Vec<usize>,
    hang: Vec<usize>,
    hangover_samples: usize,
}

impl ActivityCounters {
    /// Creates counters for `num_thresholds` thresholds. Hangover starts
    /// exhausted, so nothing counts as active before the envelope first
    /// reaches a threshold.
    pub fn new(num_thresholds: usize, hangover_samples: usize) -> Self {
        Self {
            active: vec![0; num_thresholds],
            hang: vec![hangover_samples; num_thresholds],
            hangover_samples,
        }
    }

    /// Updates the counters for one envelope sample.
    ///
    /// Thresholds are visited in ascending order and the scan stops at the
    /// first threshold that is neither reached nor in hangover: every
    /// higher threshold would fail the same way.
    pub fn update(&mut self, envelope: f64, ladder: &ThresholdLadder) {
        debug_assert_eq!(ladder.len(), self.active.len());
        for ((&c, a), hang) in ladder
            .linear()
            .iter()
            .zip(self.active.iter_mut())
            .zip(self.hang.iter_mut())
        {
            if envelope >= c {
                *a += 1;
                *hang = 0;
            } else if *hang < self.hangover_samples {
                *a += 1;
                *hang += 1;
            } else {
                break;
            }
        }
    }

    /// Activity counts, one per threshold.
    #[inline]
    pub fn counts(&self) -> &[usize] {
        &self.active
    }
}

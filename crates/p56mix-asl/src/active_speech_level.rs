//! Active speech level estimation (ITU-T P.56, Method B).
//!
//! For one channel of normalized samples:
//!
//! 1. The rectified signal is smoothed by a cascaded one-pole envelope
//!    detector.
//! 2. Every threshold of the ladder counts the samples whose envelope
//!    reaches it, extended by a hangover.
//! 3. Each count gives a candidate active level `10 * log10(sq / a[j])`.
//!    The first threshold whose candidate is within the margin of it,
//!    together with the threshold below, brackets the active level, which
//!    is resolved by [`interpolate`].

use crate::activity::ActivityCounters;
use crate::common::{EPS, db_to_amplitude, db_to_power, power_to_db};
use crate::envelope::EnvelopeDetector;
use crate::error::AslError;
use crate::interpolation::{Bracket, Interpolation, interpolate};
use crate::params::P56Params;
use crate::threshold_ladder::ThresholdLadder;

/// Active speech level of one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveSpeechLevel {
    /// Mean-square energy over the active portion (`asl_ms`).
    pub mean_square: f64,
    /// Active factor: long-term mean square divided by [`mean_square`](Self::mean_square).
    pub activity: f64,
    /// Linear threshold at the active level (`c0`).
    pub threshold: f64,
    /// Interpolation step that resolved the level.
    pub interpolation: Interpolation,
}

impl ActiveSpeechLevel {
    /// Active level in dB relative to full scale (`10 * log10(asl_ms)`).
    pub fn level_db(&self) -> f64 {
        power_to_db(self.mean_square)
    }

    /// Active threshold in dB (`20 * log10(c0)`).
    pub fn threshold_db(&self) -> f64 {
        self.interpolation.threshold_db
    }
}

/// P.56 Method B estimator for a fixed sample rate and bit depth.
///
/// Holds only immutable, derived state, so one estimator can measure any
/// number of channels, including concurrently.
#[derive(Debug, Clone)]
pub struct ActiveSpeechLevelEstimator {
    params: P56Params,
    ladder: ThresholdLadder,
    hangover_samples: usize,
    smoothing_factor: f64,
}

impl ActiveSpeechLevelEstimator {
    /// Creates an estimator.
    ///
    /// Fails on a zero sample rate, an unsupported bit depth, or parameters
    /// rejected by [`P56Params::validate`].
    pub fn new(params: P56Params, sample_rate_hz: u32, bits: u32) -> Result<Self, AslError> {
        if sample_rate_hz == 0 {
            return Err(AslError::InvalidSampleRate);
        }
        params.validate()?;
        Ok(Self {
            ladder: ThresholdLadder::new(bits)?,
            hangover_samples: params.hangover_samples(sample_rate_hz),
            smoothing_factor: params.smoothing_factor(sample_rate_hz),
            params,
        })
    }

    /// The parameters in use.
    pub fn params(&self) -> &P56Params {
        &self.params
    }

    /// The threshold ladder in use.
    pub fn ladder(&self) -> &ThresholdLadder {
        &self.ladder
    }

    /// Counts per-threshold activity over `samples`.
    pub fn activity(&self, samples: &[f64]) -> ActivityCounters {
        let mut detector = EnvelopeDetector::new(self.smoothing_factor);
        let mut counters = ActivityCounters::new(self.ladder.len(), self.hangover_samples);
        for &x in samples {
            counters.update(detector.process(x), &self.ladder);
        }
        counters
    }

    /// Measures the active speech level of one channel of normalized
    /// samples (full scale is `[-1, 1)`).
    pub fn estimate(&self, samples: &[f64]) -> Result<ActiveSpeechLevel, AslError> {
        let counters = self.activity(samples);
        let counts = counters.counts();
        let sq: f64 = samples.iter().map(|&x| x * x).sum();
        let margin = self.params.margin_db;
        let thresholds_db = self.ladder.db();

        if counts[0] == 0 {
            return Err(AslError::DegenerateSignal {
                active_samples: 0,
                margin_db: None,
            });
        }
        let mut level_db = Vec::with_capacity(counts.len());
        level_db.push(power_to_db(sq / counts[0] as f64 + EPS));
        let base_margin = level_db[0] - thresholds_db[0];
        if base_margin < margin {
            return Err(AslError::DegenerateSignal {
                active_samples: counts[0],
                margin_db: Some(base_margin),
            });
        }
        level_db.extend(
            counts[1..]
                .iter()
                .map(|&a| power_to_db(sq / (a as f64 + EPS) + EPS)),
        );

        // First crossing wins.
        let crossing = (1..counts.len())
            .find(|&j| counts[j] != 0 && level_db[j] - thresholds_db[j] <= margin)
            .ok_or(AslError::NoActiveLevelCrossing)?;

        let interpolation = interpolate(
            Bracket::new(level_db[crossing], thresholds_db[crossing]),
            Bracket::new(level_db[crossing - 1], thresholds_db[crossing - 1]),
            margin,
            self.params.tolerance_db,
        )?;

        let mean_square = db_to_power(interpolation.level_db);
        let level = ActiveSpeechLevel {
            mean_square,
            activity: (sq / samples.len() as f64) / mean_square,
            threshold: db_to_amplitude(interpolation.threshold_db),
            interpolation,
        };
        tracing::debug!(
            crossing,
            level_db = level.level_db(),
            activity = level.activity,
            threshold_db = level.threshold_db(),
            iterations = interpolation.iterations,
            "active speech level"
        );
        Ok(level)
    }
}

/// Measures the active speech level with the P.56 default parameters.
///
/// Returns `(asl_ms, asl, c0)` bundled as an [`ActiveSpeechLevel`].
pub fn active_speech_level(
    samples: &[f64],
    sample_rate_hz: u32,
    bits: u32,
) -> Result<ActiveSpeechLevel, AslError> {
    ActiveSpeechLevelEstimator::new(P56Params::default(), sample_rate_hz, bits)?.estimate(samples)
}

//! Estimator errors.

use std::error::Error;
use std::fmt;

/// Error returned by the active speech level estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AslError {
    /// The lowest threshold saw no activity, or the margin already fails at
    /// the lowest threshold. The signal has no measurable active speech.
    DegenerateSignal {
        /// Activity count at the lowest threshold.
        active_samples: usize,
        /// `AdB - CdB` at the lowest threshold, when it could be computed.
        margin_db: Option<f64>,
    },
    /// No threshold in the ladder satisfies the margin condition.
    NoActiveLevelCrossing,
    /// The interpolation search did not meet its tolerance within the
    /// iteration bound.
    NonConvergence {
        /// Number of bisection steps performed.
        iterations: usize,
        /// Remaining distance from the margin, in dB.
        diff_db: f64,
    },
    /// The bit depth cannot produce a threshold ladder.
    UnsupportedBitDepth {
        /// Requested bit depth.
        bits: u32,
    },
    /// The sampling rate is zero.
    InvalidSampleRate,
    /// An estimator parameter is not a finite positive number.
    InvalidParams {
        /// Name of the [`P56Params`](crate::P56Params) field.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}

impl fmt::Display for AslError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::DegenerateSignal {
                active_samples,
                margin_db: Some(margin_db),
            } => write!(
                f,
                "no measurable active speech: {active_samples} active samples, \
                 {margin_db:.2} dB above the lowest threshold",
            ),
            Self::DegenerateSignal {
                active_samples, ..
            } => write!(
                f,
                "no measurable active speech: {active_samples} active samples at the lowest threshold",
            ),
            Self::NoActiveLevelCrossing => {
                write!(f, "no threshold satisfies the active level margin")
            }
            Self::NonConvergence {
                iterations,
                diff_db,
            } => write!(
                f,
                "interpolation did not converge after {iterations} iterations ({diff_db:.3} dB off)",
            ),
            Self::UnsupportedBitDepth { bits } => {
                write!(f, "unsupported bit depth {bits}; expected 2..=32")
            }
            Self::InvalidSampleRate => write!(f, "sample rate must be non-zero"),
            Self::InvalidParams { name, value } => {
                write!(f, "{name} must be finite and positive, got {value}")
            }
        }
    }
}

impl Error for AslError {}

//! Estimator parameters.

use crate::common::{
    HANGOVER_TIME_S, INTERPOLATION_TOLERANCE_DB, MARGIN_DB, SMOOTHING_TIME_CONSTANT_S,
};
use crate::error::AslError;

/// Tunable parameters of the P.56 Method B estimator.
///
/// The defaults are the values fixed by the Recommendation. Changing them
/// produces a measurement that is no longer P.56 compliant, which is
/// occasionally useful for experiments with very short signals.
///
/// # Example
///
/// ```
/// use p56mix_asl::P56Params;
///
/// let params = P56Params {
///     hangover_s: 0.1,
///     ..Default::default()
/// };
/// assert_eq!(params.margin_db, 15.9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct P56Params {
    /// Time constant of each envelope smoothing stage, in seconds (default: 0.03).
    pub time_constant_s: f64,
    /// Hangover time in seconds (default: 0.2).
    pub hangover_s: f64,
    /// Margin between active level and threshold in dB (default: 15.9).
    pub margin_db: f64,
    /// Initial tolerance of the interpolation search in dB (default: 0.5).
    pub tolerance_db: f64,
}

impl Default for P56Params {
    fn default() -> Self {
        Self {
            time_constant_s: SMOOTHING_TIME_CONSTANT_S,
            hangover_s: HANGOVER_TIME_S,
            margin_db: MARGIN_DB,
            tolerance_db: INTERPOLATION_TOLERANCE_DB,
        }
    }
}

impl P56Params {
    /// Checks that every field is a finite positive number.
    pub fn validate(&self) -> Result<(), AslError> {
        for (name, value) in [
            ("time_constant_s", self.time_constant_s),
            ("hangover_s", self.hangover_s),
            ("margin_db", self.margin_db),
            ("tolerance_db", self.tolerance_db),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(AslError::InvalidParams { name, value });
            }
        }
        Ok(())
    }

    /// Hangover length in samples: `ceil(fs * H)`.
    pub fn hangover_samples(&self, sample_rate_hz: u32) -> usize {
        (f64::from(sample_rate_hz) * self.hangover_s).ceil() as usize
    }

    /// Smoothing factor of the envelope filter: `exp(-1 / (fs * T))`.
    pub fn smoothing_factor(&self, sample_rate_hz: u32) -> f64 {
        (-1.0 / (f64::from(sample_rate_hz) * self.time_constant_s)).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_quantities_at_16k() {
        let params = P56Params::default();
        assert_eq!(params.hangover_samples(16_000), 3200);
        let g = params.smoothing_factor(16_000);
        assert!((g - (-1.0_f64 / 480.0).exp()).abs() < 1e-15);
    }

    #[test]
    fn hangover_rounds_up() {
        let params = P56Params {
            hangover_s: 0.0101,
            ..Default::default()
        };
        // 8000 * 0.0101 = 80.8
        assert_eq!(params.hangover_samples(8_000), 81);
        assert_eq!(P56Params::default().hangover_samples(11_025), 2205);
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(P56Params::default().validate(), Ok(()));
    }

    fn rejected(params: P56Params) -> (&'static str, f64) {
        match params.validate() {
            Err(AslError::InvalidParams { name, value }) => (name, value),
            other => panic!("expected InvalidParams, got {other:?}"),
        }
    }

    #[test]
    fn negative_time_constant_is_rejected() {
        let params = P56Params {
            time_constant_s: -0.03,
            ..Default::default()
        };
        assert_eq!(rejected(params), ("time_constant_s", -0.03));
    }

    #[test]
    fn zero_and_nan_time_constant_are_rejected() {
        for time_constant_s in [0.0, f64::NAN, f64::INFINITY] {
            let params = P56Params {
                time_constant_s,
                ..Default::default()
            };
            assert_eq!(rejected(params).0, "time_constant_s");
        }
    }

    #[test]
    fn non_positive_hangover_is_rejected() {
        for hangover_s in [0.0, -0.2, f64::NAN] {
            let params = P56Params {
                hangover_s,
                ..Default::default()
            };
            assert_eq!(rejected(params).0, "hangover_s");
        }
    }

    #[test]
    fn non_positive_margin_is_rejected() {
        for margin_db in [0.0, -15.9, f64::NEG_INFINITY] {
            let params = P56Params {
                margin_db,
                ..Default::default()
            };
            assert_eq!(rejected(params).0, "margin_db");
        }
    }

    #[test]
    fn non_positive_tolerance_is_rejected() {
        for tolerance_db in [0.0, -0.5, f64::NAN] {
            let params = P56Params {
                tolerance_db,
                ..Default::default()
            };
            assert_eq!(rejected(params).0, "tolerance_db");
        }
    }
}

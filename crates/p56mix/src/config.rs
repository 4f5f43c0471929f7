//! Mixer configuration.

use p56mix_asl::P56Params;
use p56mix_asl::common;

/// Configuration of a [`NoiseMixer`](crate::NoiseMixer).
///
/// # Example
///
/// ```
/// use p56mix::MixConfig;
///
/// let config = MixConfig {
///     snr_db: 5.0,
///     ..Default::default()
/// };
/// assert_eq!(config.sample_rate_hz, 16_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixConfig {
    /// Desired ratio of active speech level to noise power, in dB (default: 0.0).
    pub snr_db: f64,
    /// Sampling rate of all buffers in Hz (default: 16000).
    pub sample_rate_hz: u32,
    /// Active speech level estimator parameters (default: P.56 values).
    pub p56: P56Params,
}

impl Default for MixConfig {
    fn default() -> Self {
        Self {
            snr_db: 0.0,
            sample_rate_hz: 16_000,
            p56: P56Params::default(),
        }
    }
}

impl MixConfig {
    /// Linear power ratio `10^(snr/10)`.
    pub fn snr_power_ratio(&self) -> f64 {
        common::db_to_power(self.snr_db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snr_ratio() {
        let mut config = MixConfig::default();
        assert_eq!(config.snr_power_ratio(), 1.0);
        config.snr_db = 10.0;
        assert!((config.snr_power_ratio() - 10.0).abs() < 1e-12);
        config.snr_db = -5.0;
        assert!((config.snr_power_ratio() - 0.316_227_766).abs() < 1e-9);
    }
}

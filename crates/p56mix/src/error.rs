//! Mixer errors.

use std::error::Error;
use std::fmt;

use p56mix_asl::AslError;

/// Error returned by the noise mixer.
///
/// Channel-scoped variants carry the index of the failing channel.
#[derive(Debug, Clone, PartialEq)]
pub enum MixError {
    /// The mixer could not be configured.
    Config(AslError),
    /// The target SNR is NaN or infinite.
    InvalidSnr {
        /// Rejected value.
        snr_db: f64,
    },
    /// The active speech level of a clean channel could not be measured.
    Estimation {
        /// Channel index.
        channel: usize,
        /// Estimator failure.
        source: AslError,
    },
    /// The noise buffer does not cover the segment for a channel.
    InsufficientNoiseLength {
        /// Channel index.
        channel: usize,
        /// Offset plus channel length.
        required: usize,
        /// Noise length.
        available: usize,
    },
    /// The selected noise segment has zero energy.
    SilentNoise {
        /// Channel index.
        channel: usize,
    },
    /// Clean and reverberant inputs have a different number of channels.
    ChannelCountMismatch {
        /// Clean channels.
        clean: usize,
        /// Reverberant channels.
        reverberant: usize,
    },
    /// Clean and reverberant buffers of a channel differ in length.
    ChannelLengthMismatch {
        /// Channel index.
        channel: usize,
        /// Clean samples.
        clean: usize,
        /// Reverberant samples.
        reverberant: usize,
    },
}

impl MixError {
    /// The channel the error is scoped to, if any.
    pub fn channel(&self) -> Option<usize> {
        match *self {
            Self::Estimation { channel, .. }
            | Self::InsufficientNoiseLength { channel, .. }
            | Self::SilentNoise { channel }
            | Self::ChannelLengthMismatch { channel, .. } => Some(channel),
            Self::Config(_) | Self::InvalidSnr { .. } | Self::ChannelCountMismatch { .. } => None,
        }
    }
}

impl fmt::Display for MixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(_) => write!(f, "invalid mixer configuration"),
            Self::InvalidSnr { snr_db } => write!(f, "target SNR must be finite, got {snr_db}"),
            Self::Estimation { channel, .. } => {
                write!(f, "channel {channel}: active speech level estimation failed")
            }
            Self::InsufficientNoiseLength {
                channel,
                required,
                available,
            } => write!(
                f,
                "channel {channel}: noise has {available} samples, segment needs {required}",
            ),
            Self::SilentNoise { channel } => {
                write!(f, "channel {channel}: selected noise segment is silent")
            }
            Self::ChannelCountMismatch { clean, reverberant } => write!(
                f,
                "{clean} clean channels but {reverberant} reverberant channels",
            ),
            Self::ChannelLengthMismatch {
                channel,
                clean,
                reverberant,
            } => write!(
                f,
                "channel {channel}: {clean} clean samples but {reverberant} reverberant samples",
            ),
        }
    }
}

impl Error for MixError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(source) | Self::Estimation { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimation_error_chains_source() {
        let err = MixError::Estimation {
            channel: 3,
            source: AslError::NoActiveLevelCrossing,
        };
        assert_eq!(err.channel(), Some(3));
        assert!(err.to_string().starts_with("channel 3"));
        let source = err.source().unwrap();
        assert_eq!(
            source.to_string(),
            AslError::NoActiveLevelCrossing.to_string()
        );
    }

    #[test]
    fn count_mismatch_has_no_channel() {
        let err = MixError::ChannelCountMismatch {
            clean: 2,
            reverberant: 1,
        };
        assert_eq!(err.channel(), None);
        assert!(err.source().is_none());
    }

    #[test]
    fn invalid_snr_names_the_value() {
        let err = MixError::InvalidSnr { snr_db: f64::NAN };
        assert_eq!(err.channel(), None);
        assert_eq!(err.to_string(), "target SNR must be finite, got NaN");
    }
}

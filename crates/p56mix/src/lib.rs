//! Noise mixing for multi-channel speech corpora at a P.56 active-level SNR.
//!
//! Each channel of a clean recording is measured with the ITU-T P.56
//! Method B active speech level estimator, and a segment of a shared mono
//! noise is scaled so that the active speech level sits the requested
//! number of dB above the noise power. The scaled noise is added to both
//! the clean and the reverberant version of the channel.
//!
//! # Quick Start
//!
//! ```
//! use p56mix::{MixConfig, NoiseMixer};
//!
//! let fs = 16_000;
//! let speech: Vec<i16> = (0..fs)
//!     .map(|n| (8000.0 * (std::f64::consts::TAU * 440.0 * n as f64 / fs as f64).sin()) as i16)
//!     .collect();
//! let noise: Vec<i16> = (0..fs + 100).map(|n| ((n * 7919) % 2001) as i16 - 1000).collect();
//!
//! let mut mixer = NoiseMixer::new(MixConfig {
//!     snr_db: 5.0,
//!     ..Default::default()
//! })?;
//! let out = mixer.mix(&[&speech], &[&speech], &noise)?;
//! assert_eq!(out.clean_noise[0].len(), speech.len());
//! assert!((out.reports[0].snr_db() - 5.0).abs() < 1e-9);
//! # Ok::<(), p56mix::MixError>(())
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod mixer;
pub mod offset;
pub mod pcm;
pub mod wav;

pub use p56mix_asl as asl;

// Public re-exports.
pub use config::MixConfig;
pub use connection::{ConnectionConfig, ConnectionError, ConnectionJob};
pub use error::MixError;
pub use mixer::{
    ChannelMix, ChannelReport, MixOutput, NoiseMixer, NoiseMixerBuilder, measure_snr_db,
};
pub use offset::{FixedOffset, NoiseOffset, RandomOffset, RoundRobinOffset};
pub use p56mix_asl::{ActiveSpeechLevel, ActiveSpeechLevelEstimator, AslError, P56Params};
pub use wav::{PcmAudio, WavError};

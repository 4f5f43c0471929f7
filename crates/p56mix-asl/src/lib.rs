#![doc = include_str!("../README.md")]

pub mod active_speech_level;
pub mod activity;
pub mod common;
pub mod envelope;
pub mod error;
pub mod interpolation;
pub mod params;
pub mod threshold_ladder;

pub use active_speech_level::{ActiveSpeechLevel, ActiveSpeechLevelEstimator, active_speech_level};
pub use error::AslError;
pub use interpolation::{Bracket, Interpolation, interpolate};
pub use params::P56Params;
pub use threshold_ladder::ThresholdLadder;

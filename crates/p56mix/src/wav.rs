//! 16-bit PCM WAV reading and writing.
//!
//! Buffers are handled per channel (`[channel][sample]`); interleaving
//! happens only at the file boundary.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::pcm::{self, BIT_DEPTH};

/// Error returned by WAV reading and writing.
#[derive(Debug)]
pub enum WavError {
    /// The WAV decoder or encoder failed.
    Hound(hound::Error),
    /// The file is not 16-bit integer PCM.
    UnsupportedFormat {
        /// Bits per sample in the file.
        bits_per_sample: u16,
        /// Sample format in the file.
        sample_format: SampleFormat,
    },
    /// The sample count is not a multiple of the channel count.
    RaggedChannels {
        /// Samples in the file.
        samples: usize,
        /// Channels in the file.
        channels: u16,
    },
    /// There is nothing to write, or the channel buffers differ in length.
    NoChannels,
}

impl fmt::Display for WavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hound(_) => write!(f, "WAV codec error"),
            Self::UnsupportedFormat {
                bits_per_sample,
                sample_format,
            } => write!(
                f,
                "unsupported WAV format: {bits_per_sample}-bit {sample_format:?}, expected 16-bit Int",
            ),
            Self::RaggedChannels { samples, channels } => write!(
                f,
                "{samples} samples do not divide into {channels} channels",
            ),
            Self::NoChannels => write!(f, "no channels or channels of unequal length"),
        }
    }
}

impl Error for WavError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Hound(source) => Some(source),
            _ => None,
        }
    }
}

impl From<hound::Error> for WavError {
    fn from(err: hound::Error) -> Self {
        Self::Hound(err)
    }
}

/// Deinterleaved 16-bit audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmAudio {
    /// Sampling rate in Hz.
    pub sample_rate_hz: u32,
    /// One buffer per channel, all of equal length.
    pub channels: Vec<Vec<i16>>,
}

impl PcmAudio {
    /// Number of channels.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel.
    pub fn num_frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }
}

fn check_spec(spec: WavSpec) -> Result<(), WavError> {
    if spec.sample_format != SampleFormat::Int || u32::from(spec.bits_per_sample) != BIT_DEPTH {
        return Err(WavError::UnsupportedFormat {
            bits_per_sample: spec.bits_per_sample,
            sample_format: spec.sample_format,
        });
    }
    Ok(())
}

fn read_channels<R: io::Read>(reader: WavReader<R>) -> Result<PcmAudio, WavError> {
    let spec = reader.spec();
    check_spec(spec)?;
    let interleaved = reader
        .into_samples::<i16>()
        .collect::<Result<Vec<_>, _>>()?;
    let num_channels = usize::from(spec.channels);
    if num_channels == 0 || interleaved.len() % num_channels != 0 {
        return Err(WavError::RaggedChannels {
            samples: interleaved.len(),
            channels: spec.channels,
        });
    }
    Ok(PcmAudio {
        sample_rate_hz: spec.sample_rate,
        channels: pcm::deinterleave(&interleaved, num_channels),
    })
}

/// Reads a 16-bit WAV stream into per-channel buffers.
pub fn decode_pcm16<R: io::Read>(reader: R) -> Result<PcmAudio, WavError> {
    read_channels(WavReader::new(reader)?)
}

/// Reads a 16-bit WAV file into per-channel buffers.
pub fn read_pcm16(path: impl AsRef<Path>) -> Result<PcmAudio, WavError> {
    read_channels(WavReader::open(path)?)
}

/// Reads the first channel of a 16-bit WAV file.
///
/// Returns the sampling rate and the samples.
pub fn read_mono_pcm16(path: impl AsRef<Path>) -> Result<(u32, Vec<i16>), WavError> {
    let audio = read_pcm16(path)?;
    let sample_rate_hz = audio.sample_rate_hz;
    let first = audio.channels.into_iter().next().ok_or(WavError::NoChannels)?;
    Ok((sample_rate_hz, first))
}

/// Writes per-channel buffers as an interleaved 16-bit WAV file.
pub fn write_pcm16<C: AsRef<[i16]>>(
    path: impl AsRef<Path>,
    sample_rate_hz: u32,
    channels: &[C],
) -> Result<(), WavError> {
    let num_channels = u16::try_from(channels.len()).map_err(|_| WavError::NoChannels)?;
    let num_frames = channels.first().map(|c| c.as_ref().len());
    if num_channels == 0 || channels.iter().any(|c| Some(c.as_ref().len()) != num_frames) {
        return Err(WavError::NoChannels);
    }
    let spec = WavSpec {
        channels: num_channels,
        sample_rate: sample_rate_hz,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for sample in pcm::interleave(channels) {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

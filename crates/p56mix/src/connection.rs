//! Per-condition concatenation of mixed utterances.
//!
//! Utterances are laid out as
//!
//! ```text
//! <root>/<category>/<channel>/<snr>/<rt>/*.wav
//! ```
//!
//! and every (category, channel) pair is joined into one stream, in
//! snr, then rt, then file name order, written to
//!
//! ```text
//! <root>/<category>/<category>_<channel>_<suffix>.wav
//! ```

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::wav::{self, WavError};

/// Layout of a mixed corpus.
///
/// # Example
///
/// ```
/// use p56mix::ConnectionConfig;
///
/// let config = ConnectionConfig {
///     root: "data/train".into(),
///     channels: vec!["ch0".into(), "ch1".into()],
///     ..Default::default()
/// };
/// assert_eq!(config.output_suffix, "4snr_7rt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Corpus root directory.
    pub root: PathBuf,
    /// Signal categories (default: the five mixer outputs and inputs).
    pub categories: Vec<String>,
    /// Channel directories (default: `ch0` to `ch9`).
    pub channels: Vec<String>,
    /// SNR condition directories, in output order.
    pub snrs: Vec<String>,
    /// RT60 condition directories, in output order.
    pub rts: Vec<String>,
    /// Suffix of the output file name (default: `4snr_7rt`).
    pub output_suffix: String,
    /// Sampling rate written to the output (default: 16000).
    pub sample_rate_hz: u32,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            categories: strings(&[
                "mic_clean",
                "mic_clean_noise",
                "mic_clean_rever",
                "mic_clean_rever_noise",
                "mic_noise",
            ]),
            channels: (0..10).map(|ch| format!("ch{ch}")).collect(),
            snrs: strings(&["-5dB", "0dB", "5dB", "10dB"]),
            rts: strings(&[
                "200ms", "300ms", "400ms", "500ms", "600ms", "700ms", "800ms",
            ]),
            output_suffix: "4snr_7rt".to_owned(),
            sample_rate_hz: 16_000,
        }
    }
}

/// One output stream and the utterances it is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionJob {
    /// Category name.
    pub category: String,
    /// Channel name.
    pub channel: String,
    /// Input files, in concatenation order.
    pub inputs: Vec<PathBuf>,
    /// Output file.
    pub output: PathBuf,
}

/// Error returned while connecting utterances.
#[derive(Debug)]
pub enum ConnectionError {
    /// A directory could not be listed.
    Io {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// A WAV file could not be read or written.
    Wav {
        /// File being processed.
        path: PathBuf,
        /// Underlying error.
        source: WavError,
    },
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, .. } => write!(f, "failed to list {}", path.display()),
            Self::Wav { path, .. } => write!(f, "failed to process {}", path.display()),
        }
    }
}

impl Error for ConnectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Wav { source, .. } => Some(source),
        }
    }
}

fn wav_files(dir: &Path) -> Result<Vec<PathBuf>, ConnectionError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(ConnectionError::Io {
                path: dir.to_owned(),
                source,
            });
        }
    };
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| ConnectionError::Io {
                path: dir.to_owned(),
                source,
            })?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "wav") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Lists the jobs for `config`, one per (category, channel) pair.
///
/// Missing condition directories contribute no inputs.
pub fn plan(config: &ConnectionConfig) -> Result<Vec<ConnectionJob>, ConnectionError> {
    let mut jobs = Vec::with_capacity(config.categories.len() * config.channels.len());
    for category in &config.categories {
        let category_dir = config.root.join(category);
        for channel in &config.channels {
            let channel_dir = category_dir.join(channel);
            let mut inputs = Vec::new();
            for snr in &config.snrs {
                for rt in &config.rts {
                    inputs.extend(wav_files(&channel_dir.join(snr).join(rt))?);
                }
            }
            let output = category_dir.join(format!(
                "{category}_{channel}_{}.wav",
                config.output_suffix
            ));
            jobs.push(ConnectionJob {
                category: category.clone(),
                channel: channel.clone(),
                inputs,
                output,
            });
        }
    }
    Ok(jobs)
}

/// Concatenates the inputs of every job using `read` to load one file.
///
/// Returns each output path with its samples.
pub fn connect<F>(
    config: &ConnectionConfig,
    mut read: F,
) -> Result<Vec<(PathBuf, Vec<i16>)>, ConnectionError>
where
    F: FnMut(&Path) -> Result<Vec<i16>, WavError>,
{
    plan(config)?
        .into_iter()
        .map(|job| {
            let mut samples = Vec::new();
            for input in &job.inputs {
                let chunk = read(input).map_err(|source| ConnectionError::Wav {
                    path: input.clone(),
                    source,
                })?;
                samples.extend(chunk);
            }
            tracing::debug!(
                category = %job.category,
                channel = %job.channel,
                segments = job.inputs.len(),
                samples = samples.len(),
                "connected"
            );
            Ok((job.output, samples))
        })
        .collect()
}

/// Connects every job and writes the outputs as mono 16-bit WAV files.
///
/// Returns the written paths.
pub fn run(config: &ConnectionConfig) -> Result<Vec<PathBuf>, ConnectionError> {
    let outputs = connect(config, |path| {
        wav::read_mono_pcm16(path).map(|(_, samples)| samples)
    })?;
    let mut written = Vec::with_capacity(outputs.len());
    for (path, samples) in outputs {
        wav::write_pcm16(&path, config.sample_rate_hz, &[samples]).map_err(|source| {
            ConnectionError::Wav {
                path: path.clone(),
                source,
            }
        })?;
        written.push(path);
    }
    Ok(written)
}

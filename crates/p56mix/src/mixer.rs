//! Per-channel noise mixing at a target SNR.
//!
//! For every channel the active speech level `Px` of the clean signal is
//! measured, a noise segment of the same length is cut out of the shared
//! mono noise, and the segment is scaled by
//!
//! ```text
//! sf = sqrt(Px / Pn / 10^(SNR / 10)),   Pn = sum(segment^2) / len
//! ```
//!
//! so that the active speech level sits `SNR` dB above the noise power.
//! The scaled noise is added to both the clean and the reverberant channel.

use p56mix_asl::{ActiveSpeechLevel, ActiveSpeechLevelEstimator, AslError, common};

use crate::config::MixConfig;
use crate::error::MixError;
use crate::offset::{FixedOffset, NoiseOffset};
use crate::pcm::{self, BIT_DEPTH};

/// Measurements behind one channel's mix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelReport {
    /// Channel index.
    pub channel: usize,
    /// Active speech level of the clean channel.
    pub speech: ActiveSpeechLevel,
    /// Start of the noise segment.
    pub noise_offset: usize,
    /// Mean square of the unscaled noise segment.
    pub noise_power: f64,
    /// Gain applied to the noise segment.
    pub scale_factor: f64,
}

impl ChannelReport {
    /// SNR the scale factor was computed for, `10 * log10(Px / (sf^2 * Pn))`.
    pub fn snr_db(&self) -> f64 {
        common::power_to_db(
            self.speech.mean_square / (self.scale_factor * self.scale_factor * self.noise_power),
        )
    }
}

/// Mixed buffers of one channel, all 16-bit and as long as the input.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMix {
    /// Reverberant speech plus scaled noise.
    pub clean_reverberant_noise: Vec<i16>,
    /// Clean speech plus scaled noise.
    pub clean_noise: Vec<i16>,
    /// Scaled noise alone.
    pub noise: Vec<i16>,
    /// How the mix was computed.
    pub report: ChannelReport,
}

/// Mixed buffers of every channel, indexed `[channel][sample]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MixOutput {
    /// Reverberant speech plus scaled noise.
    pub clean_reverberant_noise: Vec<Vec<i16>>,
    /// Clean speech plus scaled noise.
    pub clean_noise: Vec<Vec<i16>>,
    /// Scaled noise alone.
    pub noise: Vec<Vec<i16>>,
    /// One report per channel.
    pub reports: Vec<ChannelReport>,
}

impl MixOutput {
    fn push_zeros(&mut self, len: usize) {
        self.clean_reverberant_noise.push(vec![0; len]);
        self.clean_noise.push(vec![0; len]);
        self.noise.push(vec![0; len]);
    }

    fn push(&mut self, mix: ChannelMix) {
        self.clean_reverberant_noise.push(mix.clean_reverberant_noise);
        self.clean_noise.push(mix.clean_noise);
        self.noise.push(mix.noise);
        self.reports.push(mix.report);
    }
}

impl FromIterator<ChannelMix> for MixOutput {
    fn from_iter<I: IntoIterator<Item = ChannelMix>>(iter: I) -> Self {
        let mut out = Self::default();
        for mix in iter {
            out.push(mix);
        }
        out
    }
}

/// Builder for [`NoiseMixer`].
#[derive(derive_more::Debug, Default)]
pub struct NoiseMixerBuilder {
    config: MixConfig,
    #[debug(skip)]
    offset: Option<Box<dyn NoiseOffset + Send>>,
}

impl NoiseMixerBuilder {
    /// Sets the mix configuration.
    pub fn config(mut self, config: MixConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the noise offset strategy (default: [`FixedOffset::default`]).
    pub fn offset(mut self, offset: impl NoiseOffset + Send + 'static) -> Self {
        self.offset = Some(Box::new(offset));
        self
    }

    /// Builds the mixer.
    ///
    /// Fails on a non-finite target SNR or on estimator settings rejected by
    /// [`ActiveSpeechLevelEstimator::new`].
    pub fn build(self) -> Result<NoiseMixer, MixError> {
        if !self.config.snr_db.is_finite() {
            return Err(MixError::InvalidSnr {
                snr_db: self.config.snr_db,
            });
        }
        let estimator = ActiveSpeechLevelEstimator::new(
            self.config.p56,
            self.config.sample_rate_hz,
            BIT_DEPTH,
        )
        .map_err(MixError::Config)?;
        Ok(NoiseMixer {
            config: self.config,
            estimator,
            offset: self
                .offset
                .unwrap_or_else(|| Box::new(FixedOffset::default())),
        })
    }
}

/// Mixes a mono noise into multi-channel clean and reverberant speech.
///
/// # Example
///
/// ```
/// use p56mix::{MixConfig, NoiseMixer, RoundRobinOffset};
///
/// let mut mixer = NoiseMixer::builder()
///     .config(MixConfig {
///         snr_db: 10.0,
///         ..Default::default()
///     })
///     .offset(RoundRobinOffset::default())
///     .build()?;
/// # Ok::<(), p56mix::MixError>(())
/// ```
#[derive(derive_more::Debug)]
pub struct NoiseMixer {
    config: MixConfig,
    estimator: ActiveSpeechLevelEstimator,
    #[debug(skip)]
    offset: Box<dyn NoiseOffset + Send>,
}

impl NoiseMixer {
    /// Returns a builder.
    pub fn builder() -> NoiseMixerBuilder {
        NoiseMixerBuilder::default()
    }

    /// Creates a mixer with the default fixed noise offset.
    pub fn new(config: MixConfig) -> Result<Self, MixError> {
        Self::builder().config(config).build()
    }

    /// The configuration in use.
    pub fn config(&self) -> &MixConfig {
        &self.config
    }

    /// The active speech level estimator in use.
    pub fn estimator(&self) -> &ActiveSpeechLevelEstimator {
        &self.estimator
    }

    /// Mixes every channel, failing on the first channel that cannot be
    /// mixed.
    pub fn mix<C, R>(
        &mut self,
        clean: &[C],
        reverberant: &[R],
        noise: &[i16],
    ) -> Result<MixOutput, MixError>
    where
        C: AsRef<[i16]>,
        R: AsRef<[i16]>,
    {
        check_channel_count(clean.len(), reverberant.len())?;
        let noise = pcm::normalize(noise);
        clean
            .iter()
            .zip(reverberant)
            .enumerate()
            .map(|(channel, (c, r))| self.mix_normalized(channel, c.as_ref(), r.as_ref(), &noise))
            .collect()
    }

    /// Mixes every channel independently.
    ///
    /// The outer error covers problems with the input as a whole; each
    /// channel then succeeds or fails on its own, and a failed channel does
    /// not stop the others.
    pub fn mix_each<C, R>(
        &mut self,
        clean: &[C],
        reverberant: &[R],
        noise: &[i16],
    ) -> Result<Vec<Result<ChannelMix, MixError>>, MixError>
    where
        C: AsRef<[i16]>,
        R: AsRef<[i16]>,
    {
        check_channel_count(clean.len(), reverberant.len())?;
        let noise = pcm::normalize(noise);
        Ok(clean
            .iter()
            .zip(reverberant)
            .enumerate()
            .map(|(channel, (c, r))| {
                let result = self.mix_normalized(channel, c.as_ref(), r.as_ref(), &noise);
                if let Err(err) = &result {
                    tracing::warn!(channel, error = %err, "skipping channel");
                }
                result
            })
            .collect())
    }

    /// Mixes every channel, writing zeros for channels that cannot be mixed.
    ///
    /// The output keeps the input channel layout. Only mixed channels get a
    /// report; the errors of the zeroed channels are returned alongside.
    pub fn mix_or_silence<C, R>(
        &mut self,
        clean: &[C],
        reverberant: &[R],
        noise: &[i16],
    ) -> Result<(MixOutput, Vec<MixError>), MixError>
    where
        C: AsRef<[i16]>,
        R: AsRef<[i16]>,
    {
        let results = self.mix_each(clean, reverberant, noise)?;
        let mut out = MixOutput::default();
        let mut skipped = Vec::new();
        for (c, result) in clean.iter().zip(results) {
            match result {
                Ok(mix) => out.push(mix),
                Err(err) => {
                    out.push_zeros(c.as_ref().len());
                    skipped.push(err);
                }
            }
        }
        Ok((out, skipped))
    }

    /// Mixes a single channel.
    pub fn mix_channel(
        &mut self,
        channel: usize,
        clean: &[i16],
        reverberant: &[i16],
        noise: &[i16],
    ) -> Result<ChannelMix, MixError> {
        self.mix_normalized(channel, clean, reverberant, &pcm::normalize(noise))
    }

    fn mix_normalized(
        &mut self,
        channel: usize,
        clean: &[i16],
        reverberant: &[i16],
        noise: &[f64],
    ) -> Result<ChannelMix, MixError> {
        if clean.len() != reverberant.len() {
            return Err(MixError::ChannelLengthMismatch {
                channel,
                clean: clean.len(),
                reverberant: reverberant.len(),
            });
        }
        let len = clean.len();
        let x = pcm::normalize(clean);

        let speech = self
            .estimator
            .estimate(&x)
            .map_err(|source| MixError::Estimation { channel, source })?;

        let noise_offset = self.offset.select(noise.len(), len);
        let required = noise_offset.saturating_add(len);
        if noise.len() < required {
            return Err(MixError::InsufficientNoiseLength {
                channel,
                required,
                available: noise.len(),
            });
        }
        let segment = &noise[noise_offset..required];

        let noise_power = segment.iter().map(|&n| n * n).sum::<f64>() / len as f64;
        if noise_power <= 0.0 {
            return Err(MixError::SilentNoise { channel });
        }
        let scale_factor =
            (speech.mean_square / noise_power / self.config.snr_power_ratio()).sqrt();

        let scaled: Vec<f64> = segment.iter().map(|&n| n * scale_factor).collect();
        let clean_reverberant_noise = reverberant
            .iter()
            .zip(&scaled)
            .map(|(&r, &n)| pcm::to_pcm16(pcm::to_float(r) + n))
            .collect();
        let clean_noise = x
            .iter()
            .zip(&scaled)
            .map(|(&s, &n)| pcm::to_pcm16(s + n))
            .collect();

        let report = ChannelReport {
            channel,
            speech,
            noise_offset,
            noise_power,
            scale_factor,
        };
        tracing::debug!(
            channel,
            level_db = speech.level_db(),
            activity = speech.activity,
            noise_offset,
            scale_factor,
            "mixed channel"
        );

        Ok(ChannelMix {
            clean_reverberant_noise,
            clean_noise,
            noise: pcm::quantize(&scaled),
            report,
        })
    }

    /// Recomputes the SNR of a mix from its 16-bit outputs: the active
    /// speech level of `speech` over the mean square of `noise`.
    pub fn measure_snr_db(&self, speech: &[i16], noise: &[i16]) -> Result<f64, AslError> {
        measure_snr_db(&self.estimator, speech, noise)
    }
}

/// Recomputes the SNR of 16-bit `speech` against 16-bit `noise` in dB.
///
/// Returns `+inf` for silent noise.
pub fn measure_snr_db(
    estimator: &ActiveSpeechLevelEstimator,
    speech: &[i16],
    noise: &[i16],
) -> Result<f64, AslError> {
    let speech = estimator.estimate(&pcm::normalize(speech))?;
    let noise_power = noise
        .iter()
        .map(|&n| pcm::to_float(n).powi(2))
        .sum::<f64>()
        / noise.len().max(1) as f64;
    Ok(common::power_to_db(speech.mean_square / noise_power))
}

fn check_channel_count(clean: usize, reverberant: usize) -> Result<(), MixError> {
    if clean == reverberant {
        Ok(())
    } else {
        Err(MixError::ChannelCountMismatch { clean, reverberant })
    }
}

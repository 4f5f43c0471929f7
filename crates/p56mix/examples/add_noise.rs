//! Mix a noise file into clean and reverberant multi-channel recordings.
//!
//! Writes `clean + noise`, `reverberant + noise` and the scaled noise as
//! 16-bit WAV files with the channel layout of the clean input, then prints
//! the per-channel levels.
//!
//! ```sh
//! cargo run -p p56mix --features examples --example add_noise -- \
//!     --clean clean.wav --reverberant rever.wav --noise noise.wav --snr 5
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail, ensure};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use p56mix::offset::DEFAULT_NOISE_OFFSET;
use p56mix::{
    FixedOffset, MixConfig, NoiseMixer, NoiseMixerBuilder, RandomOffset, RoundRobinOffset, wav,
};

/// Where each channel's noise segment starts.
#[derive(Debug, Clone, Copy, PartialEq)]
enum OffsetArg {
    Fixed(usize),
    Random(Option<u64>),
    RoundRobin,
}

impl FromStr for OffsetArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, value) = match s.split_once(':') {
            Some((kind, value)) => (kind, Some(value)),
            None => (s, None),
        };
        match (kind, value) {
            ("fixed", Some(n)) => n
                .parse()
                .map(Self::Fixed)
                .map_err(|e| format!("bad offset {n:?}: {e}")),
            ("fixed", None) => Ok(Self::Fixed(DEFAULT_NOISE_OFFSET)),
            ("random", Some(seed)) => seed
                .parse()
                .map(|seed| Self::Random(Some(seed)))
                .map_err(|e| format!("bad seed {seed:?}: {e}")),
            ("random", None) => Ok(Self::Random(None)),
            ("round-robin", None) => Ok(Self::RoundRobin),
            _ => Err(format!(
                "expected fixed[:N], random[:SEED] or round-robin, got {s:?}"
            )),
        }
    }
}

impl OffsetArg {
    fn apply(self, builder: NoiseMixerBuilder) -> NoiseMixerBuilder {
        match self {
            Self::Fixed(n) => builder.offset(FixedOffset(n)),
            Self::Random(Some(seed)) => builder.offset(RandomOffset::from_seed(seed)),
            Self::Random(None) => builder.offset(RandomOffset::from_entropy()),
            Self::RoundRobin => builder.offset(RoundRobinOffset::default()),
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Mix noise into multi-channel speech at a P.56 active-level SNR")]
struct Args {
    /// Clean multi-channel speech.
    #[arg(long)]
    clean: PathBuf,

    /// Reverberant multi-channel speech, same layout as the clean input.
    #[arg(long)]
    reverberant: PathBuf,

    /// Noise; only the first channel is used.
    #[arg(long)]
    noise: PathBuf,

    /// Target SNR in dB.
    #[arg(long, allow_hyphen_values = true)]
    snr: f64,

    /// Noise segment offset: fixed[:N], random[:SEED] or round-robin.
    #[arg(long, default_value = "fixed:10")]
    offset: OffsetArg,

    /// Write silence for channels that cannot be mixed instead of failing.
    #[arg(long)]
    keep_going: bool,

    /// Output for reverberant speech plus noise.
    #[arg(long, default_value = "clean_rever_noise.wav")]
    clean_reverberant_noise_output: PathBuf,

    /// Output for clean speech plus noise.
    #[arg(long, default_value = "clean_noise.wav")]
    clean_noise_output: PathBuf,

    /// Output for the scaled noise.
    #[arg(long, default_value = "noise.wav")]
    noise_output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let clean = wav::read_pcm16(&args.clean)
        .with_context(|| format!("failed to read {}", args.clean.display()))?;
    let reverberant = wav::read_pcm16(&args.reverberant)
        .with_context(|| format!("failed to read {}", args.reverberant.display()))?;
    let (noise_rate, noise) = wav::read_mono_pcm16(&args.noise)
        .with_context(|| format!("failed to read {}", args.noise.display()))?;

    ensure!(
        clean.sample_rate_hz == reverberant.sample_rate_hz && clean.sample_rate_hz == noise_rate,
        "sample rates differ: clean {} Hz, reverberant {} Hz, noise {} Hz",
        clean.sample_rate_hz,
        reverberant.sample_rate_hz,
        noise_rate,
    );

    let config = MixConfig {
        snr_db: args.snr,
        sample_rate_hz: clean.sample_rate_hz,
        ..Default::default()
    };
    let mut mixer = args
        .offset
        .apply(NoiseMixer::builder().config(config))
        .build()
        .context("failed to configure mixer")?;

    let out = if args.keep_going {
        let (out, skipped) =
            mixer.mix_or_silence(&clean.channels, &reverberant.channels, &noise)?;
        for err in &skipped {
            eprintln!("Skipped {err}, writing silence");
        }
        if out.reports.is_empty() {
            bail!("no channel could be mixed");
        }
        out
    } else {
        mixer.mix(&clean.channels, &reverberant.channels, &noise)?
    };

    println!(
        "{:>3}  {:>9}  {:>8}  {:>9}  {:>8}  {:>9}",
        "ch", "level dB", "activity", "thresh dB", "offset", "snr dB"
    );
    for report in &out.reports {
        let measured = mixer
            .measure_snr_db(
                &clean.channels[report.channel],
                &out.noise[report.channel],
            )
            .unwrap_or(f64::NAN);
        println!(
            "{:>3}  {:>9.2}  {:>8.3}  {:>9.2}  {:>8}  {:>9.2}",
            report.channel,
            report.speech.level_db(),
            report.speech.activity,
            report.speech.threshold_db(),
            report.noise_offset,
            measured,
        );
    }

    let sample_rate_hz = clean.sample_rate_hz;
    let outputs = [
        (
            &args.clean_reverberant_noise_output,
            &out.clean_reverberant_noise,
        ),
        (&args.clean_noise_output, &out.clean_noise),
        (&args.noise_output, &out.noise),
    ];
    for (path, channels) in outputs {
        wav::write_pcm16(path, sample_rate_hz, channels)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

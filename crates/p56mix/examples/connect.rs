//! Concatenate a mixed corpus into one WAV per category and channel.
//!
//! ```sh
//! cargo run -p p56mix --features examples --example connect -- --root data/train
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use p56mix::ConnectionConfig;
use p56mix::connection;

#[derive(Parser, Debug)]
#[command(about = "Concatenate per-condition utterances into one stream per channel")]
struct Args {
    /// Corpus root containing `<category>/<channel>/<snr>/<rt>/*.wav`.
    #[arg(long)]
    root: PathBuf,

    /// Categories to connect (default: all five mixer categories).
    #[arg(long, value_delimiter = ',')]
    categories: Vec<String>,

    /// Channel directories (default: ch0 to ch9).
    #[arg(long, value_delimiter = ',')]
    channels: Vec<String>,

    /// SNR directories in output order.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    snrs: Vec<String>,

    /// RT60 directories in output order.
    #[arg(long, value_delimiter = ',')]
    rts: Vec<String>,

    /// Output file name suffix.
    #[arg(long, default_value = "4snr_7rt")]
    suffix: String,

    /// Sampling rate written to the outputs.
    #[arg(long, default_value_t = 16_000)]
    sample_rate: u32,

    /// List the jobs without reading or writing audio.
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    fn into_config(self) -> ConnectionConfig {
        let defaults = ConnectionConfig::default();
        let or_default = |given: Vec<String>, default: Vec<String>| {
            if given.is_empty() { default } else { given }
        };
        ConnectionConfig {
            root: self.root,
            categories: or_default(self.categories, defaults.categories),
            channels: or_default(self.channels, defaults.channels),
            snrs: or_default(self.snrs, defaults.snrs),
            rts: or_default(self.rts, defaults.rts),
            output_suffix: self.suffix,
            sample_rate_hz: self.sample_rate,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();
    let dry_run = args.dry_run;
    let config = args.into_config();

    if dry_run {
        for job in connection::plan(&config).context("failed to list corpus")? {
            println!(
                "{} {}: {} segments -> {}",
                job.category,
                job.channel,
                job.inputs.len(),
                job.output.display()
            );
        }
        return Ok(());
    }

    let written = connection::run(&config)
        .with_context(|| format!("failed to connect {}", config.root.display()))?;
    for path in &written {
        println!("Wrote {}", path.display());
    }
    println!("Connected {} streams.", written.len());
    Ok(())
}

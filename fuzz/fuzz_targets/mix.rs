#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use p56mix::{MixConfig, NoiseMixer, RoundRobinOffset};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    /// Target SNR, clamped to [-20, 40] dB
    snr_db: i8,
    /// Number of channels (clamped to 1-4)
    channels: u8,
    /// Use round-robin offsets instead of the fixed default
    round_robin: bool,
    /// Clean samples, split evenly across channels
    clean: Vec<i16>,
    /// Mono noise
    noise: Vec<i16>,
}

fuzz_target!(|input: FuzzInput| {
    let channels = usize::from(input.channels % 4) + 1;
    let len = input.clean.len() / channels;
    let clean: Vec<&[i16]> = input.clean.chunks_exact(len.max(1)).take(channels).collect();

    let builder = NoiseMixer::builder().config(MixConfig {
        snr_db: f64::from(input.snr_db).clamp(-20.0, 40.0),
        ..Default::default()
    });
    let mut mixer = if input.round_robin {
        builder.offset(RoundRobinOffset::default()).build()
    } else {
        builder.build()
    }
    .unwrap();

    let results = mixer.mix_each(&clean, &clean, &input.noise).unwrap();
    assert_eq!(results.len(), clean.len());
    for (ch, result) in results.iter().enumerate() {
        if let Ok(mix) = result {
            assert_eq!(mix.report.channel, ch);
            assert_eq!(mix.noise.len(), clean[ch].len());
            assert_eq!(mix.clean_noise.len(), clean[ch].len());
            assert!(mix.report.scale_factor.is_finite());
        }
    }

    let (out, skipped) = mixer.mix_or_silence(&clean, &clean, &input.noise).unwrap();
    assert_eq!(out.noise.len(), clean.len());
    assert_eq!(out.reports.len() + skipped.len(), clean.len());
    for (ch, samples) in clean.iter().enumerate() {
        assert_eq!(out.clean_reverberant_noise[ch].len(), samples.len());
    }
});

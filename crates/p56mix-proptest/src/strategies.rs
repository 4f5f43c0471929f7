//! Proptest strategies for estimator and mixer inputs.

use p56mix_asl::common::quantize;
use proptest::prelude::*;

use crate::generators;

/// Sample rates the estimator is exercised at.
pub const SAMPLE_RATES: [u32; 4] = [8_000, 16_000, 32_000, 48_000];

/// One of [`SAMPLE_RATES`].
pub fn sample_rate() -> impl Strategy<Value = u32> {
    prop::sample::select(SAMPLE_RATES.to_vec())
}

/// SNRs in dB for which a mix at moderate levels stays clear of clipping.
pub fn snr_db() -> impl Strategy<Value = f64> {
    5.0..30.0_f64
}

/// A speech-like 16-bit channel: tone bursts with a random amplitude,
/// frequency and duty cycle, one second at 16 kHz.
pub fn speech_like_pcm16() -> impl Strategy<Value = Vec<i16>> {
    (0.05..0.4_f64, 100.0..3000.0_f64, 800usize..4000, 0usize..4000).prop_map(
        |(amplitude, freq_hz, on_len, off_len)| {
            quantize(&generators::bursts(
                amplitude, freq_hz, 16_000, on_len, off_len, 16_000,
            ))
        },
    )
}

/// Seeded uniform noise, 16-bit, long enough for a one second channel at
/// 16 kHz plus offset headroom.
pub fn noise_pcm16() -> impl Strategy<Value = Vec<i16>> {
    (0.05..0.5_f64, any::<u64>())
        .prop_map(|(amplitude, seed)| generators::uniform_noise_pcm16(amplitude, 20_000, seed))
}

/// A bracket pair `(upper, lower)` in dB straddling `margin_db`: the upper
/// end is at or below the margin, the lower end above it.
pub fn straddling_brackets(margin_db: f64) -> impl Strategy<Value = ((f64, f64), (f64, f64))> {
    (
        -60.0..0.0_f64,
        -10.0..0.0_f64,
        0.0..10.0_f64,
        0.0..3.0_f64,
    )
        .prop_map(move |(level_db, upper_excess, lower_excess, level_shift)| {
            // Distances from the margin: `upper_excess` <= 0 < `level_shift + lower_excess`.
            let upper = (level_db, level_db - margin_db - upper_excess);
            let lower = (level_db + level_shift, level_db - margin_db - lower_excess);
            (upper, lower)
        })
}

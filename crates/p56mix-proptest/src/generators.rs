//! Deterministic signal generators.
//!
//! Float generators produce normalized samples (full scale `[-1, 1)`);
//! the `_pcm16` variants scale by 32768 and saturate to `i16`.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use p56mix_asl::common::quantize;
use rand::{Rng, SeedableRng};

/// `len` zero samples.
pub fn silence(len: usize) -> Vec<f64> {
    vec![0.0; len]
}

/// Sine of the given amplitude and frequency, starting at phase zero.
pub fn sine(amplitude: f64, freq_hz: f64, sample_rate_hz: u32, len: usize) -> Vec<f64> {
    let fs = f64::from(sample_rate_hz);
    (0..len)
        .map(|n| amplitude * (TAU * freq_hz * n as f64 / fs).sin())
        .collect()
}

/// Uniform noise in `[-amplitude, amplitude)` from a seeded generator.
pub fn uniform_noise(amplitude: f64, len: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| amplitude * rng.gen_range(-1.0_f64..1.0))
        .collect()
}

/// Tone bursts: `on_len` samples of sine followed by `off_len` samples of
/// silence, repeated up to `len` samples. A crude stand-in for speech with
/// pauses.
pub fn bursts(
    amplitude: f64,
    freq_hz: f64,
    sample_rate_hz: u32,
    on_len: usize,
    off_len: usize,
    len: usize,
) -> Vec<f64> {
    let period = on_len + off_len;
    let mut out = sine(amplitude, freq_hz, sample_rate_hz, len);
    for (n, s) in out.iter_mut().enumerate() {
        if period > 0 && n % period >= on_len {
            *s = 0.0;
        }
    }
    out
}

/// Delays `signal` by `delay` samples and scales it by `gain`, keeping the
/// original length. A minimal "reverberant" copy of a dry signal.
pub fn delayed(signal: &[f64], delay: usize, gain: f64) -> Vec<f64> {
    (0..signal.len())
        .map(|n| n.checked_sub(delay).map_or(0.0, |m| gain * signal[m]))
        .collect()
}

/// [`sine`] as 16-bit PCM.
pub fn sine_pcm16(amplitude: f64, freq_hz: f64, sample_rate_hz: u32, len: usize) -> Vec<i16> {
    quantize(&sine(amplitude, freq_hz, sample_rate_hz, len))
}

/// [`uniform_noise`] as 16-bit PCM.
pub fn uniform_noise_pcm16(amplitude: f64, len: usize, seed: u64) -> Vec<i16> {
    quantize(&uniform_noise(amplitude, len, seed))
}

//! P.56 constants, 16-bit sample conversion and level conversion helpers.
//!
//! Normalized samples are `i16 / 32768`. The way back truncates toward
//! zero and saturates at the `i16` range.

/// Time constant of the envelope smoothing filter, in seconds.
pub const SMOOTHING_TIME_CONSTANT_S: f64 = 0.03;
/// Hangover time, in seconds.
pub const HANGOVER_TIME_S: f64 = 0.2;
/// Margin in dB between the active speech level and the threshold.
pub const MARGIN_DB: f64 = 15.9;
/// Initial tolerance of the interpolation search, in dB.
pub const INTERPOLATION_TOLERANCE_DB: f64 = 0.5;

/// Numeric floor added before taking logarithms.
///
/// This is the rounded value used by the reference P.56 tooling, not
/// `f64::EPSILON`.
pub const EPS: f64 = 2.2204e-16;

/// Bit depth the threshold ladder is anchored to. The lowest threshold
/// is one 16-bit quantization step (`2^-15`).
pub const REFERENCE_BIT_DEPTH: u32 = 16;

/// Scale between normalized floats and 16-bit integer samples.
pub const PCM16_SCALE: f64 = 32768.0;

/// Converts one 16-bit sample to the normalized float range.
#[inline]
pub fn to_float(x: i16) -> f64 {
    f64::from(x) / PCM16_SCALE
}

/// Converts one normalized sample to 16-bit, truncating and saturating.
/// NaN maps to zero.
#[inline]
pub fn to_pcm16(x: f64) -> i16 {
    (x * PCM16_SCALE) as i16
}

/// Normalizes a 16-bit buffer.
pub fn normalize(samples: &[i16]) -> Vec<f64> {
    samples.iter().copied().map(to_float).collect()
}

/// Quantizes a normalized buffer to 16-bit.
pub fn quantize(samples: &[f64]) -> Vec<i16> {
    samples.iter().copied().map(to_pcm16).collect()
}

/// Converts a mean-square (power) value to dB: `10 * log10(p)`.
#[inline]
pub fn power_to_db(p: f64) -> f64 {
    10.0 * p.log10()
}

/// Converts a dB value to mean-square (power): `10^(v/10)`.
#[inline]
pub fn db_to_power(v: f64) -> f64 {
    10.0_f64.powf(v / 10.0)
}

/// Converts a linear amplitude to dB: `20 * log10(a)`.
#[inline]
pub fn amplitude_to_db(a: f64) -> f64 {
    20.0 * a.log10()
}

/// Converts a dB value to a linear amplitude: `10^(v/20)`.
#[inline]
pub fn db_to_amplitude(v: f64) -> f64 {
    10.0_f64.powf(v / 20.0)
}

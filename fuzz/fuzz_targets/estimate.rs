#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use p56mix_asl::{ActiveSpeechLevelEstimator, AslError, P56Params};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    /// Sample rate index: 0=8k, 1=16k, 2=32k, 3=48k
    sample_rate_idx: u8,
    /// Bit depth, clamped to 2..=32
    bits: u8,
    /// Samples; non-finite values are replaced by 0
    samples: Vec<f64>,
}

fn sample_rate(idx: u8) -> u32 {
    match idx % 4 {
        0 => 8000,
        1 => 16000,
        2 => 32000,
        _ => 48000,
    }
}

fn sanitize_sample(s: f64) -> f64 {
    if s.is_finite() { s.clamp(-1.0, 1.0) } else { 0.0 }
}

fuzz_target!(|input: FuzzInput| {
    let bits = u32::from(input.bits % 31) + 2;
    let estimator =
        ActiveSpeechLevelEstimator::new(P56Params::default(), sample_rate(input.sample_rate_idx), bits)
            .unwrap();
    let samples: Vec<f64> = input.samples.into_iter().map(sanitize_sample).collect();

    match estimator.estimate(&samples) {
        Ok(level) => {
            assert!(level.mean_square.is_finite() && level.mean_square > 0.0);
            assert!(level.activity.is_finite() && level.activity > 0.0);
            assert!(level.threshold > 0.0);
        }
        Err(AslError::DegenerateSignal { .. } | AslError::NoActiveLevelCrossing) => {}
        Err(err) => panic!("unexpected error on finite input: {err}"),
    }
});

//! Property tests for the threshold ladder, the interpolation search and the
//! estimator.

use p56mix_asl::interpolation::{Bracket, STALL_ITERATIONS, interpolate};
use p56mix_asl::{AslError, P56Params, ThresholdLadder, active_speech_level, common};
use p56mix_proptest::comparison::compare_f64;
use p56mix_proptest::{generators, strategies};
use proptest::prelude::*;
use test_strategy::proptest;

const MARGIN: f64 = 15.9;

#[proptest]
fn ladder_is_strictly_increasing_powers_of_two(#[strategy(2u32..=32)] bits: u32) {
    let ladder = ThresholdLadder::new(bits).unwrap();
    prop_assert_eq!(ladder.len(), bits as usize - 1);
    for (j, &c) in ladder.linear().iter().enumerate() {
        prop_assert_eq!(c, 2.0_f64.powi(j as i32 - 15));
    }
    prop_assert!(ladder.linear().windows(2).all(|w| w[0] < w[1]));
    prop_assert!(ladder.db().windows(2).all(|w| w[0] < w[1]));
}

#[proptest]
fn satisfied_bracket_is_returned_unchanged(
    #[strategy(-80.0..0.0_f64)] level_db: f64,
    #[strategy(-0.49..0.49_f64)] offset_db: f64,
    #[strategy(-20.0..20.0_f64)] other_distance_db: f64,
    upper_satisfied: bool,
) {
    let satisfied = Bracket::new(level_db, level_db - MARGIN + offset_db);
    let other = Bracket::new(level_db, level_db - MARGIN - other_distance_db);
    let (upper, lower) = if upper_satisfied {
        (satisfied, other)
    } else {
        (other, satisfied)
    };
    let result = interpolate(upper, lower, MARGIN, 0.5).unwrap();
    prop_assert_eq!(result.iterations, 0);
    prop_assert_eq!(result.tolerance_db, 0.5);
    let returned = Bracket::new(result.level_db, result.threshold_db);
    prop_assert!(returned == upper || returned == lower);
    let diff = result.level_db - result.threshold_db - MARGIN;
    prop_assert!(diff.abs() < 0.5);
}

#[proptest]
fn straddling_brackets_converge_without_relaxing(
    #[strategy(strategies::straddling_brackets(MARGIN))] brackets: ((f64, f64), (f64, f64)),
) {
    let ((up_level, up_thr), (lw_level, lw_thr)) = brackets;
    let upper = Bracket::new(up_level, up_thr);
    let lower = Bracket::new(lw_level, lw_thr);
    let result = interpolate(upper, lower, MARGIN, common::INTERPOLATION_TOLERANCE_DB).unwrap();

    prop_assert!(result.iterations < STALL_ITERATIONS);
    let diff = result.level_db - result.threshold_db - MARGIN;
    prop_assert!(diff.abs() <= result.tolerance_db);
    prop_assert!(result.threshold_db >= up_thr.min(lw_thr));
    prop_assert!(result.threshold_db <= up_thr.max(lw_thr));
}

#[proptest(ProptestConfig { cases: 16, ..ProptestConfig::default() })]
fn doubling_the_signal_adds_six_db(
    #[strategy(0.01..0.2_f64)] amplitude: f64,
    #[strategy(200.0..2000.0_f64)] freq_hz: f64,
    #[strategy(1600usize..8000)] on_len: usize,
    #[strategy(0usize..8000)] off_len: usize,
) {
    let x = generators::bursts(amplitude, freq_hz, 16_000, on_len, off_len, 16_000);
    let doubled: Vec<f64> = x.iter().map(|v| v * 2.0).collect();
    let base = active_speech_level(&x, 16_000, 16).unwrap();
    let louder = active_speech_level(&doubled, 16_000, 16).unwrap();
    let six_db = common::amplitude_to_db(2.0);
    prop_assert!(
        (louder.level_db() - base.level_db() - six_db).abs() < 1e-6,
        "{} vs {}",
        louder.level_db(),
        base.level_db()
    );
    prop_assert!((louder.activity - base.activity).abs() < 1e-6);
}

#[proptest(ProptestConfig { cases: 16, ..ProptestConfig::default() })]
fn active_level_never_below_long_term_level(
    #[strategy(strategies::sample_rate())] sample_rate_hz: u32,
    #[strategy(0.01..0.5_f64)] amplitude: f64,
    seed: u64,
) {
    let len = sample_rate_hz as usize;
    let x = generators::uniform_noise(amplitude, len, seed);
    let estimator =
        p56mix_asl::ActiveSpeechLevelEstimator::new(P56Params::default(), sample_rate_hz, 16)
            .unwrap();
    let level = estimator.estimate(&x).unwrap();
    let long_term = x.iter().map(|v| v * v).sum::<f64>() / len as f64;
    // Only samples before the envelope first rises are inactive.
    prop_assert!(level.activity > 0.9, "activity = {}", level.activity);
    prop_assert!(level.mean_square >= long_term * 0.99);
}

#[proptest(ProptestConfig { cases: 16, ..ProptestConfig::default() })]
fn silence_is_degenerate_at_any_rate(
    #[strategy(strategies::sample_rate())] sample_rate_hz: u32,
    #[strategy(0usize..48_000)] len: usize,
) {
    let err = active_speech_level(&generators::silence(len), sample_rate_hz, 16).unwrap_err();
    prop_assert_eq!(
        err,
        AslError::DegenerateSignal {
            active_samples: 0,
            margin_db: None,
        }
    );
}

#[proptest(ProptestConfig { cases: 16, ..ProptestConfig::default() })]
fn polarity_does_not_change_the_level(
    #[strategy(0.01..0.5_f64)] amplitude: f64,
    #[strategy(100.0..3000.0_f64)] freq_hz: f64,
    seed: u64,
) {
    let x: Vec<f64> = generators::sine(amplitude, freq_hz, 16_000, 16_000)
        .iter()
        .zip(generators::uniform_noise(amplitude / 4.0, 16_000, seed))
        .map(|(s, n)| s + n)
        .collect();
    let inverted: Vec<f64> = x.iter().map(|v| -v).collect();
    let a = active_speech_level(&x, 16_000, 16).unwrap();
    let b = active_speech_level(&inverted, 16_000, 16).unwrap();
    let result = compare_f64(
        &[a.mean_square, a.activity, a.threshold],
        &[b.mean_square, b.activity, b.threshold],
        0.0,
    );
    prop_assert_eq!(result.mismatches, 0, "{}", result);
}

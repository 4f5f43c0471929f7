#![no_main]

use libfuzzer_sys::fuzz_target;
use p56mix_asl::interpolation::{Bracket, interpolate};

fuzz_target!(|input: (f64, f64, f64, f64, f64)| {
    let (level_hi, threshold_hi, level_lo, threshold_lo, tolerance) = input;
    let upper = Bracket::new(level_hi, threshold_hi);
    let lower = Bracket::new(level_lo, threshold_lo);
    // Any outcome is fine as long as the search terminates without panicking.
    if let Ok(result) = interpolate(upper, lower, 15.9, tolerance) {
        assert!(result.tolerance_db >= tolerance.abs() || result.tolerance_db.is_nan());
    }
});

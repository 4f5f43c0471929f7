//! Interpolation search for the active level.
//!
//! Given the two thresholds that bracket the margin crossing, bisects the
//! (level, threshold) segment between them until `level - threshold` is
//! within a tolerance of the margin. If convergence stalls, the tolerance
//! is relaxed by 10% on every step from the 20th on, cumulatively.

use crate::error::AslError;

/// Steps after which the tolerance starts to relax.
pub const STALL_ITERATIONS: usize = 20;
/// Factor applied to the tolerance on every step from [`STALL_ITERATIONS`] on.
pub const TOLERANCE_RELAXATION: f64 = 1.1;
/// Hard bound on bisection steps. Only reachable with non-finite input.
pub const MAX_ITERATIONS: usize = 1000;

/// One end of the search segment, both values in dB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// Activity-derived level, `10 * log10(sq / a)`.
    pub level_db: f64,
    /// Threshold, `20 * log10(c)`.
    pub threshold_db: f64,
}

impl Bracket {
    /// Creates a bracket.
    pub const fn new(level_db: f64, threshold_db: f64) -> Self {
        Self {
            level_db,
            threshold_db,
        }
    }

    #[inline]
    fn distance(self, margin_db: f64) -> f64 {
        self.level_db - self.threshold_db - margin_db
    }

    #[inline]
    fn midpoint(self, other: Self) -> Self {
        Self {
            level_db: (self.level_db + other.level_db) / 2.0,
            threshold_db: (self.threshold_db + other.threshold_db) / 2.0,
        }
    }
}

/// Result of the interpolation search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolation {
    /// Interpolated active level in dB.
    pub level_db: f64,
    /// Interpolated threshold in dB.
    pub threshold_db: f64,
    /// Bisection steps taken; zero when a bracket already satisfied the margin.
    pub iterations: usize,
    /// Tolerance at return, after any relaxation.
    pub tolerance_db: f64,
}

impl Interpolation {
    fn at(bracket: Bracket, iterations: usize, tolerance_db: f64) -> Self {
        Self {
            level_db: bracket.level_db,
            threshold_db: bracket.threshold_db,
            iterations,
            tolerance_db,
        }
    }
}

/// Searches between `upper` (the first threshold at or below the margin)
/// and `lower` (the threshold just under it) for the point where
/// `level - threshold == margin` within `tolerance_db`.
///
/// Each step replaces one end of the segment with its midpoint. Tooling that
/// keeps the original ends fixed and moves the midpoint toward them agrees
/// at the default tolerance of 0.5 dB but not below it: between
/// `(-20, -30)` and `(-18, -36)` at 0.01 dB this search stops at
/// `(-18.523, -34.430)` after 7 steps, the fixed-end variant at
/// `(-18.571, -34.286)` after 52.
pub fn interpolate(
    upper: Bracket,
    lower: Bracket,
    margin_db: f64,
    tolerance_db: f64,
) -> Result<Interpolation, AslError> {
    let mut tol = tolerance_db.abs();

    // Either end may already be the active level.
    if upper.distance(margin_db).abs() < tol {
        return Ok(Interpolation::at(upper, 0, tol));
    }
    if lower.distance(margin_db).abs() < tol {
        return Ok(Interpolation::at(lower, 0, tol));
    }

    let (mut upper, mut lower) = (upper, lower);
    let mut mid = upper.midpoint(lower);
    let mut iterations = 0;
    loop {
        let diff = mid.distance(margin_db);
        if diff.abs() <= tol {
            return Ok(Interpolation::at(mid, iterations, tol));
        }
        iterations += 1;
        if iterations > MAX_ITERATIONS {
            return Err(AslError::NonConvergence {
                iterations: MAX_ITERATIONS,
                diff_db: diff,
            });
        }
        if iterations >= STALL_ITERATIONS {
            tol *= TOLERANCE_RELAXATION;
            tracing::trace!(iterations, tol, diff, "relaxing interpolation tolerance");
        }
        if diff > tol {
            lower = mid;
        } else if diff < -tol {
            upper = mid;
        }
        mid = upper.midpoint(lower);
    }
}

//! Buffer comparison utilities.

use std::fmt;

/// Summary of an element-wise comparison between two buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonResult {
    /// Number of compared samples.
    pub len: usize,
    /// Samples whose difference exceeds the tolerance.
    pub mismatches: usize,
    /// Largest absolute difference seen.
    pub max_abs_diff: f64,
    /// Index of the first mismatch, if any.
    pub first_mismatch: Option<usize>,
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} mismatches, max |diff| = {}",
            self.mismatches, self.len, self.max_abs_diff
        )?;
        if let Some(i) = self.first_mismatch {
            write!(f, ", first at {i}")?;
        }
        Ok(())
    }
}

fn compare_by(
    len_a: usize,
    len_b: usize,
    diffs: impl Iterator<Item = f64>,
    tolerance: f64,
) -> ComparisonResult {
    assert_eq!(len_a, len_b, "buffers differ in length");
    let mut result = ComparisonResult {
        len: len_a,
        mismatches: 0,
        max_abs_diff: 0.0,
        first_mismatch: None,
    };
    for (i, d) in diffs.enumerate() {
        result.max_abs_diff = result.max_abs_diff.max(d);
        if d > tolerance {
            result.mismatches += 1;
            result.first_mismatch.get_or_insert(i);
        }
    }
    result
}

/// Compares two float buffers with an absolute tolerance.
pub fn compare_f64(a: &[f64], b: &[f64], tolerance: f64) -> ComparisonResult {
    compare_by(
        a.len(),
        b.len(),
        a.iter().zip(b).map(|(x, y)| (x - y).abs()),
        tolerance,
    )
}

/// Compares two 16-bit buffers with a tolerance in LSBs.
pub fn compare_i16(a: &[i16], b: &[i16], tolerance_lsb: u16) -> ComparisonResult {
    compare_by(
        a.len(),
        b.len(),
        a.iter()
            .zip(b)
            .map(|(&x, &y)| f64::from((i32::from(x) - i32::from(y)).unsigned_abs())),
        f64::from(tolerance_lsb),
    )
}

/// Element-wise `a - b` in 32-bit arithmetic.
pub fn difference_i16(a: &[i16], b: &[i16]) -> Vec<i32> {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| i32::from(x) - i32::from(y))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_buffers_match() {
        let r = compare_i16(&[1, 2, 3], &[1, 2, 3], 0);
        assert_eq!(r.mismatches, 0);
        assert_eq!(r.first_mismatch, None);
        assert_eq!(r.max_abs_diff, 0.0);
    }

    #[test]
    fn tolerance_is_inclusive() {
        let r = compare_i16(&[0, 10, -5], &[1, 12, -5], 1);
        assert_eq!(r.mismatches, 1);
        assert_eq!(r.first_mismatch, Some(1));
        assert_eq!(r.max_abs_diff, 2.0);
        assert!(r.to_string().contains("1/3 mismatches"));
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        let r = compare_i16(&[i16::MIN], &[i16::MAX], 0);
        assert_eq!(r.max_abs_diff, 65535.0);
        assert_eq!(difference_i16(&[i16::MIN], &[i16::MAX]), vec![-65535]);
    }

    #[test]
    fn float_comparison() {
        let r = compare_f64(&[0.0, 1.0], &[1e-9, 1.1], 1e-6);
        assert_eq!(r.mismatches, 1);
        assert_eq!(r.first_mismatch, Some(1));
    }
}

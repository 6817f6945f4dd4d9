//! Weighted cosine similarity.
//!
//! The scoring primitive for influencer matching: cosine similarity computed
//! after elementwise scaling both operands by a weight vector, so some metric
//! dimensions count more than others.
//!
//! # Algorithm
//!
//! ```text
//! score(a, b, w) = dot(a*w, b*w) / (|a*w| * |b*w|)
//! ```
//!
//! The result lies in `[-1, 1]`. If either weighted vector has zero
//! magnitude the score is defined as `0.0`: a degenerate-case policy, not
//! an error, so all-zero profiles rank at the bottom instead of failing.
//!
//! Naive summation is used throughout; the metric vectors are short
//! (around 20 dimensions) so no compensated accumulation is needed.

use crate::{Error, Result};

/// Computes the weighted cosine similarity between two vectors.
///
/// Pure function with no shared state; safe to call concurrently.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] unless `a`, `b`, and `weights` all
/// have the same length. Mismatched operands would otherwise produce a
/// meaningless score, so the check is fail-fast rather than best-effort.
pub fn weighted_cosine(a: &[f32], b: &[f32], weights: &[f32]) -> Result<f32> {
    if b.len() != a.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    if weights.len() != a.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            actual: weights.len(),
        });
    }

    let mut dot = 0.0_f32;
    let mut norm_a = 0.0_f32;
    let mut norm_b = 0.0_f32;

    for ((&x, &y), &w) in a.iter().zip(b.iter()).zip(weights.iter()) {
        let wx = x * w;
        let wy = y * w;
        dot += wx * wy;
        norm_a += wx * wx;
        norm_b += wy * wy;
    }

    let magnitude_a = norm_a.sqrt();
    let magnitude_b = norm_b.sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (magnitude_a * magnitude_b))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Error;

    const TOLERANCE: f32 = 1e-6;

    #[test]
    fn test_identical_vectors_score_one() {
        let v = [1.0, 2.0, 3.0];
        let w = [1.0, 1.0, 1.0];
        let score = weighted_cosine(&v, &v, &w).unwrap();
        assert!((score - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_orthogonal_vectors_score_zero() {
        let a = [1.0, 0.0];
        let b = [0.0, 1.0];
        let w = [1.0, 1.0];
        let score = weighted_cosine(&a, &b, &w).unwrap();
        assert!(score.abs() < TOLERANCE);
    }

    #[test]
    fn test_opposite_vectors_score_negative_one() {
        let a = [1.0, 0.0, 0.0];
        let b = [-1.0, 0.0, 0.0];
        let w = [1.0, 1.0, 1.0];
        let score = weighted_cosine(&a, &b, &w).unwrap();
        assert!((score + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_symmetry() {
        let a = [0.5, 2.0, -1.0, 4.0];
        let b = [1.5, 0.25, 3.0, -2.0];
        let w = [1.0, 2.0, 0.5, 1.0];
        let ab = weighted_cosine(&a, &b, &w).unwrap();
        let ba = weighted_cosine(&b, &a, &w).unwrap();
        assert!((ab - ba).abs() < TOLERANCE);
    }

    #[test]
    fn test_weights_change_the_score() {
        let a = [1.0, 0.0];
        let b = [1.0, 1.0];
        let uniform = weighted_cosine(&a, &b, &[1.0, 1.0]).unwrap();
        // Zeroing the second dimension makes the vectors collinear.
        let skewed = weighted_cosine(&a, &b, &[1.0, 0.0]).unwrap();
        assert!(uniform < skewed);
        assert!((skewed - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_zero_magnitude_scores_exactly_zero() {
        let zero = [0.0, 0.0, 0.0];
        let b = [1.0, 2.0, 3.0];
        let w = [1.0, 1.0, 1.0];
        assert_eq!(weighted_cosine(&zero, &b, &w).unwrap(), 0.0);
        assert_eq!(weighted_cosine(&b, &zero, &w).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_weights_score_exactly_zero() {
        let a = [1.0, 2.0];
        let b = [3.0, 4.0];
        // All-zero weights collapse both operands to zero magnitude.
        assert_eq!(weighted_cosine(&a, &b, &[0.0, 0.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_dimension_mismatch_is_an_error() {
        let a = [1.0, 2.0, 3.0];
        let b = [1.0, 2.0];
        let w = [1.0, 1.0, 1.0];

        let err = weighted_cosine(&a, &b, &w).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));

        let err = weighted_cosine(&a, &a, &[1.0]).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 3,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_score_stays_in_bounds() {
        let a = [3.7, -1.2, 0.4, 9.9, -5.5];
        let b = [-0.3, 8.1, 2.2, -7.6, 1.1];
        let w = [1.0, 0.5, 2.0, 0.25, 3.0];
        let score = weighted_cosine(&a, &b, &w).unwrap();
        assert!((-1.0 - TOLERANCE..=1.0 + TOLERANCE).contains(&score));
    }
}

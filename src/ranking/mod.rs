//! Candidate ranking.
//!
//! Orchestrates scoring across a candidate set: scores every candidate
//! against the target, drops candidates whose vectors are malformed, sorts
//! by descending score, and truncates to the requested top-K.
//!
//! A malformed candidate (wrong dimensionality, non-finite values) is an
//! expected data-quality condition, not a failure: the record came from an
//! external store and one bad row must not abort the whole ranking. Only a
//! target/weight length disagreement is fatal, and that is checked before
//! any per-candidate work begins.

use crate::models::{Candidate, ScoredCandidate};
use crate::similarity::weighted_cosine;
use crate::{Error, Result};

/// Decimal places kept when rounding scores for presentation.
const SCORE_DECIMALS: f32 = 10_000.0;

/// Rounds a score to four decimal places.
fn round_score(score: f32) -> f32 {
    (score * SCORE_DECIMALS).round() / SCORE_DECIMALS
}

/// Ranks candidates against a target vector by weighted cosine similarity.
///
/// Pure and synchronous: performs no I/O and holds no mutable state, so a
/// single `Ranker` can be shared freely across threads.
///
/// # Example
///
/// ```rust
/// use influmatch::models::Candidate;
/// use influmatch::ranking::Ranker;
///
/// let candidates = vec![Candidate::new("1", Some("Ada"), vec![1.0, 0.0])];
/// let ranker = Ranker::new();
/// let top = ranker.rank(&[1.0, 0.0], &[1.0, 1.0], &candidates, 5)?;
/// assert_eq!(top.len(), 1);
/// # Ok::<(), influmatch::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Ranker;

impl Ranker {
    /// Creates a new ranker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Ranks `candidates` against `target`, returning at most `top_k`
    /// results sorted by descending score.
    ///
    /// Candidates that fail to score are excluded from the result set, not
    /// scored as zero. Ties after rounding preserve the relative input
    /// order of the tied candidates. `top_k == 0` yields an empty result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `target` and `weights` have
    /// different lengths. No partial result is produced in that case.
    pub fn rank(
        &self,
        target: &[f32],
        weights: &[f32],
        candidates: &[Candidate],
        top_k: usize,
    ) -> Result<Vec<ScoredCandidate>> {
        if weights.len() != target.len() {
            return Err(Error::DimensionMismatch {
                expected: target.len(),
                actual: weights.len(),
            });
        }

        if top_k == 0 {
            return Ok(Vec::new());
        }

        let mut scored: Vec<ScoredCandidate> = Vec::with_capacity(candidates.len());
        let mut skipped = 0_usize;

        for candidate in candidates {
            match weighted_cosine(target, &candidate.vector, weights) {
                Ok(score) if score.is_finite() => {
                    scored.push(ScoredCandidate {
                        id: candidate.id.clone(),
                        name: candidate.display_name().to_string(),
                        score: round_score(score),
                    });
                },
                Ok(_) => {
                    skipped += 1;
                    tracing::debug!(
                        id = %candidate.id,
                        "skipping candidate with non-finite score"
                    );
                },
                Err(e) => {
                    skipped += 1;
                    tracing::debug!(
                        id = %candidate.id,
                        error = %e,
                        "skipping malformed candidate"
                    );
                },
            }
        }

        // Stable sort: candidates that tie after rounding keep input order.
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_k);

        tracing::debug!(
            total = candidates.len(),
            skipped,
            returned = scored.len(),
            "ranking complete"
        );

        Ok(scored)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::Candidate;

    fn candidate(id: &str, vector: Vec<f32>) -> Candidate {
        Candidate::new(id, None, vector)
    }

    #[test]
    fn test_rank_basic_example() {
        // Worked example: id=3 scores -1.0 and falls outside the top 2.
        let candidates = vec![
            candidate("1", vec![1.0, 0.0, 0.0]),
            candidate("2", vec![0.0, 1.0, 0.0]),
            candidate("3", vec![-1.0, 0.0, 0.0]),
        ];

        let ranker = Ranker::new();
        let top = ranker
            .rank(&[1.0, 0.0, 0.0], &[1.0, 1.0, 1.0], &candidates, 2)
            .unwrap();

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].id.as_str(), "1");
        assert!((top[0].score - 1.0).abs() < f32::EPSILON);
        assert_eq!(top[1].id.as_str(), "2");
        assert!(top[1].score.abs() < f32::EPSILON);
    }

    #[test]
    fn test_rank_top_k_zero_is_empty_not_error() {
        let candidates = vec![candidate("1", vec![1.0, 2.0])];
        let ranker = Ranker::new();
        let result = ranker
            .rank(&[1.0, 2.0], &[1.0, 1.0], &candidates, 0)
            .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_rank_mismatched_weights_is_fatal() {
        let candidates = vec![candidate("1", vec![1.0, 2.0, 3.0])];
        let ranker = Ranker::new();
        let err = ranker
            .rank(&[1.0, 2.0, 3.0], &[1.0, 1.0], &candidates, 5)
            .unwrap_err();
        assert!(matches!(
            err,
            crate::Error::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_rank_drops_malformed_candidates() {
        let candidates = vec![
            candidate("good-1", vec![1.0, 0.0, 0.0]),
            candidate("bad", vec![1.0, 0.0]), // wrong dimensionality
            candidate("good-2", vec![0.5, 0.5, 0.0]),
        ];
        let without_bad = vec![candidates[0].clone(), candidates[2].clone()];

        let ranker = Ranker::new();
        let target = [1.0, 0.0, 0.0];
        let weights = [1.0, 1.0, 1.0];

        let with = ranker.rank(&target, &weights, &candidates, 10).unwrap();
        let without = ranker.rank(&target, &weights, &without_bad, 10).unwrap();

        assert_eq!(with, without);
        assert_eq!(with.len(), 2);
    }

    #[test]
    fn test_rank_drops_non_finite_vectors() {
        let candidates = vec![
            candidate("nan", vec![f32::NAN, 0.0]),
            candidate("ok", vec![1.0, 0.0]),
        ];

        let ranker = Ranker::new();
        let top = ranker
            .rank(&[1.0, 0.0], &[1.0, 1.0], &candidates, 10)
            .unwrap();

        assert_eq!(top.len(), 1);
        assert_eq!(top[0].id.as_str(), "ok");
    }

    #[test]
    fn test_rank_never_exceeds_candidate_count() {
        let candidates = vec![
            candidate("1", vec![1.0, 0.0]),
            candidate("2", vec![0.0, 1.0]),
        ];
        let ranker = Ranker::new();
        let top = ranker
            .rank(&[1.0, 1.0], &[1.0, 1.0], &candidates, 100)
            .unwrap();
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn test_rank_sorted_non_increasing() {
        let candidates = vec![
            candidate("low", vec![-1.0, 0.5]),
            candidate("high", vec![2.0, 1.0]),
            candidate("mid", vec![1.0, -0.5]),
        ];
        let ranker = Ranker::new();
        let top = ranker
            .rank(&[2.0, 1.0], &[1.0, 1.0], &candidates, 10)
            .unwrap();

        for pair in top.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_rank_ties_preserve_input_order() {
        // Both candidates are collinear with the target and tie at 1.0.
        let candidates = vec![
            candidate("first", vec![1.0, 1.0]),
            candidate("second", vec![2.0, 2.0]),
            candidate("third", vec![3.0, 3.0]),
        ];
        let ranker = Ranker::new();
        let top = ranker
            .rank(&[1.0, 1.0], &[1.0, 1.0], &candidates, 10)
            .unwrap();

        let ids: Vec<&str> = top.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "third"]);
    }

    #[test]
    fn test_rank_degenerate_candidate_is_retained() {
        // Zero-magnitude candidates score 0.0 and rank, not drop.
        let candidates = vec![
            candidate("zero", vec![0.0, 0.0]),
            candidate("aligned", vec![1.0, 0.0]),
        ];
        let ranker = Ranker::new();
        let top = ranker
            .rank(&[1.0, 0.0], &[1.0, 1.0], &candidates, 10)
            .unwrap();

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].id.as_str(), "aligned");
        assert_eq!(top[1].id.as_str(), "zero");
        assert!((top[1].score).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rank_empty_candidates() {
        let ranker = Ranker::new();
        let top = ranker.rank(&[1.0], &[1.0], &[], 5).unwrap();
        assert!(top.is_empty());
    }

    #[test]
    fn test_score_rounding() {
        assert!((round_score(0.123_456) - 0.1235).abs() < f32::EPSILON);
        assert!((round_score(-0.999_96) + 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_names_carried_through() {
        let candidates = vec![
            Candidate::new("1", Some("Ada"), vec![1.0]),
            Candidate::new("2", None, vec![0.5]),
        ];
        let ranker = Ranker::new();
        let top = ranker.rank(&[1.0], &[1.0], &candidates, 10).unwrap();

        assert_eq!(top[0].name, "Ada");
        assert_eq!(top[1].name, "Unknown");
    }
}

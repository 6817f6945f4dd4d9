//! Match request and result types.

use super::{CandidateId, Platform};
use serde::{Deserialize, Serialize};

/// Default number of results returned when the caller does not specify one.
pub const DEFAULT_TOP_K: usize = 5;

/// A request to match stored candidates against a target profile.
///
/// `target_vector` and `weights` must have equal length; the mismatch is
/// rejected before any candidate is scored.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchRequest {
    /// The target feature vector to match against.
    pub target_vector: Vec<f32>,
    /// Per-dimension weights scaling each feature's contribution.
    pub weights: Vec<f32>,
    /// Maximum number of results to return (default 5).
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Which platform's candidates to rank (default facebook).
    #[serde(default)]
    pub platform: Platform,
}

const fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

impl MatchRequest {
    /// Creates a request with the default top-K and platform.
    #[must_use]
    pub const fn new(target_vector: Vec<f32>, weights: Vec<f32>) -> Self {
        Self {
            target_vector,
            weights,
            top_k: DEFAULT_TOP_K,
            platform: Platform::Facebook,
        }
    }

    /// Sets the result limit.
    #[must_use]
    pub const fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Sets the platform selector.
    #[must_use]
    pub const fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }
}

/// A candidate with its similarity score against the target.
///
/// Scores are weighted cosine similarities in `[-1, 1]`, rounded to four
/// decimal places for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// Candidate identifier.
    pub id: CandidateId,
    /// Display name ("Unknown" when the record had none).
    pub name: String,
    /// Weighted cosine similarity score.
    pub score: f32,
}

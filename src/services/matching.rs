//! Influencer matching service.

use crate::Result;
use crate::models::{MatchRequest, ScoredCandidate};
use crate::ranking::Ranker;
use crate::storage::CandidateStore;
use std::sync::Arc;

/// Service that matches stored candidates against a target profile.
///
/// Owns a [`CandidateStore`] handle (injected at construction; there is no
/// ambient global client) and delegates the actual computation to the pure
/// [`Ranker`]. The store decides *which* candidates exist for a platform;
/// the ranker decides *how well* each one matches.
pub struct MatchService {
    store: Arc<dyn CandidateStore>,
    ranker: Ranker,
}

impl MatchService {
    /// Creates a new match service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn CandidateStore>) -> Self {
        Self {
            store,
            ranker: Ranker::new(),
        }
    }

    /// Ranks the requested platform's candidates against the target vector.
    ///
    /// Returns at most `top_k` results; possibly fewer (or none) when the
    /// platform has few valid candidates, never a partial or corrupt list.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DimensionMismatch`] when the target and
    /// weight vectors disagree in length, or an error if the store cannot
    /// be read. Malformed individual candidates are dropped, not errors.
    pub fn match_candidates(&self, request: &MatchRequest) -> Result<Vec<ScoredCandidate>> {
        let candidates = self.store.fetch(request.platform)?;

        let matches = self.ranker.rank(
            &request.target_vector,
            &request.weights,
            &candidates,
            request.top_k,
        )?;

        tracing::info!(
            platform = %request.platform,
            candidates = candidates.len(),
            returned = matches.len(),
            top_k = request.top_k,
            "match complete"
        );
        Ok(matches)
    }
}

//! In-memory candidate store.

use crate::Result;
use crate::models::{Candidate, Platform};
use crate::storage::CandidateStore;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory candidate store.
///
/// Keeps one candidate list per platform behind an `RwLock`. Useful for
/// tests and for embedding the matcher without a database.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    candidates: RwLock<HashMap<Platform, Vec<Candidate>>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with candidates for one platform.
    #[must_use]
    pub fn with_candidates(platform: Platform, candidates: Vec<Candidate>) -> Self {
        let store = Self::new();
        if let Ok(mut map) = store.candidates.write() {
            map.insert(platform, candidates);
        }
        store
    }

    fn poisoned(operation: &str) -> crate::Error {
        crate::Error::OperationFailed {
            operation: operation.to_string(),
            cause: "store lock poisoned".to_string(),
        }
    }
}

impl CandidateStore for InMemoryStore {
    fn fetch(&self, platform: Platform) -> Result<Vec<Candidate>> {
        let map = self
            .candidates
            .read()
            .map_err(|_| Self::poisoned("fetch_candidates"))?;
        Ok(map.get(&platform).cloned().unwrap_or_default())
    }

    fn upsert(&self, platform: Platform, candidate: Candidate) -> Result<()> {
        let mut map = self
            .candidates
            .write()
            .map_err(|_| Self::poisoned("upsert_candidate"))?;
        let entries = map.entry(platform).or_default();

        if let Some(existing) = entries.iter_mut().find(|c| c.id == candidate.id) {
            *existing = candidate;
        } else {
            entries.push(candidate);
        }
        Ok(())
    }

    fn count(&self, platform: Platform) -> Result<usize> {
        let map = self
            .candidates
            .read()
            .map_err(|_| Self::poisoned("count_candidates"))?;
        Ok(map.get(&platform).map_or(0, Vec::len))
    }

    fn clear(&self, platform: Platform) -> Result<()> {
        let mut map = self
            .candidates
            .write()
            .map_err(|_| Self::poisoned("clear_candidates"))?;
        map.remove(&platform);
        Ok(())
    }
}

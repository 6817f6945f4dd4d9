//! Candidate storage backends.
//!
//! Provides the abstraction layer between the ranking core and wherever
//! influencer profiles are actually persisted. The core consumes an
//! in-memory sequence of validated [`Candidate`]s; backends are responsible
//! for filtering out records without vectors and for rejecting malformed
//! rows at the boundary.
//!
//! # Available Implementations
//!
//! | Backend | Use Case |
//! |---------|----------|
//! | [`InMemoryStore`] | Tests, embedding in other programs |
//! | [`SqliteStore`] | Local single-file persistence |

mod memory;
mod sqlite;

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;

use crate::Result;
use crate::models::{Candidate, Platform};

/// Trait for candidate storage backends.
///
/// Backends hold one collection of candidate profiles per [`Platform`] and
/// hand the ranking layer fully materialized, validated candidates.
/// Implementations must be thread-safe (`Send + Sync`).
///
/// # Implementor Notes
///
/// - Methods take `&self` to enable sharing via `Arc<dyn CandidateStore>`
/// - Use interior mutability (e.g. `Mutex`, `RwLock`) for mutable state
/// - `fetch` must only return candidates that actually have a vector;
///   rows that fail validation are skipped, not surfaced as errors
pub trait CandidateStore: Send + Sync {
    /// Returns all candidates stored for a platform.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn fetch(&self, platform: Platform) -> Result<Vec<Candidate>>;

    /// Inserts or replaces a candidate under a platform.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn upsert(&self, platform: Platform, candidate: Candidate) -> Result<()>;

    /// Returns the number of candidates stored for a platform.
    ///
    /// # Errors
    ///
    /// Returns an error if the count operation fails.
    fn count(&self, platform: Platform) -> Result<usize>;

    /// Removes all candidates stored for a platform.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn clear(&self, platform: Platform) -> Result<()>;
}

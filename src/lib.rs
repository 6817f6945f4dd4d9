//! # Influmatch
//!
//! Influencer matching service using weighted cosine similarity.
//!
//! Influmatch ranks stored influencer profiles against a caller-supplied
//! target metric vector. Each profile carries a fixed-length feature vector
//! (engagement metrics, audience demographics); the caller supplies a target
//! vector plus per-dimension weights and receives the top-K closest profiles
//! by weighted cosine similarity.
//!
//! ## Architecture
//!
//! - Pure scoring core ([`similarity`], [`ranking`]) with no I/O
//! - Pluggable candidate stores ([`storage`]: in-memory, SQLite)
//! - CSV ingestion of influencer metric spreadsheets ([`ingest`])
//! - HTTP API ([`http`]) and CLI binary on top
//!
//! ## Example
//!
//! ```rust
//! use influmatch::models::Candidate;
//! use influmatch::ranking::Ranker;
//!
//! let candidates = vec![
//!     Candidate::new("1", Some("Ada"), vec![1.0, 0.0, 0.0]),
//!     Candidate::new("2", Some("Grace"), vec![0.0, 1.0, 0.0]),
//! ];
//!
//! let ranker = Ranker::new();
//! let top = ranker.rank(&[1.0, 0.0, 0.0], &[1.0, 1.0, 1.0], &candidates, 1)?;
//! assert_eq!(top[0].id.as_str(), "1");
//! # Ok::<(), influmatch::Error>(())
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod http;
pub mod ingest;
pub mod models;
pub mod observability;
pub mod ranking;
pub mod services;
pub mod similarity;
pub mod storage;

// Re-exports for convenience
pub use config::MatchConfig;
pub use models::{Candidate, CandidateId, MatchRequest, Platform, ScoredCandidate};
pub use ranking::Ranker;
pub use services::MatchService;
pub use storage::{CandidateStore, InMemoryStore, SqliteStore};

/// Error type for influmatch operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Malformed requests, unparseable CLI vectors, bad CSV headers |
/// | `DimensionMismatch` | Target/weight vector length disagreement |
/// | `OperationFailed` | I/O errors, database failures, serve/bind failures |
///
/// A single malformed candidate record is deliberately *not* an error: bad
/// rows from the store are dropped during ranking (the data originates from
/// an external, not-fully-trusted source) and only logged.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Paired vectors have different lengths.
    ///
    /// Fatal to the whole ranking call: raised before any per-candidate
    /// work when the target and weight vectors disagree, and by the
    /// similarity function itself when handed mismatched operands.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The expected dimensionality.
        expected: usize,
        /// The dimensionality actually supplied.
        actual: usize,
    },

    /// An operation failed.
    ///
    /// Raised when:
    /// - `SQLite` database operations fail
    /// - Filesystem or CSV I/O errors occur
    /// - The HTTP server cannot bind or serve
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for influmatch operations.
pub type Result<T> = std::result::Result<T, Error>;

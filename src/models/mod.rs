//! Core data types for influencer matching.

mod candidate;
mod ranking;

pub use candidate::{Candidate, CandidateId, CandidateRecord, Platform, UNKNOWN_NAME};
pub use ranking::{DEFAULT_TOP_K, MatchRequest, ScoredCandidate};

//! Service layer orchestrating storage and ranking.

mod matching;

pub use matching::MatchService;

//! Candidate identity, platform selector, and record validation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display name used when a candidate record has no name field.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Unique identifier for a candidate profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(String);

impl CandidateId {
    /// Creates a new candidate ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CandidateId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CandidateId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Social-media platform a candidate's metrics were collected from.
///
/// Acts as the data-source selector: each platform maps to its own
/// collection of stored profiles. Selection happens in the storage layer;
/// the ranking core never sees this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Facebook page metrics.
    #[default]
    Facebook,
    /// `YouTube` channel metrics.
    Youtube,
    /// `TikTok` account metrics.
    Tiktok,
}

impl Platform {
    /// Returns all platform variants.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Facebook, Self::Youtube, Self::Tiktok]
    }

    /// Returns the platform as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Youtube => "youtube",
            Self::Tiktok => "tiktok",
        }
    }

    /// Parses a platform string (case-insensitive).
    ///
    /// Returns `None` for unrecognized platforms; callers at the API
    /// boundary turn that into a rejection rather than an empty result.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "facebook" => Some(Self::Facebook),
            "youtube" => Some(Self::Youtube),
            "tiktok" => Some(Self::Tiktok),
            _ => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| {
            Error::InvalidInput(format!(
                "unknown platform '{s}' (expected one of: facebook, youtube, tiktok)"
            ))
        })
    }
}

/// A validated candidate profile, ready for ranking.
///
/// Candidates are materialized read-only for the duration of one ranking
/// call; the core neither mutates nor persists them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique identifier.
    pub id: CandidateId,
    /// Display name (absent in some source records).
    pub name: Option<String>,
    /// Fixed-length feature vector of metric values.
    pub vector: Vec<f32>,
}

impl Candidate {
    /// Creates a new candidate.
    #[must_use]
    pub fn new(id: impl Into<CandidateId>, name: Option<&str>, vector: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            name: name.map(String::from),
            vector,
        }
    }

    /// Returns the display name, falling back to [`UNKNOWN_NAME`].
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_NAME)
    }
}

/// A raw candidate record as it arrives from an external source.
///
/// Source data (spreadsheet exports, third-party scrapes) is not fully
/// trusted: the vector may be missing or carry non-finite values. Records
/// are validated here, at the data-access boundary, so the ranking core
/// only ever sees well-formed [`Candidate`]s.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateRecord {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Feature vector, if the record has one.
    #[serde(default)]
    pub vector: Option<Vec<f32>>,
}

impl CandidateRecord {
    /// Validates the record and converts it into a [`Candidate`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the id is empty, the vector is
    /// missing or empty, or any entry is non-finite (NaN or infinite).
    pub fn into_candidate(self) -> Result<Candidate> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidInput(
                "candidate record has an empty id".to_string(),
            ));
        }

        let vector = self
            .vector
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::InvalidInput(format!("candidate '{}' has no vector", self.id)))?;

        if let Some(pos) = vector.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "candidate '{}' has a non-finite value at dimension {pos}",
                self.id
            )));
        }

        Ok(Candidate {
            id: CandidateId::new(self.id),
            name: self.name,
            vector,
        })
    }
}

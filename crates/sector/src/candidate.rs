//! Candidate types.
//!
//! - [`CandidateId`]: Stable, unique key for a candidate
//! - [`Candidate`]: A roster entry with its raw score
//! - [`WeightedCandidate`]: A candidate paired with its normalized weight

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a candidate.
///
/// `CandidateId` wraps the display key supplied by the roster provider.
/// Identifiers are ordered lexically, which gives the selection filter a
/// deterministic iteration order.
///
/// # Example
///
/// ```
/// use sector::CandidateId;
///
/// let id = CandidateId::new("ada");
/// assert_eq!(id.as_str(), "ada");
/// assert_eq!(id, CandidateId::from("ada"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(String);

impl CandidateId {
    /// Creates a new `CandidateId` from a string.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Returns the identifier as a string slice.
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

impl From<&str> for CandidateId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CandidateId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A roster entry.
///
/// Scores are non-negative "how often has this candidate already been
/// picked" style counts; lower scores are favored by the probability engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Stable unique key
    pub id: CandidateId,
    /// Raw fitness score (finite, `>= 0`)
    pub raw_score: f64,
    /// Excluded candidates never reach the probability engine
    #[serde(default)]
    pub excluded: bool,
}

impl Candidate {
    /// Creates an active (not excluded) candidate.
    #[must_use]
    pub fn new(id: impl Into<CandidateId>, raw_score: f64) -> Self {
        Self {
            id: id.into(),
            raw_score,
            excluded: false,
        }
    }

    /// Returns a copy of this candidate marked as excluded.
    #[must_use]
    pub fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }
}

/// A candidate with its normalized selection probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedCandidate {
    /// Candidate key
    pub id: CandidateId,
    /// Selection probability in `(0, 1]`
    pub weight: f64,
}

impl WeightedCandidate {
    /// Creates a weighted candidate.
    #[must_use]
    pub fn new(id: impl Into<CandidateId>, weight: f64) -> Self {
        Self {
            id: id.into(),
            weight,
        }
    }

    /// Weight expressed as a percentage, as shown in the roster table.
    #[must_use]
    pub fn percent(&self) -> f64 {
        self.weight * 100.0
    }
}

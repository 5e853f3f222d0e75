//! Input errors.
//!
//! Every variant means "refuse to start this attempt"; none of them leave a
//! wheel in an unusable state.

use thiserror::Error;

use crate::candidate::CandidateId;

/// Errors raised for invalid rosters, configurations or segment lists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// No active candidates remain after exclusion.
    #[error("no candidates left to spin")]
    NoCandidates,
    /// Two roster entries share an id.
    #[error("candidate {0} appears more than once")]
    DuplicateCandidate(CandidateId),
    /// A raw score is negative or not finite.
    #[error("candidate {id} has invalid score {score}")]
    InvalidScore {
        /// Offending candidate
        id: CandidateId,
        /// Offending score
        score: f64,
    },
    /// A referenced candidate has no segment on the wheel.
    #[error("candidate {0} is not on the wheel")]
    UnknownCandidate(CandidateId),
    /// A segment list does not partition the circle.
    #[error("malformed segments: {0}")]
    MalformedSegments(String),
    /// A configuration value is outside its valid range.
    #[error("invalid {field}: {reason}")]
    InvalidConfig {
        /// Configuration field name
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
    /// A targeted spin asked for less rotation than the ramps alone produce.
    #[error("target rotation {requested:.3} rad is below the minimum {minimum:.3} rad")]
    UnreachableTarget {
        /// Requested total rotation
        requested: f64,
        /// Rotation produced with a zero-length constant phase
        minimum: f64,
    },
}

impl InputError {
    /// Shorthand for [`InputError::InvalidConfig`].
    #[must_use]
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_neutral() {
        assert_eq!(InputError::NoCandidates.to_string(), "no candidates left to spin");
        let err = InputError::invalid_config("accel_duration", "must be positive");
        assert_eq!(err.to_string(), "invalid accel_duration: must be positive");
    }
}

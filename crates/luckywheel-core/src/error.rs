//! Errors raised by wheel operations.

use thiserror::Error;

use sector::{CandidateId, InputError};

/// A winner source failed or returned something unusable.
///
/// The attempt is abandoned before any animation and the wheel returns to
/// idle. Nothing is retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExternalSourceError {
    /// The source could not be reached.
    #[error("winner source unavailable: {0}")]
    Transport(String),
    /// The source answered with an error message.
    #[error("winner source reported an error: {0}")]
    Reported(String),
    /// The response body did not parse.
    #[error("malformed winner source response: {0}")]
    Malformed(String),
    /// The named winner is not on the wheel.
    #[error("winner source named {0}, who is not on the wheel")]
    UnknownWinner(CandidateId),
    /// The target angle is NaN or infinite.
    #[error("winner source sent a non-finite target angle ({0})")]
    NonFiniteAngle(f64),
    /// The target angle lands on a different candidate's segment.
    #[error("target angle {angle_degrees}° is outside {winner}'s segment")]
    AngleOutsideWinner {
        /// Named winner
        winner: CandidateId,
        /// Target angle as sent
        angle_degrees: f64,
    },
}

/// Any error a [`Wheel`](crate::wheel::Wheel) operation can return.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WheelError {
    /// Invalid roster, segments or configuration.
    #[error(transparent)]
    Input(#[from] InputError),
    /// The winner source failed.
    #[error(transparent)]
    External(#[from] ExternalSourceError),
}

//! Winner sources: who decides the outcome before the wheel moves.
//!
//! In the authority path the winner is fixed first and the spin is then
//! steered onto it. A [`WinnerSource`] answers with a [`RemoteResponse`],
//! the same shape whether it came over the wire from a selection service or
//! was produced in-process by [`LocalWinnerSource`]. The core validates the
//! answer against the current segments and never second-guesses a valid one.
//!
//! # Wire format
//!
//! ```json
//! { "targetAngleDegrees": 137.5, "winnerId": "ada" }
//! { "error": "roster is locked" }
//! ```
//!
//! `targetAngleDegrees` is the wheel angle, clockwise from segment origin,
//! that must come to rest under the pointer.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use sector::angle::{to_degrees, to_radians};
use sector::{normalize, pick_weighted, target_angle_for, CandidateId, Segment, WeightedCandidate, FULL_TURN};

use crate::error::ExternalSourceError;

/// Successful answer of a winner source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSelection {
    /// Pointer angle to stop at, in degrees
    pub target_angle_degrees: f64,
    /// Chosen candidate
    pub winner_id: CandidateId,
}

/// Response body of a winner source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteResponse {
    /// The source refused
    Failure {
        /// Human-readable reason
        error: String,
    },
    /// The source picked a winner
    Selection(RemoteSelection),
}

impl RemoteResponse {
    /// Parse a response body.
    ///
    /// # Errors
    ///
    /// Returns [`ExternalSourceError::Malformed`] if the body is not one of
    /// the two accepted shapes.
    pub fn from_json(body: &str) -> Result<Self, ExternalSourceError> {
        serde_json::from_str(body).map_err(|e| ExternalSourceError::Malformed(e.to_string()))
    }

    /// Check the response against the current segments.
    ///
    /// # Errors
    ///
    /// Returns [`ExternalSourceError::Reported`] for a failure response,
    /// [`ExternalSourceError::UnknownWinner`] if no segment belongs to the
    /// winner, [`ExternalSourceError::NonFiniteAngle`] for a NaN or infinite
    /// angle, and [`ExternalSourceError::AngleOutsideWinner`] if the angle
    /// falls in another candidate's segment.
    pub fn validate(self, segments: &[Segment]) -> Result<ValidatedSelection, ExternalSourceError> {
        let selection = match self {
            Self::Failure { error } => return Err(ExternalSourceError::Reported(error)),
            Self::Selection(selection) => selection,
        };

        let segment = segments
            .iter()
            .find(|seg| seg.candidate_id == selection.winner_id)
            .ok_or_else(|| ExternalSourceError::UnknownWinner(selection.winner_id.clone()))?;

        let degrees = selection.target_angle_degrees;
        if !degrees.is_finite() {
            return Err(ExternalSourceError::NonFiniteAngle(degrees));
        }

        let pointer_angle = normalize(to_radians(degrees));
        if !segment.contains(pointer_angle) {
            return Err(ExternalSourceError::AngleOutsideWinner {
                winner: selection.winner_id,
                angle_degrees: degrees,
            });
        }

        Ok(ValidatedSelection {
            winner: selection.winner_id,
            pointer_angle,
        })
    }
}

/// A response that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSelection {
    /// Candidate the spin must land on
    pub winner: CandidateId,
    /// Pointer angle in radians, normalized to `[0, 2π)`
    pub pointer_angle: f64,
}

/// Something that picks the winner before the wheel spins.
///
/// Called synchronously once per attempt, with the segments the spin will
/// run on. The wheel is busy until it returns.
pub trait WinnerSource {
    /// Choose a winner and a target angle.
    ///
    /// # Errors
    ///
    /// Returns [`ExternalSourceError::Transport`] or
    /// [`ExternalSourceError::Malformed`] when no response could be
    /// obtained. Refusals are reported as [`RemoteResponse::Failure`].
    fn select_winner(&mut self, segments: &[Segment]) -> Result<RemoteResponse, ExternalSourceError>;
}

/// In-process winner source: weighted draw, then a random angle inside the
/// winner's segment.
///
/// Segment spans are proportional to weights, so drawing by span is the
/// same distribution as letting the wheel stop at random.
#[derive(Debug, Clone)]
pub struct LocalWinnerSource {
    rng: ChaCha8Rng,
}

impl LocalWinnerSource {
    /// Source with its own seeded RNG stream.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl WinnerSource for LocalWinnerSource {
    fn select_winner(&mut self, segments: &[Segment]) -> Result<RemoteResponse, ExternalSourceError> {
        let weights: Vec<WeightedCandidate> = segments
            .iter()
            .map(|seg| WeightedCandidate::new(seg.candidate_id.clone(), seg.span() / FULL_TURN))
            .collect();

        let Some(index) = pick_weighted(&weights, &mut self.rng) else {
            return Ok(RemoteResponse::Failure {
                error: "no candidates to choose from".to_string(),
            });
        };
        let winner = weights[index].id.clone();
        let angle = target_angle_for(&winner, segments, &mut self.rng)
            .map_err(|e| ExternalSourceError::Reported(e.to_string()))?;

        debug!(%winner, angle, "local source picked winner");
        Ok(RemoteResponse::Selection(RemoteSelection {
            target_angle_degrees: to_degrees(angle),
            winner_id: winner,
        }))
    }
}

/// Winner source over a JSON transport.
///
/// `fetch` performs one request and returns the response body, or a
/// transport error description. Any blocking client fits behind it.
pub struct JsonSource<F> {
    fetch: F,
}

impl<F> JsonSource<F>
where
    F: FnMut() -> Result<String, String>,
{
    /// Wrap a fetch function.
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

impl<F> WinnerSource for JsonSource<F>
where
    F: FnMut() -> Result<String, String>,
{
    fn select_winner(&mut self, _segments: &[Segment]) -> Result<RemoteResponse, ExternalSourceError> {
        let body = (self.fetch)().map_err(ExternalSourceError::Transport)?;
        RemoteResponse::from_json(&body)
    }
}

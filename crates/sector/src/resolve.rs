//! Resolver: rotation to winner, and winner to target angle.
//!
//! # Pointer convention
//!
//! The pointer is fixed at wheel angle `0`. Rotating the wheel by `r` radians
//! brings wheel angle `-r` under the pointer, so the forward query looks up
//! `normalize(-rotation)` and the inverse query returns the pointer angle a
//! spin must stop at; a caller turns it into a rotation `-angle + k·2π`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::angle::{pointer_angle, to_radians};
use crate::candidate::CandidateId;
use crate::error::InputError;
use crate::segment::Segment;

/// Default inward margin for target angles, in degrees.
pub const DEFAULT_MARGIN_DEGREES: f64 = 1.0;

/// Default inward margin for target angles, as a fraction of the span.
pub const DEFAULT_MARGIN_FRACTION: f64 = 0.05;

/// Outcome of a forward resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// The candidate under the pointer
    Winner(CandidateId),
    /// No segment covers the pointer angle
    Undetermined,
}

impl Resolution {
    /// The winning id, if any.
    #[must_use]
    pub fn winner(&self) -> Option<&CandidateId> {
        match self {
            Self::Winner(id) => Some(id),
            Self::Undetermined => None,
        }
    }
}

/// Find the candidate under the pointer after `rotation` radians.
///
/// `rotation` may be any finite magnitude; many full turns are fine. Segments
/// are scanned in stored order. Returns [`Resolution::Undetermined`] when no
/// segment matches, which for a well-formed list only happens when it is
/// empty.
///
/// # Example
///
/// ```
/// use sector::{build_segments, resolve, Resolution, WeightedCandidate};
/// use std::f64::consts::PI;
///
/// let segments = build_segments(&[
///     WeightedCandidate::new("ada", 0.5),
///     WeightedCandidate::new("bob", 0.5),
/// ]);
/// // A quarter turn forward puts wheel angle 3π/2 (bob's half) under the pointer.
/// assert_eq!(resolve(PI / 2.0, &segments), Resolution::Winner("bob".into()));
/// assert_eq!(resolve(0.0, &[]), Resolution::Undetermined);
/// ```
#[must_use]
pub fn resolve(rotation: f64, segments: &[Segment]) -> Resolution {
    let angle = pointer_angle(rotation);
    segments
        .iter()
        .find(|seg| seg.contains(angle))
        .map_or(Resolution::Undetermined, |seg| {
            Resolution::Winner(seg.candidate_id.clone())
        })
}

/// Pick a random pointer angle strictly inside `candidate_id`'s segment.
///
/// Uses the default margin of `min(1°, 5% of span)` on both sides.
///
/// # Errors
///
/// Returns [`InputError::UnknownCandidate`] when no segment belongs to
/// `candidate_id`.
pub fn target_angle_for<R: Rng + ?Sized>(
    candidate_id: &CandidateId,
    segments: &[Segment],
    rng: &mut R,
) -> Result<f64, InputError> {
    target_angle_with_margin(
        candidate_id,
        segments,
        rng,
        to_radians(DEFAULT_MARGIN_DEGREES),
        DEFAULT_MARGIN_FRACTION,
    )
}

/// Pick a random pointer angle inside a segment with an explicit margin.
///
/// The margin is `min(margin_radians, margin_fraction * span)`, with
/// negative or NaN inputs treated as zero. When the segment is no wider than
/// twice that margin, its centre is returned.
///
/// # Errors
///
/// Returns [`InputError::UnknownCandidate`] when no segment belongs to
/// `candidate_id`.
pub fn target_angle_with_margin<R: Rng + ?Sized>(
    candidate_id: &CandidateId,
    segments: &[Segment],
    rng: &mut R,
    margin_radians: f64,
    margin_fraction: f64,
) -> Result<f64, InputError> {
    let segment = segments
        .iter()
        .find(|seg| &seg.candidate_id == candidate_id)
        .ok_or_else(|| InputError::UnknownCandidate(candidate_id.clone()))?;

    let span = segment.span();
    // Negative or NaN margins count as zero
    let margin = margin_radians.max(0.0).min(span * margin_fraction.max(0.0));
    let low = segment.start_angle + margin;
    let high = segment.end_angle - margin;

    if span <= 2.0 * margin || low >= high {
        return Ok(segment.mid_angle());
    }
    Ok(rng.gen_range(low..high))
}

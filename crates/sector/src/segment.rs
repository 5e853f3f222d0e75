//! Segment builder: weights to contiguous angular intervals.
//!
//! Segments are laid out in roster order starting at wheel angle `0`. Each
//! segment is half-open, `[start_angle, end_angle)`, and the list partitions
//! `[0, 2π)` exactly: every `end_angle` is bit-identical to the next
//! `start_angle`, and the last `end_angle` is clamped to [`FULL_TURN`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::angle::{to_degrees, FULL_TURN};
use crate::candidate::{CandidateId, WeightedCandidate};
use crate::error::InputError;

/// Angular interval owned by one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Owner of this interval
    pub candidate_id: CandidateId,
    /// Inclusive start, radians in `[0, 2π)`
    pub start_angle: f64,
    /// Exclusive end, radians in `(start_angle, 2π]`
    pub end_angle: f64,
}

impl Segment {
    /// Angular width in radians.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Centre angle in radians.
    #[must_use]
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    /// Half-open containment test.
    #[must_use]
    pub fn contains(&self, angle: f64) -> bool {
        self.start_angle <= angle && angle < self.end_angle
    }

    /// Bounds in degrees, clockwise from the pointer.
    #[must_use]
    pub fn bounds_degrees(&self) -> (f64, f64) {
        (to_degrees(self.start_angle), to_degrees(self.end_angle))
    }
}

/// Lay weighted candidates out on the circle, preserving their order.
///
/// # Example
///
/// ```
/// use sector::{build_segments, WeightedCandidate, FULL_TURN};
///
/// let segments = build_segments(&[
///     WeightedCandidate::new("ada", 0.75),
///     WeightedCandidate::new("bob", 0.25),
/// ]);
/// assert_eq!(segments[0].start_angle, 0.0);
/// assert_eq!(segments[0].end_angle, segments[1].start_angle);
/// assert_eq!(segments[1].end_angle, FULL_TURN);
/// ```
#[must_use]
pub fn build_segments(weighted: &[WeightedCandidate]) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(weighted.len());
    let mut start = 0.0;

    for wc in weighted {
        let end = start + wc.weight * FULL_TURN;
        segments.push(Segment {
            candidate_id: wc.id.clone(),
            start_angle: start,
            end_angle: end,
        });
        start = end;
    }

    // Remove accumulated float drift
    if let Some(last) = segments.last_mut() {
        last.end_angle = FULL_TURN;
    }

    segments
}

/// Check that a segment list is a well-formed partition of the circle.
///
/// # Errors
///
/// Returns [`InputError::MalformedSegments`] if the list is empty, does not
/// start at `0` or end at `2π`, has a gap or overlap, contains a segment with
/// non-positive span, or repeats a candidate id.
pub fn validate_segments(segments: &[Segment]) -> Result<(), InputError> {
    let malformed = |msg: String| Err(InputError::MalformedSegments(msg));

    let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
        return malformed("segment list is empty".to_string());
    };
    if first.start_angle != 0.0 {
        return malformed(format!("first segment starts at {}", first.start_angle));
    }
    if (last.end_angle - FULL_TURN).abs() > 1e-9 {
        return malformed(format!("last segment ends at {}", last.end_angle));
    }

    let mut seen = BTreeSet::new();
    for (i, seg) in segments.iter().enumerate() {
        if seg.span().is_nan() || seg.span() <= 0.0 {
            return malformed(format!("segment {i} ({}) has no width", seg.candidate_id));
        }
        if !seen.insert(&seg.candidate_id) {
            return malformed(format!("candidate {} owns two segments", seg.candidate_id));
        }
        if let Some(next) = segments.get(i + 1) {
            if seg.end_angle != next.start_angle {
                return malformed(format!(
                    "gap between segment {i} and {} ({} != {})",
                    i + 1,
                    seg.end_angle,
                    next.start_angle
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn uniform(n: usize) -> Vec<WeightedCandidate> {
        #[allow(clippy::cast_precision_loss)]
        let w = 1.0 / n as f64;
        (0..n)
            .map(|i| WeightedCandidate::new(format!("c{i}"), w))
            .collect()
    }

    mod build_tests {
        use super::*;

        #[test]
        fn empty_gives_empty() {
            assert!(build_segments(&[]).is_empty());
        }

        #[test]
        fn three_equal_thirds() {
            let segments = build_segments(&uniform(3));
            assert_eq!(segments.len(), 3);
            assert_eq!(segments[0].start_angle, 0.0);
            for seg in &segments {
                assert!((seg.span() - FULL_TURN / 3.0).abs() < EPSILON);
            }
            assert_eq!(segments[0].end_angle, segments[1].start_angle);
            assert_eq!(segments[1].end_angle, segments[2].start_angle);
            assert_eq!(segments[2].end_angle, FULL_TURN);
        }

        #[test]
        fn order_follows_input_not_weight() {
            let segments = build_segments(&[
                WeightedCandidate::new("small", 0.1),
                WeightedCandidate::new("big", 0.9),
            ]);
            assert_eq!(segments[0].candidate_id.as_str(), "small");
            assert!((segments[0].end_angle - 0.1 * FULL_TURN).abs() < EPSILON);
        }

        #[test]
        fn last_end_clamped_despite_drift() {
            // Ten tenths do not sum to exactly 1.0 in f64
            let segments = build_segments(&uniform(10));
            assert_eq!(segments[9].end_angle, FULL_TURN);
        }

        #[test]
        fn built_segments_validate() {
            for n in 1..20 {
                assert!(validate_segments(&build_segments(&uniform(n))).is_ok());
            }
        }
    }

    mod helper_tests {
        use super::*;

        #[test]
        fn mid_and_degrees() {
            let seg = Segment {
                candidate_id: "a".into(),
                start_angle: 0.0,
                end_angle: FULL_TURN / 4.0,
            };
            assert!((seg.mid_angle() - FULL_TURN / 8.0).abs() < EPSILON);
            let (s, e) = seg.bounds_degrees();
            assert!(s.abs() < EPSILON);
            assert!((e - 90.0).abs() < 1e-9);
        }

        #[test]
        fn contains_is_half_open() {
            let seg = Segment {
                candidate_id: "a".into(),
                start_angle: 1.0,
                end_angle: 2.0,
            };
            assert!(seg.contains(1.0));
            assert!(seg.contains(1.5));
            assert!(!seg.contains(2.0));
        }
    }

    mod validate_tests {
        use super::*;

        fn seg(id: &str, start: f64, end: f64) -> Segment {
            Segment {
                candidate_id: id.into(),
                start_angle: start,
                end_angle: end,
            }
        }

        #[test]
        fn rejects_empty() {
            assert!(matches!(
                validate_segments(&[]),
                Err(InputError::MalformedSegments(_))
            ));
        }

        #[test]
        fn rejects_gap() {
            let segments = [seg("a", 0.0, 1.0), seg("b", 1.5, FULL_TURN)];
            assert!(validate_segments(&segments).is_err());
        }

        #[test]
        fn rejects_short_circle() {
            let segments = [seg("a", 0.0, 1.0), seg("b", 1.0, 3.0)];
            assert!(validate_segments(&segments).is_err());
        }

        #[test]
        fn rejects_zero_width() {
            let segments = [seg("a", 0.0, 0.0), seg("b", 0.0, FULL_TURN)];
            assert!(validate_segments(&segments).is_err());
        }

        #[test]
        fn rejects_duplicate_owner() {
            let segments = [seg("a", 0.0, 1.0), seg("a", 1.0, FULL_TURN)];
            assert!(validate_segments(&segments).is_err());
        }

        #[test]
        fn extreme_scores_still_partition() {
            use crate::candidate::Candidate;
            use crate::probability::{compute_weights, WeightConfig};

            for outlier in [1e9, 1e15, 1e300] {
                let weights = compute_weights(
                    &[
                        Candidate::new("a", 0.0),
                        Candidate::new("b", outlier),
                        Candidate::new("c", 0.0),
                    ],
                    &WeightConfig::default(),
                );
                let segments = build_segments(&weights);
                assert!(segments[1].span() > 0.0, "outlier {outlier}");
                assert!(validate_segments(&segments).is_ok(), "outlier {outlier}");
            }
        }
    }
}

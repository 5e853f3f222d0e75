//! # Sector
//!
//! Score-weighted angular geometry for picker wheels.
//!
//! Sector turns a roster of scored candidates into a circle partitioned into
//! angular segments, and answers which candidate sits under a fixed pointer
//! for any rotation of that circle. Everything here is pure and deterministic:
//!
//! - **Probability engine**: lower raw scores yield higher selection weights
//! - **Segment builder**: weights become a contiguous partition of `[0, 2π)`
//! - **Resolver**: rotation to winner, and winner to a target pointer angle
//!
//! ## Quick Start
//!
//! ```
//! use sector::{build_segments, compute_weights, resolve, Candidate, Resolution, WeightConfig};
//!
//! let candidates = vec![Candidate::new("ada", 1.0), Candidate::new("bob", 4.0)];
//! let weights = compute_weights(&candidates, &WeightConfig::default());
//! let segments = build_segments(&weights);
//!
//! // A wheel that has not turned points at the start of the first segment.
//! assert_eq!(resolve(0.0, &segments), Resolution::Winner("ada".into()));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod angle;
pub mod candidate;
pub mod error;
pub mod probability;
pub mod resolve;
pub mod roster;
pub mod segment;

// Re-exports for convenience
pub use angle::{normalize, FULL_TURN};
pub use candidate::{Candidate, CandidateId, WeightedCandidate};
pub use error::InputError;
pub use probability::{compute_weights, pick_weighted, WeightConfig, MIN_SEGMENT_WEIGHT};
pub use resolve::{resolve, target_angle_for, target_angle_with_margin, Resolution};
pub use roster::{parse_score, RosterState, SelectionFilter};
pub use segment::{build_segments, validate_segments, Segment};

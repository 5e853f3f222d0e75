//! State hashing for determinism verification.
//!
//! Two wheels built from the same roster, filter, configuration and seed and
//! driven by the same timestamps must hash identically after every frame.
//! Floats are hashed by bit pattern, so the check is exact.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use sector::Segment;

use crate::kinetics::{KineticsEngine, SpinState};

/// Hash the engine's spin state, profile and seed.
#[must_use]
pub fn hash_state(engine: &KineticsEngine) -> u64 {
    let mut hasher = DefaultHasher::new();

    engine.seed().hash(&mut hasher);
    hash_spin_state(engine.state(), &mut hasher);

    match engine.profile() {
        Some(profile) => {
            true.hash(&mut hasher);
            profile.cruise_duration().to_bits().hash(&mut hasher);
            profile.total_duration().to_bits().hash(&mut hasher);
        }
        None => false.hash(&mut hasher),
    }

    hasher.finish()
}

/// Hash a segment list, owners and bounds in order.
#[must_use]
pub fn hash_segments(segments: &[Segment]) -> u64 {
    let mut hasher = DefaultHasher::new();

    segments.len().hash(&mut hasher);
    for seg in segments {
        seg.candidate_id.hash(&mut hasher);
        seg.start_angle.to_bits().hash(&mut hasher);
        seg.end_angle.to_bits().hash(&mut hasher);
    }

    hasher.finish()
}

fn hash_spin_state<H: Hasher>(state: &SpinState, hasher: &mut H) {
    state.phase.hash(hasher);
    state.elapsed.to_bits().hash(hasher);
    state.rotation.to_bits().hash(hasher);
}

//! Test module for determinism and integration tests.
//!
//! - **Determinism tests**: same seed and timestamps give identical spins
//! - **Integration tests**: roster to winner through the `Wheel` session
//! - **Helper functions**: rosters, wheels and drive loops
//!
//! # Test Structure
//!
//! - `determinism.rs`: bit-identical replay and timestep invariance
//! - `integration.rs`: end-to-end spins, exclusion and winner sources
//! - `helpers.rs`: test setup utilities and factory functions

mod helpers;

// Re-export for convenience
pub use helpers::*;

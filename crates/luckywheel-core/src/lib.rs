//! # Lucky Wheel Core
//!
//! Spin kinetics and winner selection for the Lucky Wheel.
//!
//! This crate drives a picker wheel built from [`sector`] segments. A spin
//! is a time-driven state machine with a linear run-up, a randomly long
//! cruise and a decay to rest; the host pulls frames from it with whatever
//! clock it renders by, and the last frame names the winner.
//!
//! ## Architecture
//!
//! - **Wheel**: owns the roster, exclusion filter, derived segments and engine
//! - **Kinetics**: phase state machine integrating a closed-form speed profile
//! - **Spin**: lazy iterator pairing the engine with a [`Clock`]
//! - **Remote**: winner sources that fix the outcome before the wheel moves
//!
//! ## Usage
//!
//! ```
//! use luckywheel_core::{ManualClock, SpinEvent, Wheel, WheelConfig};
//! use sector::{Candidate, RosterState};
//!
//! let roster = RosterState::new(vec![
//!     Candidate::new("ada", 0.0),
//!     Candidate::new("bob", 3.0),
//!     Candidate::new("cyd", 1.0),
//! ])
//! .unwrap();
//! let mut wheel = Wheel::new(roster, WheelConfig::default(), 2024).unwrap();
//!
//! let clock = ManualClock::fixed_step(0.0, 1000.0 / 60.0);
//! let spin = wheel.spin(clock).unwrap().expect("wheel was idle");
//! let (_rotation, resolution) = spin.run_to_end().unwrap();
//! assert!(resolution.winner().is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export sector for roster and segment types
pub use sector;

pub mod clock;
pub mod config;
pub mod error;
pub mod hash;
pub mod kinetics;
pub mod profile;
pub mod remote;
pub mod spin;
pub mod wheel;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DecayLaw, KineticsConfig, WheelConfig};
pub use error::{ExternalSourceError, WheelError};
pub use kinetics::{Frame, KineticsEngine, Phase, SpinCommand, SpinState};
pub use profile::SpeedProfile;
pub use remote::{
    JsonSource, LocalWinnerSource, RemoteResponse, RemoteSelection, ValidatedSelection,
    WinnerSource,
};
pub use spin::{spin, Spin, SpinEvent};
pub use wheel::Wheel;

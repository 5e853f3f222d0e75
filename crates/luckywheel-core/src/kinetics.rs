//! Kinetics engine: the spin state machine.
//!
//! ```text
//! Idle --start--> Accelerating --t >= Da--> Constant --t >= Da+Dc--> Decelerating --t >= total--> Finished
//! ```
//!
//! Only [`KineticsEngine::start`] (or [`KineticsEngine::start_towards`])
//! leaves `Idle`; a start command in any other phase is ignored and changes
//! nothing, not even the RNG stream. The active phases advance purely with
//! elapsed time fed in through [`KineticsEngine::tick`]. `Finished` is
//! reported by exactly one tick; afterwards the engine stays silent until
//! [`KineticsEngine::reset`].
//!
//! # Determinism
//!
//! The cruise duration and wind-up turn counts are drawn from a `ChaCha8Rng`
//! seeded at construction, so the same seed and the same tick sequence give
//! bit-identical rotations.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use sector::{normalize, InputError, FULL_TURN};

use crate::config::KineticsConfig;
use crate::profile::SpeedProfile;

/// Slack allowed when a requested wind-up lands a hair under the minimum.
const REACH_TOLERANCE: f64 = 1e-9;

/// Named sub-interval of a spin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for a spin command
    #[default]
    Idle,
    /// Linear ramp to peak speed
    Accelerating,
    /// Cruising at peak speed
    Constant,
    /// Slowing to rest
    Decelerating,
    /// At rest; the final rotation has been emitted
    Finished,
}

impl Phase {
    /// Returns true for the three moving phases.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Accelerating | Self::Constant | Self::Decelerating)
    }
}

/// Mutable state of the spin in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpinState {
    /// Current phase
    pub phase: Phase,
    /// Time since spin start (ms)
    pub elapsed: f64,
    /// Accumulated rotation since spin start (rad)
    pub rotation: f64,
}

/// Snapshot handed to the renderer after each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Phase after this tick
    pub phase: Phase,
    /// Time since spin start (ms)
    pub elapsed: f64,
    /// Rotation since spin start (rad)
    pub rotation: f64,
}

/// What a start command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinCommand {
    /// A new spin began
    Started,
    /// A spin is already running (or finished and not yet reset); nothing changed
    Ignored,
}

/// Time-driven spin simulator for one wheel.
#[derive(Debug, Clone)]
pub struct KineticsEngine {
    config: KineticsConfig,
    state: SpinState,
    profile: Option<SpeedProfile>,
    rng: ChaCha8Rng,
    seed: u64,
}

impl KineticsEngine {
    /// Create an idle engine.
    ///
    /// The configuration is not checked here; it is validated on every start
    /// command so that a bad configuration refuses the spin instead of
    /// failing construction.
    #[must_use]
    pub fn new(config: KineticsConfig, seed: u64) -> Self {
        Self {
            config,
            state: SpinState::default(),
            profile: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Current spin state.
    #[must_use]
    pub fn state(&self) -> &SpinState {
        &self.state
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Motion configuration.
    #[must_use]
    pub fn config(&self) -> &KineticsConfig {
        &self.config
    }

    /// Profile of the spin in progress, if any.
    #[must_use]
    pub fn profile(&self) -> Option<&SpeedProfile> {
        self.profile.as_ref()
    }

    /// Seed the engine was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Replace the configuration. Takes effect at the next start.
    pub fn set_config(&mut self, config: KineticsConfig) {
        self.config = config;
    }

    /// Shared RNG stream, so every random draw of a wheel replays from one seed.
    pub(crate) fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Start a free spin with a randomly sampled cruise duration.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidConfig`] if the configuration is invalid;
    /// the engine stays `Idle`.
    pub fn start(&mut self) -> Result<SpinCommand, InputError> {
        if self.state.phase != Phase::Idle {
            warn!(phase = ?self.state.phase, "spin command ignored, wheel is busy");
            return Ok(SpinCommand::Ignored);
        }
        self.config.validate()?;

        let cruise = if self.config.const_duration_max > 0.0 {
            self.rng.gen_range(0.0..self.config.const_duration_max)
        } else {
            0.0
        };
        self.begin(SpeedProfile::new(&self.config, cruise));
        Ok(SpinCommand::Started)
    }

    /// Start a spin that comes to rest after exactly `total_rotation` radians.
    ///
    /// The cruise duration is solved for instead of sampled, and may exceed
    /// `const_duration_max` when the target asks for it.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidConfig`] for a bad configuration or a
    /// non-finite target, and [`InputError::UnreachableTarget`] when the
    /// ramps alone already travel further than `total_rotation`. The engine
    /// stays `Idle` on error.
    pub fn start_towards(&mut self, total_rotation: f64) -> Result<SpinCommand, InputError> {
        if self.state.phase != Phase::Idle {
            warn!(phase = ?self.state.phase, "targeted spin ignored, wheel is busy");
            return Ok(SpinCommand::Ignored);
        }
        self.config.validate()?;
        if !total_rotation.is_finite() {
            return Err(InputError::invalid_config(
                "total_rotation",
                format!("must be finite (got {total_rotation})"),
            ));
        }

        let minimum = SpeedProfile::new(&self.config, 0.0).total_distance();
        if total_rotation < minimum - REACH_TOLERANCE {
            return Err(InputError::UnreachableTarget {
                requested: total_rotation,
                minimum,
            });
        }

        let cruise = ((total_rotation - minimum) / self.config.max_speed).max(0.0);
        if cruise > self.config.const_duration_max {
            debug!(cruise, max = self.config.const_duration_max, "targeted cruise exceeds configured maximum");
        }
        self.begin(SpeedProfile::new(&self.config, cruise));
        Ok(SpinCommand::Started)
    }

    /// Total rotation that stops the wheel with `target_pointer_angle` under
    /// the pointer.
    ///
    /// The result is `normalize(-target) + k·2π`. `k` is drawn uniformly
    /// among the turn counts whose cruise fits in `[0, const_duration_max]`;
    /// if none fits, the smallest reachable `k` is used.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidConfig`] for a bad configuration or a
    /// non-finite angle.
    pub fn wind_up_rotation(&mut self, target_pointer_angle: f64) -> Result<f64, InputError> {
        self.config.validate()?;
        if !target_pointer_angle.is_finite() {
            return Err(InputError::invalid_config(
                "target_pointer_angle",
                format!("must be finite (got {target_pointer_angle})"),
            ));
        }

        let base = normalize(-target_pointer_angle);
        let shortest = SpeedProfile::new(&self.config, 0.0).total_distance();
        let longest =
            SpeedProfile::new(&self.config, self.config.const_duration_max).total_distance();

        // Turn counts are small positive integers (tens at most)
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let k_min = ((shortest - base) / FULL_TURN).ceil().max(0.0) as u64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let k_max = ((longest - base) / FULL_TURN).floor().max(0.0) as u64;

        let k = if k_max >= k_min {
            self.rng.gen_range(k_min..=k_max)
        } else {
            warn!(k_min, "no turn count fits the cruise bound, using the shortest wind-up");
            k_min
        };

        #[allow(clippy::cast_precision_loss)]
        let rotation = base + k as f64 * FULL_TURN;
        Ok(rotation)
    }

    /// Advance the spin by `dt` milliseconds.
    ///
    /// Returns `None` while idle and after `Finished` has been reported.
    /// A non-positive or non-finite `dt` adds no rotation but still reports
    /// the current frame.
    pub fn tick(&mut self, dt: f64) -> Option<Frame> {
        if !self.state.phase.is_active() {
            return None;
        }
        let profile = self.profile?;

        if dt.is_finite() && dt > 0.0 {
            let from = self.state.elapsed;
            let to = from + dt;
            self.state.rotation += profile.distance_at(to) - profile.distance_at(from);
            self.state.elapsed = to.min(profile.total_duration());

            let phase = profile.phase_at(to);
            if phase != self.state.phase {
                debug!(from = ?self.state.phase, to = ?phase, elapsed = self.state.elapsed, "phase transition");
                self.state.phase = phase;
            }
            if phase == Phase::Finished {
                debug!(rotation = self.state.rotation, "spin came to rest");
            }
        }

        Some(self.frame())
    }

    /// Discard the spin state and return to `Idle`.
    pub fn reset(&mut self) {
        self.state = SpinState::default();
        self.profile = None;
    }

    fn begin(&mut self, profile: SpeedProfile) {
        info!(
            cruise = profile.cruise_duration(),
            duration = profile.total_duration(),
            distance = profile.total_distance(),
            "spin started"
        );
        self.profile = Some(profile);
        self.state = SpinState {
            phase: profile.phase_at(0.0),
            elapsed: 0.0,
            rotation: 0.0,
        };
    }

    fn frame(&self) -> Frame {
        Frame {
            phase: self.state.phase,
            elapsed: self.state.elapsed,
            rotation: self.state.rotation,
        }
    }
}

//! The lazy spin sequence.
//!
//! A [`Spin`] is an iterator the host pulls once per rendered frame. Each
//! pull reads the [`Clock`], advances the engine by the elapsed time and
//! yields a [`SpinEvent::Frame`]. The last item is a single
//! [`SpinEvent::Finished`] carrying the final rotation and the resolved
//! winner, after which the engine is back to idle and the iterator ends.
//!
//! A `Spin` holds the engine by `&mut` for its whole life, so no second
//! spin can start on the same engine while one is being driven.

use serde::{Deserialize, Serialize};
use tracing::info;

use sector::{resolve, validate_segments, InputError, Resolution, Segment};

use crate::clock::Clock;
use crate::kinetics::{Frame, KineticsEngine, Phase, SpinCommand};

/// One item of a spin sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpinEvent {
    /// The wheel is moving
    Frame(Frame),
    /// The wheel came to rest; always the last item
    Finished {
        /// Total rotation of this spin (rad)
        rotation: f64,
        /// Candidate under the pointer
        resolution: Resolution,
    },
}

impl SpinEvent {
    /// Rotation carried by this event.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        match self {
            Self::Frame(frame) => frame.rotation,
            Self::Finished { rotation, .. } => *rotation,
        }
    }

    /// Phase carried by this event.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            Self::Frame(frame) => frame.phase,
            Self::Finished { .. } => Phase::Finished,
        }
    }
}

/// Iterator over the frames of one spin.
pub struct Spin<'a, C> {
    engine: &'a mut KineticsEngine,
    segments: &'a [Segment],
    clock: C,
    last: f64,
    done: bool,
}

impl<'a, C: Clock> Spin<'a, C> {
    /// Drive an engine that has already been started.
    ///
    /// The first clock read becomes the spin's time origin.
    pub(crate) fn new(engine: &'a mut KineticsEngine, segments: &'a [Segment], mut clock: C) -> Self {
        let last = clock.now_ms();
        Self {
            engine,
            segments,
            clock,
            last,
            done: false,
        }
    }

    /// Engine state as of the last pulled frame.
    #[must_use]
    pub fn engine(&self) -> &KineticsEngine {
        self.engine
    }

    /// Pull frames until the spin finishes and return the outcome.
    ///
    /// Returns `None` only if the spin had already finished.
    pub fn run_to_end(self) -> Option<(f64, Resolution)> {
        match Iterator::last(self)? {
            SpinEvent::Finished { rotation, resolution } => Some((rotation, resolution)),
            SpinEvent::Frame(_) => None,
        }
    }
}

impl<C: Clock> Iterator for Spin<'_, C> {
    type Item = SpinEvent;

    fn next(&mut self) -> Option<SpinEvent> {
        if self.done {
            return None;
        }

        let now = self.clock.now_ms();
        let dt = now - self.last;
        if now > self.last {
            self.last = now;
        }

        let Some(frame) = self.engine.tick(dt) else {
            self.done = true;
            return None;
        };

        if frame.phase != Phase::Finished {
            return Some(SpinEvent::Frame(frame));
        }

        let resolution = resolve(frame.rotation, self.segments);
        match resolution.winner() {
            Some(winner) => info!(%winner, rotation = frame.rotation, "wheel stopped"),
            None => info!(rotation = frame.rotation, "wheel stopped on no segment"),
        }
        self.engine.reset();
        self.done = true;
        Some(SpinEvent::Finished {
            rotation: frame.rotation,
            resolution,
        })
    }
}

/// Start a free spin on `engine` over `segments`.
///
/// Returns `Ok(None)` when the engine is already spinning; nothing changes
/// in that case.
///
/// # Errors
///
/// Returns [`InputError::MalformedSegments`] if `segments` is not a
/// partition of the circle, or [`InputError::InvalidConfig`] if the engine's
/// configuration is invalid. The engine stays idle.
///
/// # Example
///
/// ```
/// use luckywheel_core::{spin, KineticsEngine, KineticsConfig, ManualClock, SpinEvent};
/// use sector::{build_segments, WeightedCandidate};
///
/// let segments = build_segments(&[WeightedCandidate::new("ada", 1.0)]);
/// let mut engine = KineticsEngine::new(KineticsConfig::default(), 7);
/// let frames = spin(&mut engine, &segments, ManualClock::fixed_step(0.0, 16.0))
///     .unwrap()
///     .unwrap();
///
/// let last = frames.last().unwrap();
/// assert!(matches!(last, SpinEvent::Finished { .. }));
/// ```
pub fn spin<'a, C: Clock>(
    engine: &'a mut KineticsEngine,
    segments: &'a [Segment],
    clock: C,
) -> Result<Option<Spin<'a, C>>, InputError> {
    validate_segments(segments)?;
    match engine.start()? {
        SpinCommand::Started => Ok(Some(Spin::new(engine, segments, clock))),
        SpinCommand::Ignored => Ok(None),
    }
}

//! Time sources for driving a spin.
//!
//! A spin never sleeps or schedules itself: the host pulls frames from a
//! [`Spin`](crate::spin::Spin) and each pull reads the clock once. The
//! renderer's frame callback uses [`SystemClock`]; tests and offline video
//! rendering use [`ManualClock`].

use std::collections::VecDeque;
use std::time::Instant;

/// Monotonic millisecond timestamps.
pub trait Clock {
    /// Current time in milliseconds since an arbitrary fixed origin.
    fn now_ms(&mut self) -> f64;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Clock whose origin is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Deterministic clock for tests and offline rendering.
///
/// Replays a script of timestamps first, then advances by a fixed step on
/// every read.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    script: VecDeque<f64>,
    now: f64,
    step: f64,
}

impl ManualClock {
    /// Clock that advances by `step_ms` on every read after the first.
    ///
    /// The first read returns `start_ms`. A 60 fps renderer is
    /// `ManualClock::fixed_step(0.0, 1000.0 / 60.0)`.
    #[must_use]
    pub fn fixed_step(start_ms: f64, step_ms: f64) -> Self {
        Self {
            script: VecDeque::from([start_ms]),
            now: start_ms,
            step: step_ms,
        }
    }

    /// Clock that returns `timestamps` in order, then stands still.
    pub fn scripted(timestamps: impl IntoIterator<Item = f64>) -> Self {
        Self {
            script: timestamps.into_iter().collect(),
            now: 0.0,
            step: 0.0,
        }
    }

    /// Set the step used once the script runs out.
    #[must_use]
    pub fn then_step(mut self, step_ms: f64) -> Self {
        self.step = step_ms;
        self
    }

    /// Last timestamp handed out.
    #[must_use]
    pub fn last(&self) -> f64 {
        self.now
    }
}

impl Clock for ManualClock {
    fn now_ms(&mut self) -> f64 {
        self.now = match self.script.pop_front() {
            Some(t) => t,
            None => self.now + self.step,
        };
        self.now
    }
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn now_ms(&mut self) -> f64 {
        (**self).now_ms()
    }
}

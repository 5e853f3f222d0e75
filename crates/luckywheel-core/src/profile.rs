//! Speed profile of a single spin.
//!
//! A [`SpeedProfile`] fixes all four phase lengths for one spin, including
//! the sampled cruise duration, and gives closed forms for speed and for
//! travelled angle at any elapsed time. The kinetics engine integrates by
//! differencing [`SpeedProfile::distance_at`], which is the exact integral
//! of [`SpeedProfile::speed_at`], so the result does not depend on how the
//! elapsed time was split into ticks.

use serde::{Deserialize, Serialize};

use crate::config::{DecayLaw, KineticsConfig};
use crate::kinetics::Phase;

/// Phase lengths and speed law for one spin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedProfile {
    accel: f64,
    cruise: f64,
    decel: f64,
    max_speed: f64,
    decay: DecayLaw,
}

impl SpeedProfile {
    /// Build a profile from a validated config and a cruise duration.
    #[must_use]
    pub fn new(config: &KineticsConfig, cruise: f64) -> Self {
        Self {
            accel: config.accel_duration,
            cruise: cruise.max(0.0),
            decel: config.decel_duration,
            max_speed: config.max_speed,
            decay: config.decay,
        }
    }

    /// Cruise (constant speed) duration of this spin.
    #[must_use]
    pub fn cruise_duration(&self) -> f64 {
        self.cruise
    }

    /// Total spin duration.
    #[must_use]
    pub fn total_duration(&self) -> f64 {
        self.accel + self.cruise + self.decel
    }

    /// Total angle travelled by the end of the spin.
    #[must_use]
    pub fn total_distance(&self) -> f64 {
        self.distance_at(self.total_duration())
    }

    /// Phase at elapsed time `t`.
    #[must_use]
    pub fn phase_at(&self, t: f64) -> Phase {
        if t < self.accel {
            Phase::Accelerating
        } else if t < self.accel + self.cruise {
            Phase::Constant
        } else if t < self.total_duration() {
            Phase::Decelerating
        } else {
            Phase::Finished
        }
    }

    /// Angular speed at elapsed time `t`.
    #[must_use]
    pub fn speed_at(&self, t: f64) -> f64 {
        let s = self.max_speed;
        if t <= 0.0 {
            0.0
        } else if t < self.accel {
            s * t / self.accel
        } else if t < self.accel + self.cruise {
            s
        } else if t < self.total_duration() {
            let p = (t - self.accel - self.cruise) / self.decel;
            s * self.decay_factor(p)
        } else {
            0.0
        }
    }

    /// Angle travelled between spin start and elapsed time `t`.
    ///
    /// `t` is clamped to `[0, total_duration]`.
    #[must_use]
    pub fn distance_at(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, self.total_duration());
        let s = self.max_speed;
        let accel_distance = 0.5 * s * self.accel;

        if t < self.accel {
            0.5 * s / self.accel * t * t
        } else if t < self.accel + self.cruise {
            accel_distance + s * (t - self.accel)
        } else {
            let tau = t - self.accel - self.cruise;
            accel_distance + s * self.cruise + self.decel_distance(tau)
        }
    }

    /// Fraction of peak speed at progress `p` through deceleration.
    fn decay_factor(&self, p: f64) -> f64 {
        let p = p.clamp(0.0, 1.0);
        match self.decay {
            DecayLaw::Exponential { rate } => {
                let tail = (-rate).exp();
                ((-rate * p).exp() - tail) / -(-rate).exp_m1()
            }
            DecayLaw::EaseOut { power } => (1.0 - p).powi(power),
        }
    }

    /// Integral of the decay curve from the start of deceleration to `tau`.
    fn decel_distance(&self, tau: f64) -> f64 {
        let s = self.max_speed;
        let d = self.decel;
        let p = (tau / d).clamp(0.0, 1.0);
        match self.decay {
            DecayLaw::Exponential { rate } => {
                let tail = (-rate).exp();
                s / -(-rate).exp_m1() * (d / rate * -(-rate * p).exp_m1() - tail * p * d)
            }
            DecayLaw::EaseOut { power } => {
                let n = f64::from(power) + 1.0;
                s * d * (1.0 - (1.0 - p).powi(power + 1)) / n
            }
        }
    }
}

//! Wheel and kinetics configuration.
//!
//! Durations are milliseconds and speeds radians per millisecond, matching the
//! timestamps a render loop hands out. All structs deserialize with defaults
//! for missing fields, so a partial JSON document is a valid configuration.

use serde::{Deserialize, Serialize};

use sector::{InputError, WeightConfig};

/// How angular speed falls from peak to rest during deceleration.
///
/// Both laws reach zero speed exactly at the end of the phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "law", rename_all = "snake_case")]
pub enum DecayLaw {
    /// `(e^(-rate·p) - e^(-rate)) / (1 - e^(-rate))` of peak, `p` in `[0, 1]`
    Exponential {
        /// Damping coefficient, higher front-loads the slowdown
        rate: f64,
    },
    /// `(1 - p)^power` of peak, `p` in `[0, 1]`
    EaseOut {
        /// Polynomial degree, at least 1
        power: i32,
    },
}

impl Default for DecayLaw {
    fn default() -> Self {
        Self::Exponential { rate: 5.0 }
    }
}

impl DecayLaw {
    /// Smallest accepted exponential rate. Below it the curve is
    /// indistinguishable from linear and `1 - e^(-rate)` loses all precision.
    pub const MIN_RATE: f64 = 1e-6;

    fn validate(self) -> Result<(), InputError> {
        match self {
            Self::Exponential { rate } if !rate.is_finite() || rate < Self::MIN_RATE => {
                Err(InputError::invalid_config(
                    "decay.rate",
                    format!("must be finite and at least {} (got {rate})", Self::MIN_RATE),
                ))
            }
            Self::EaseOut { power } if !(1..=16).contains(&power) => Err(
                InputError::invalid_config("decay.power", format!("must be 1..=16 (got {power})")),
            ),
            _ => Ok(()),
        }
    }
}

/// Parameters of the accelerate, cruise, decelerate motion profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KineticsConfig {
    /// Linear ramp from rest to peak speed (ms)
    pub accel_duration: f64,
    /// Slowdown from peak speed to rest (ms)
    pub decel_duration: f64,
    /// Upper bound of the randomly sampled cruise phase (ms)
    pub const_duration_max: f64,
    /// Peak angular speed (rad/ms)
    pub max_speed: f64,
    /// Deceleration curve
    pub decay: DecayLaw,
}

impl Default for KineticsConfig {
    fn default() -> Self {
        Self {
            accel_duration: 1500.0,
            decel_duration: 10_000.0,
            const_duration_max: 3000.0,
            max_speed: 0.015,
            decay: DecayLaw::default(),
        }
    }
}

impl KineticsConfig {
    /// Check every parameter.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), InputError> {
        positive("accel_duration", self.accel_duration)?;
        positive("decel_duration", self.decel_duration)?;
        positive("max_speed", self.max_speed)?;
        if !self.const_duration_max.is_finite() || self.const_duration_max < 0.0 {
            return Err(InputError::invalid_config(
                "const_duration_max",
                format!("must be finite and non-negative (got {})", self.const_duration_max),
            ));
        }
        self.decay.validate()
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(InputError::invalid_config(
            field,
            format!("must be finite and positive (got {value})"),
        ))
    }
}

/// Complete configuration for a [`Wheel`](crate::wheel::Wheel).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Score-to-weight law
    pub weights: WeightConfig,
    /// Spin motion profile
    pub kinetics: KineticsConfig,
}

impl WheelConfig {
    /// Parse a JSON document; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidConfig`] if the document does not parse.
    /// Values are range-checked later, by [`WheelConfig::validate`].
    ///
    /// # Example
    ///
    /// ```
    /// use luckywheel_core::config::{DecayLaw, WheelConfig};
    ///
    /// let config = WheelConfig::from_json(
    ///     r#"{ "kinetics": { "max_speed": 0.02, "decay": { "law": "ease_out", "power": 2 } } }"#,
    /// ).unwrap();
    /// assert_eq!(config.kinetics.max_speed, 0.02);
    /// assert_eq!(config.kinetics.decay, DecayLaw::EaseOut { power: 2 });
    /// assert_eq!(config.kinetics.accel_duration, 1500.0);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        serde_json::from_str(json).map_err(|e| InputError::invalid_config("config", e.to_string()))
    }

    /// Check both halves of the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`InputError::InvalidConfig`] found.
    pub fn validate(&self) -> Result<(), InputError> {
        self.weights.validate()?;
        self.kinetics.validate()
    }
}

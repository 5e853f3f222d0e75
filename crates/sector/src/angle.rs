//! Angle helpers.
//!
//! All angles are radians unless a function name says otherwise. Wheel angles
//! grow in the direction the wheel turns; the pointer sits at wheel angle `0`.

use std::f64::consts::TAU;

/// One full turn in radians.
pub const FULL_TURN: f64 = TAU;

/// Wrap an angle into `[0, 2π)`.
///
/// Unlike `%`, the result is never negative. Values that round up to exactly
/// `2π` after wrapping are folded back to `0.0`.
///
/// # Example
///
/// ```
/// use sector::angle::normalize;
/// use std::f64::consts::PI;
///
/// assert!((normalize(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
/// assert_eq!(normalize(0.0), 0.0);
/// ```
#[must_use]
pub fn normalize(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(FULL_TURN);
    if wrapped >= FULL_TURN {
        0.0
    } else {
        wrapped
    }
}

/// Pointer angle for a given wheel rotation.
///
/// The wheel turns under a stationary pointer, so the wheel angle sitting
/// under the pointer moves opposite to the rotation.
#[must_use]
pub fn pointer_angle(rotation: f64) -> f64 {
    normalize(-rotation)
}

/// Convert degrees to radians.
#[must_use]
pub fn to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Convert radians to degrees.
#[must_use]
pub fn to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deterministic math helpers covering scalar utilities and the 2D vector
//! used by probes and the resolver.
//!
//! All operations round to `f32` to mirror the simulation's float32 mode.

use std::f32::consts::TAU;

mod vec2;

pub use vec2::Vec2;

/// Global epsilon used by math routines when detecting degenerate values.
pub const EPSILON: f32 = 1e-6;

/// Converts degrees to radians with float32 precision.
pub fn deg_to_rad(value: f32) -> f32 {
    value * (TAU / 360.0)
}

/// Converts radians to degrees with float32 precision.
pub fn rad_to_deg(value: f32) -> f32 {
    value * (360.0 / TAU)
}

/// Sign of `value` where zero counts as positive (`1.0`).
///
/// Slope redirection multiplies by this, so a zero component must keep the
/// displacement instead of cancelling it.
pub fn sign(value: f32) -> f32 {
    if value >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_treats_zero_as_positive() {
        assert_eq!(sign(0.0), 1.0);
        assert_eq!(sign(-0.5), -1.0);
        assert_eq!(sign(3.0), 1.0);
    }

    #[test]
    fn degree_conversions_invert() {
        let r = deg_to_rad(30.0);
        assert!((rad_to_deg(r) - 30.0).abs() < 1e-4);
        assert!((r - std::f32::consts::FRAC_PI_6).abs() < 1e-6);
    }
}

// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::math::{rad_to_deg, EPSILON};

/// Deterministic 2D vector used for positions, velocities, and normals.
///
/// * Components are world units; `+y` is up.
/// * Arithmetic uses `f32` so results round like the simulation's float32 mode.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component (`+y` up).
    pub y: f32,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// Unit vector pointing up (`+y`).
    pub const UP: Self = Self::new(0.0, 1.0);
    /// Unit vector pointing down (`-y`).
    pub const DOWN: Self = Self::new(0.0, -1.0);
    /// Unit vector pointing left (`-x`).
    pub const LEFT: Self = Self::new(-1.0, 0.0);
    /// Unit vector pointing right (`+x`).
    pub const RIGHT: Self = Self::new(1.0, 0.0);

    /// Creates a vector from components.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }

    /// Scales the vector by a scalar.
    pub fn scale(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }

    /// Dot product with another vector.
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (z component of the 3D cross product).
    pub fn perp_dot(self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Vector length (magnitude).
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Squared magnitude of the vector.
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Returns `true` when both components are exactly zero.
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Returns `true` when both components are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Normalises the vector, returning the zero vector if length ≤ `EPSILON`.
    ///
    /// Degenerate inputs normalise to zero so downstream callers can detect
    /// them deterministically (a pinch between opposite normals relies on it).
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len <= EPSILON {
            return Self::ZERO;
        }
        self.scale(1.0 / len)
    }

    /// Linear interpolation from `self` (t = 0) to `other` (t = 1).
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Unsigned angle between two vectors in degrees, in `[0, 180]`.
    ///
    /// Returns `0` when either vector is (near) zero, so a missing normal reads
    /// as a flat surface.
    pub fn angle_deg(self, other: Self) -> f32 {
        let denom = (self.length_squared() * other.length_squared()).sqrt();
        if denom < 1e-15 {
            return 0.0;
        }
        let cos = (self.dot(other) / denom).clamp(-1.0, 1.0);
        rad_to_deg(cos.acos())
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// Converts a `[f32; 2]` array into a `Vec2` interpreted as `(x, y)`.
///
/// # Examples
/// ```
/// use ledge_geom::Vec2;
/// let v = Vec2::from([1.0, 2.0]);
/// assert_eq!(v.to_array(), [1.0, 2.0]);
/// ```
impl From<[f32; 2]> for Vec2 {
    fn from(value: [f32; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_between_up_and_slope_normal() {
        let n = Vec2::new(-0.5, 3f32.sqrt() / 2.0);
        assert!((n.angle_deg(Vec2::UP) - 30.0).abs() < 1e-3);
        assert!((Vec2::RIGHT.angle_deg(Vec2::UP) - 90.0).abs() < 1e-4);
        assert!((Vec2::DOWN.angle_deg(Vec2::UP) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn angle_with_zero_vector_is_zero() {
        assert_eq!(Vec2::ZERO.angle_deg(Vec2::UP), 0.0);
    }

    #[test]
    fn opposite_normals_cancel_to_zero() {
        let sum = Vec2::UP.normalize() + Vec2::DOWN.normalize();
        assert!(sum.normalize().is_zero());
    }

    #[test]
    fn lerp_hits_endpoints() {
        let a = Vec2::new(-1.0, 2.0);
        let b = Vec2::new(3.0, -2.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Vec2::new(1.0, 0.0));
    }
}

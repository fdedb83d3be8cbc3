// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pinch classification shared by both axis resolvers.
//!
//! Two opposing probes both at or inside contact mean the body is squeezed.
//! The side the squeeze comes from is read off the sum of the two normalized
//! contact normals: a floor tilted to face +x and a flat ceiling push the body
//! toward +x, so the pressure is on its left.

use ledge_geom::Vec2;

/// Which side flags a pinch sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pinch {
    /// Squeeze resolves toward the negative axis.
    Negative,
    /// Squeeze resolves toward the positive axis.
    Positive,
    /// Normals cancel out; both flags are set.
    Both,
}

impl Pinch {
    fn from_component(value: f32) -> Self {
        if value < 0.0 {
            Self::Negative
        } else if value > 0.0 {
            Self::Positive
        } else {
            Self::Both
        }
    }

    /// `(negative, positive)` flag pair.
    pub fn flags(self) -> (bool, bool) {
        match self {
            Self::Negative => (true, false),
            Self::Positive => (false, true),
            Self::Both => (true, true),
        }
    }
}

fn resultant(a: Vec2, b: Vec2) -> Vec2 {
    (a.normalize() + b.normalize()).normalize()
}

/// Vertical pinch (ceiling + floor). Returns `(left, right)` flags: a
/// resultant pointing toward −x is pressure from the right.
pub fn vertical_sides(up_normal: Vec2, down_normal: Vec2) -> (bool, bool) {
    let (right, left) = Pinch::from_component(resultant(up_normal, down_normal).x).flags();
    (left, right)
}

/// Horizontal pinch (two walls). Returns `(up, down)` flags: a resultant
/// pointing toward −y is pressure from above.
pub fn horizontal_sides(left_normal: Vec2, right_normal: Vec2) -> (bool, bool) {
    Pinch::from_component(resultant(left_normal, right_normal).y).flags()
}

/// Surface-to-surface distance across a pinch, given the body's extent on
/// that axis and the two (usually non-positive) probe distances.
pub fn gap(extent: f32, a: f32, b: f32) -> f32 {
    extent + a + b
}

/// Shift that centres the body between the two surfaces, toward `positive`.
pub fn recenter(positive: f32, negative: f32) -> f32 {
    (positive - negative) * 0.5
}

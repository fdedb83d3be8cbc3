// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::math::Vec2;

/// Axis-aligned bounding box in world coordinates.
///
/// Invariants:
/// - `min` components are less than or equal to `max` components.
/// - Values are `f32` world units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb2 {
    min: Vec2,
    max: Vec2,
}

impl Aabb2 {
    /// Constructs an AABB from its minimum and maximum corners.
    ///
    /// # Panics
    /// Panics if any component of `min` is greater than its counterpart in `max`.
    #[must_use]
    pub fn new(min: Vec2, max: Vec2) -> Self {
        assert!(min.x <= max.x && min.y <= max.y, "invalid AABB: min > max");
        Self { min, max }
    }

    /// Returns the minimum corner.
    #[must_use]
    pub fn min(&self) -> Vec2 {
        self.min
    }

    /// Returns the maximum corner.
    #[must_use]
    pub fn max(&self) -> Vec2 {
        self.max
    }

    /// Returns `true` if this AABB overlaps another (inclusive on faces).
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y)
    }

    /// Builds the minimal AABB that contains all `points`.
    ///
    /// Returns `None` if `points` is empty.
    #[must_use]
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min = Vec2::new(min.x.min(p.x), min.y.min(p.y));
            max = Vec2::new(max.x.max(p.x), max.y.max(p.y));
        }
        Some(Self { min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_faces_overlap() {
        let a = Aabb2::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let b = Aabb2::new(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));
        let c = Aabb2::new(Vec2::new(1.5, 0.0), Vec2::new(2.0, 1.0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn from_points_bounds_all() {
        let bb = Aabb2::from_points(&[Vec2::new(1.0, -2.0), Vec2::new(-3.0, 4.0), Vec2::new(0.0, 0.0)]);
        assert_eq!(bb, Some(Aabb2::new(Vec2::new(-3.0, -2.0), Vec2::new(1.0, 4.0))));
        assert_eq!(Aabb2::from_points(&[]), None);
    }
}

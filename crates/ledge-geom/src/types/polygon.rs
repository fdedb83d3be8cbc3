// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::error::GeomError;
use crate::math::{Vec2, EPSILON};
use crate::types::aabb::Aabb2;

/// Convex polygon in world space, stored counter-clockwise.
///
/// Boxes, ramps, and other static level pieces are all expressed as convex
/// polygons so a single ray routine covers them. Outward edge normals are
/// computed once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolygon {
    vertices: Vec<Vec2>,
    normals: Vec<Vec2>,
    bounds: Aabb2,
}

impl ConvexPolygon {
    /// Builds a polygon from its vertices in either winding order.
    ///
    /// Clockwise input is reversed. Collinear vertices are accepted; a
    /// reflex vertex is rejected with [`GeomError::NonConvex`].
    pub fn new(points: Vec<Vec2>) -> Result<Self, GeomError> {
        if points.len() < 3 {
            return Err(GeomError::DegeneratePolygon(format!(
                "{} vertices, need at least 3",
                points.len()
            )));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(GeomError::DegeneratePolygon("non-finite vertex".into()));
        }

        let mut vertices = points;
        let area = signed_area(&vertices);
        if area.abs() <= EPSILON {
            return Err(GeomError::DegeneratePolygon("zero area".into()));
        }
        if area < 0.0 {
            vertices.reverse();
        }

        let n = vertices.len();
        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            let c = vertices[(i + 2) % n];
            if (b - a).perp_dot(c - b) < -EPSILON {
                return Err(GeomError::NonConvex);
            }
        }

        let normals = (0..n)
            .map(|i| {
                let edge = vertices[(i + 1) % n] - vertices[i];
                Vec2::new(edge.y, -edge.x).normalize()
            })
            .collect();
        let bounds = Aabb2::from_points(&vertices)
            .ok_or_else(|| GeomError::DegeneratePolygon("no vertices".into()))?;

        Ok(Self {
            vertices,
            normals,
            bounds,
        })
    }

    /// Axis-aligned rectangle spanning `min..max`.
    pub fn rect(min: Vec2, max: Vec2) -> Result<Self, GeomError> {
        if !(min.x < max.x && min.y < max.y) {
            return Err(GeomError::DegeneratePolygon(format!(
                "rectangle min {min:?} must be below max {max:?}"
            )));
        }
        Self::new(vec![
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ])
    }

    /// Vertices in counter-clockwise order.
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Bounding box of the polygon.
    pub fn bounds(&self) -> Aabb2 {
        self.bounds
    }

    /// Returns `true` when `point` is inside or on the boundary.
    pub fn contains(&self, point: Vec2) -> bool {
        self.vertices
            .iter()
            .zip(&self.normals)
            .all(|(v, n)| n.dot(point - *v) <= EPSILON)
    }

    /// Intersects the ray `origin + t * direction`, `t ∈ [0, max_distance]`.
    ///
    /// `direction` must be unit length. Returns the entry distance and the
    /// outward normal of the entered edge. An origin strictly inside the
    /// polygon reports distance `0` with normal `-direction`. A ray running
    /// exactly along an edge line does not count as touching that edge.
    pub fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<(f32, Vec2)> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut enter_normal = Vec2::ZERO;
        let mut t_exit = f32::INFINITY;

        for (vertex, normal) in self.vertices.iter().zip(&self.normals) {
            let denom = normal.dot(direction);
            // Positive when the origin is on the inner side of this edge.
            let num = normal.dot(*vertex - origin);
            if denom.abs() <= EPSILON {
                if num <= 0.0 {
                    return None;
                }
                continue;
            }
            let t = num / denom;
            if denom < 0.0 {
                if t > t_enter {
                    t_enter = t;
                    enter_normal = *normal;
                }
            } else if t < t_exit {
                t_exit = t;
            }
        }

        if t_enter > t_exit || t_exit < 0.0 {
            return None;
        }
        if t_enter < 0.0 {
            return Some((0.0, -direction));
        }
        if t_enter > max_distance {
            return None;
        }
        Some((t_enter, enter_normal))
    }
}

fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    let twice: f32 = (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum();
    twice * 0.5
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn unit_box() -> ConvexPolygon {
        ConvexPolygon::rect(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)).unwrap()
    }

    #[test]
    fn clockwise_input_is_reordered() {
        let cw = ConvexPolygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
        ])
        .unwrap();
        assert!(signed_area(cw.vertices()) > 0.0);
    }

    #[test]
    fn reflex_vertex_is_rejected() {
        let dart = ConvexPolygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(1.0, 0.5),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
        ]);
        assert_eq!(dart, Err(GeomError::NonConvex));
    }

    #[test]
    fn ray_from_above_hits_top_face() {
        let hit = unit_box().raycast(Vec2::new(0.5, 3.0), Vec2::DOWN, 10.0);
        assert_eq!(hit, Some((2.0, Vec2::UP)));
    }

    #[test]
    fn ray_beyond_max_distance_misses() {
        assert_eq!(unit_box().raycast(Vec2::new(0.5, 3.0), Vec2::DOWN, 1.5), None);
    }

    #[test]
    fn origin_inside_reports_zero_distance() {
        let hit = unit_box().raycast(Vec2::new(0.5, 0.5), Vec2::RIGHT, 10.0);
        assert_eq!(hit, Some((0.0, Vec2::LEFT)));
    }

    #[test]
    fn ray_along_face_does_not_hit() {
        assert_eq!(unit_box().raycast(Vec2::new(-1.0, 1.0), Vec2::RIGHT, 10.0), None);
    }

    #[test]
    fn ray_pointing_away_misses() {
        assert_eq!(unit_box().raycast(Vec2::new(0.5, 3.0), Vec2::UP, 10.0), None);
    }
}

// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use std::collections::BTreeMap;

use crate::error::GeomError;
use crate::math::Vec2;
use crate::ray::{ObjectId, RayCaster, RayHit};
use crate::types::aabb::Aabb2;
use crate::types::layer::LayerMask;
use crate::types::polygon::ConvexPolygon;

/// A shape registered in a [`StaticScene`].
#[derive(Debug, Clone, PartialEq)]
pub struct SceneShape {
    /// World-space geometry.
    pub polygon: ConvexPolygon,
    /// Layers the shape belongs to.
    pub layer: LayerMask,
}

/// Deterministic ray-query backend over convex polygons.
///
/// Shapes are keyed by [`ObjectId`] in a `BTreeMap`, so every query visits
/// them in ascending id order. When two shapes report the same distance the
/// lower id wins. A linear scan with an AABB pre-check is plenty for the
/// handful of shapes a character sees; hosts with large levels plug in their
/// own [`RayCaster`].
#[derive(Debug, Clone, Default)]
pub struct StaticScene {
    shapes: BTreeMap<ObjectId, SceneShape>,
}

impl StaticScene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the shape with the given `id`.
    pub fn insert(&mut self, id: ObjectId, polygon: ConvexPolygon, layer: LayerMask) {
        self.shapes.insert(id, SceneShape { polygon, layer });
    }

    /// Inserts an axis-aligned box spanning `min..max`.
    pub fn insert_box(
        &mut self,
        id: ObjectId,
        min: Vec2,
        max: Vec2,
        layer: LayerMask,
    ) -> Result<(), GeomError> {
        let polygon = ConvexPolygon::rect(min, max)?;
        self.insert(id, polygon, layer);
        Ok(())
    }

    /// Removes a shape, returning it if it was present.
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneShape> {
        self.shapes.remove(&id)
    }

    /// Looks up a shape by id.
    pub fn get(&self, id: ObjectId) -> Option<&SceneShape> {
        self.shapes.get(&id)
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` when the scene holds no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Iterates shapes in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneShape)> + '_ {
        self.shapes.iter().map(|(id, shape)| (*id, shape))
    }
}

impl RayCaster for StaticScene {
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        filter: LayerMask,
    ) -> Option<RayHit> {
        let dir = direction.normalize();
        if dir.is_zero() || !max_distance.is_finite() || max_distance < 0.0 {
            return None;
        }
        let reach = Aabb2::from_points(&[origin, origin + dir.scale(max_distance)])?;

        let mut best: Option<RayHit> = None;
        for (id, shape) in &self.shapes {
            if !shape.layer.intersects(filter) || !shape.polygon.bounds().overlaps(&reach) {
                continue;
            }
            let Some((distance, normal)) = shape.polygon.raycast(origin, dir, max_distance) else {
                continue;
            };
            // Strict comparison keeps the lowest id on ties.
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(RayHit {
                    distance,
                    normal,
                    object: *id,
                });
            }
        }
        best
    }
}

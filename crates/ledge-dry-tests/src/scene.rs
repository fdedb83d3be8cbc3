// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Static level builders for resolver tests.
// Fixtures panic on malformed geometry; that is a bug in the test itself.
#![allow(clippy::expect_used)]

use ledge_geom::math::deg_to_rad;
use ledge_geom::{ConvexPolygon, LayerMask, ObjectId, StaticScene, Vec2};

/// Solid layer used by `BodyConfig::default()`.
pub const SOLID: LayerMask = LayerMask::from_layer(0);
/// One-way platform layer used by `BodyConfig::default()`.
pub const PLATFORM: LayerMask = LayerMask::from_layer(1);

/// Extent used for "infinite" floors and walls.
const FAR: f32 = 100.0;

/// Builds a [`StaticScene`] with sequential object ids starting at 1.
///
/// # Example
///
/// ```
/// use ledge_dry_tests::SceneBuilder;
///
/// let mut level = SceneBuilder::new();
/// let floor = level.ground(0.0);
/// let wall = level.wall(3.0, 4.0);
/// let scene = level.build();
/// assert_eq!(scene.len(), 2);
/// assert!(floor < wall);
/// ```
#[derive(Debug, Default)]
pub struct SceneBuilder {
    scene: StaticScene,
    last_id: u64,
}

impl SceneBuilder {
    /// Empty level.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> ObjectId {
        self.last_id += 1;
        ObjectId(self.last_id)
    }

    /// Adds a box on an arbitrary layer.
    pub fn block(&mut self, min: Vec2, max: Vec2, layer: LayerMask) -> ObjectId {
        let id = self.next_id();
        self.scene
            .insert_box(id, min, max, layer)
            .expect("fixture box must have positive size");
        id
    }

    /// Adds a convex polygon on an arbitrary layer.
    pub fn polygon(&mut self, points: Vec<Vec2>, layer: LayerMask) -> ObjectId {
        let id = self.next_id();
        let polygon = ConvexPolygon::new(points).expect("fixture polygon must be convex");
        self.scene.insert(id, polygon, layer);
        id
    }

    /// Solid box.
    pub fn solid_box(&mut self, min: Vec2, max: Vec2) -> ObjectId {
        self.block(min, max, SOLID)
    }

    /// One-way platform box.
    pub fn one_way(&mut self, min: Vec2, max: Vec2) -> ObjectId {
        self.block(min, max, PLATFORM)
    }

    /// Wide solid floor whose top surface is at `top`.
    pub fn ground(&mut self, top: f32) -> ObjectId {
        self.solid_box(Vec2::new(-FAR, top - 1.0), Vec2::new(FAR, top))
    }

    /// Tall solid wall spanning `x_min..x_max`.
    pub fn wall(&mut self, x_min: f32, x_max: f32) -> ObjectId {
        self.solid_box(Vec2::new(x_min, -FAR), Vec2::new(x_max, FAR))
    }

    /// Wide solid ceiling whose bottom surface is at `bottom`.
    pub fn ceiling(&mut self, bottom: f32) -> ObjectId {
        self.solid_box(Vec2::new(-FAR, bottom), Vec2::new(FAR, bottom + 1.0))
    }

    /// Solid right-angled ramp rising toward +x from `foot`, `run` long, at
    /// `angle_deg` above horizontal.
    pub fn ramp(&mut self, foot: Vec2, run: f32, angle_deg: f32) -> ObjectId {
        let rise = run * deg_to_rad(angle_deg).tan();
        self.polygon(
            vec![
                foot,
                Vec2::new(foot.x + run, foot.y),
                Vec2::new(foot.x + run, foot.y + rise),
            ],
            SOLID,
        )
    }

    /// Current scene, for tests that keep building after a first look.
    pub fn scene(&self) -> &StaticScene {
        &self.scene
    }

    /// Mutable scene, for removing shapes mid-test.
    pub fn scene_mut(&mut self) -> &mut StaticScene {
        &mut self.scene
    }

    /// Finishes the level.
    pub fn build(self) -> StaticScene {
        self.scene
    }
}

// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Geometry primitives for Ledge.

This crate provides:
- 2D vectors and axis-aligned boxes (`Vec2`, `Aabb2`).
- Collision layer masks and opaque object identities (`LayerMask`, `ObjectId`).
- The ray-query port consumed by the body resolver (`RayCaster`) and a
  deterministic convex-polygon backend (`StaticScene`).
- Probe geometry: two configured hitboxes turned into sampled swept probes
  (`ProbeConfig`, `Collider`, `ProbeHit`).

Design notes:
- Deterministic: no ambient state; scene iteration order is by object id.
- Float32 throughout; operations favor clarity and reproducibility.
- Rustdoc is treated as part of the contract; public items are documented.
"]

/// Error type for invalid geometry and probe configuration.
pub mod error;
/// Float32 math helpers and the `Vec2` type.
pub mod math;
/// Multi-ray probe configuration, collider segments, and the swept sampler.
pub mod probe;
/// Ray-query port and hit types.
pub mod ray;
/// Deterministic static scene implementing the ray-query port.
pub mod scene;
/// Foundational geometric types.
pub mod types;

pub use error::GeomError;
pub use math::Vec2;
pub use probe::{
    Collider, Hitbox, Probe, ProbeConfig, ProbeHit, ProbeSegment, ALMOST_ZERO, MIN_RAYCAST_UNIT,
};
pub use ray::{ObjectId, RayCaster, RayHit};
pub use scene::{SceneShape, StaticScene};
pub use types::aabb::Aabb2;
pub use types::layer::LayerMask;
pub use types::polygon::ConvexPolygon;

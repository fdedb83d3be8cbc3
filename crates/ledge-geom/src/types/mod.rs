// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core geometry types used by probes and scenes (AABB, layers, polygons).
//!
//! Determinism notes:
//! - Overlap semantics are inclusive on faces so a ray running along a box
//!   face is still considered by the narrow test.
//! - Polygons are stored counter-clockwise with precomputed outward normals,
//!   so a ray test visits edges in a fixed order.

#[doc = "Axis-aligned bounding boxes (world space)."]
pub mod aabb;
#[doc = "Collision layer bit masks."]
pub mod layer;
#[doc = "Convex polygons with ray intersection."]
pub mod polygon;

// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;

use crate::math::Vec2;
use crate::types::layer::LayerMask;

/// Opaque identity of a collidable object in the host scene.
///
/// The resolver never interprets the value; it only compares identities to
/// detect contact changes and to look up platform handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ObjectId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Nearest intersection reported by a [`RayCaster`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin along the (unit) direction.
    pub distance: f32,
    /// Outward surface normal at the hit point.
    pub normal: Vec2,
    /// Object that was hit.
    pub object: ObjectId,
}

/// Ray-query port the probes are sampled through.
///
/// Implementations must be deterministic for identical inputs: the same scene
/// and the same ray always produce the same hit. An origin that starts inside
/// a shape reports distance `0` with normal `-direction`; a ray that runs
/// along an edge without crossing it does not hit.
pub trait RayCaster {
    /// Casts from `origin` along `direction` up to `max_distance`, considering
    /// only objects whose layer intersects `filter`. `direction` need not be
    /// normalized; a zero direction never hits.
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        filter: LayerMask,
    ) -> Option<RayHit>;
}

impl<T: RayCaster + ?Sized> RayCaster for &T {
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        filter: LayerMask,
    ) -> Option<RayHit> {
        (**self).cast(origin, direction, max_distance, filter)
    }
}

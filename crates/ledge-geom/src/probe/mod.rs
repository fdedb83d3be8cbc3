// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Multi-ray probing for a body described by two overlapping rectangles.
//!
//! The *horizontal* hitbox is wide and flat; the *vertical* hitbox is tall and
//! narrow. Each named [`Probe`] is a segment on one of their edges, swept
//! along an axis by casting evenly spaced parallel rays through a
//! [`RayCaster`](crate::ray::RayCaster). Ray origins are pulled back inside
//! the body by a *skin* so surfaces the body already overlaps are still seen;
//! reported distances are net of that skin and therefore negative when the
//! body is embedded.

mod collider;
mod config;

pub use collider::Collider;
pub use config::{Hitbox, ProbeConfig};

use crate::math::Vec2;
use crate::ray::ObjectId;

/// Distances and speeds below this magnitude are treated as zero.
pub const ALMOST_ZERO: f32 = 0.01;

/// Default spacing between sampled rays along a probe segment.
pub const DEFAULT_RAYCAST_UNIT: f32 = 0.05;

/// Finest accepted ray spacing. Keeps the per-probe sample count bounded.
pub const MIN_RAYCAST_UNIT: f32 = 1e-4;

/// Named probe segments of a [`Collider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Probe {
    /// Left edge of the horizontal hitbox, swept toward −x. Wall detection.
    Left,
    /// Right edge of the horizontal hitbox, swept toward +x. Wall detection.
    Right,
    /// Left edge of the vertical hitbox, swept toward −x. Slope direction.
    VerticalLeft,
    /// Right edge of the vertical hitbox, swept toward +x. Slope direction.
    VerticalRight,
    /// Bottom edge of the vertical hitbox, swept toward −y. Ground detection.
    Down,
    /// Top edge of the vertical hitbox, swept toward +y. Ceiling detection.
    Up,
    /// Bottom edge of the horizontal hitbox, swept toward −y. Slope thickness.
    ThicknessDown,
    /// Top edge of the horizontal hitbox, swept toward +y. Slope thickness.
    ThicknessUp,
    /// Bottom edge of the vertical hitbox raised by the platform check
    /// offset, swept toward −y. Decides whether one-way platforms are solid.
    PlatformDown,
}

/// A sampling segment with its sweep parameters.
///
/// Produced by [`Collider::segment`] in body-local space; translate it to
/// world space before handing it to [`Collider::sweep`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeSegment {
    /// First endpoint.
    pub from: Vec2,
    /// Second endpoint.
    pub to: Vec2,
    /// Distance ray origins are pulled back against `direction`.
    pub skin: f32,
    /// Sweep direction (unit axis vector for the named probes).
    pub direction: Vec2,
    /// Discard raw hits at or below [`ALMOST_ZERO`] when set.
    pub ignore_near_zero: bool,
}

impl ProbeSegment {
    /// Returns the segment moved by `offset`.
    #[must_use]
    pub fn translated(self, offset: Vec2) -> Self {
        Self {
            from: self.from + offset,
            to: self.to + offset,
            ..self
        }
    }

    /// Length of the sampled segment.
    pub fn length(&self) -> f32 {
        (self.to - self.from).length()
    }
}

/// Reduced result of a swept probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    /// Whether any sampled ray hit.
    pub hit: bool,
    /// Distance from the probe segment to the surface; negative when the
    /// body overlaps it. `+inf` when nothing was hit.
    pub distance: f32,
    /// Surface normal of the nearest hit, zero when nothing was hit.
    pub normal: Vec2,
    /// Object of the nearest hit.
    pub object: Option<ObjectId>,
}

impl ProbeHit {
    /// The empty result.
    pub const NONE: Self = Self {
        hit: false,
        distance: f32::INFINITY,
        normal: Vec2::ZERO,
        object: None,
    };

    /// Returns `true` when the probe hit something at most `reach` away.
    pub fn within(&self, reach: f32) -> bool {
        self.hit && self.distance <= reach
    }
}

impl Default for ProbeHit {
    fn default() -> Self {
        Self::NONE
    }
}

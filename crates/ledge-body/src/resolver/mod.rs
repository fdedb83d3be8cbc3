// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-tick pipeline: swap contact buffers, integrate gravity, resolve Y,
//! resolve X, then tell touched platforms the body is still there.

pub mod sandwich;
mod x_axis;
mod y_axis;

use ledge_geom::math::deg_to_rad;
use ledge_geom::{LayerMask, Probe, ProbeHit, RayCaster, Vec2, ALMOST_ZERO};

use crate::body::KinematicBody;
use crate::contact;
use crate::platform::PlatformRegistry;
use crate::side::Side;

/// How one axis was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOutcome {
    /// Moved by the full velocity component.
    Free,
    /// Squeezed between opposing surfaces and recentred.
    Sandwich,
    /// Redirected along a slope met on `Side`.
    Slope(Side),
    /// Snapped against a surface on `Side` and bumped.
    Contact(Side),
    /// Held in place by a pinch on the other axis.
    Pinned(Side),
}

/// Summary of one [`KinematicBody::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Y-axis branch.
    pub vertical: AxisOutcome,
    /// X-axis branch.
    pub horizontal: AxisOutcome,
    /// Whether the body was pulled down onto a descending slope.
    pub slope_snap: bool,
}

pub(crate) fn tick<W: RayCaster + ?Sized>(
    body: &mut KinematicBody,
    world: &W,
    platforms: &mut PlatformRegistry,
) -> TickReport {
    body.previous = body.state;
    body.velocity += body.gravity;

    let vertical = y_axis::resolve(body, world, platforms);
    let (horizontal, slope_snap) = x_axis::resolve(body, world, platforms);
    contact::dispatch_stay(body, platforms);

    TickReport {
        vertical,
        horizontal,
        slope_snap,
    }
}

/// Filter for downward probes: one-way platforms count only while the body
/// is not already embedded in one (i.e. not passing up through it).
fn down_filter<W: RayCaster + ?Sized>(body: &KinematicBody, world: &W) -> LayerMask {
    let platform = body.collider.probe(
        world,
        body.position,
        Probe::PlatformDown,
        body.platform_layer,
        -body.velocity.y,
    );
    if platform.hit && platform.distance < ALMOST_ZERO {
        body.solid_layer
    } else {
        body.solid_layer | body.platform_layer
    }
}

/// Displacement of `speed` along a surface tilted `angle_deg` from its axis.
fn along_slope(angle_deg: f32, speed: f32, sign_x: f32, sign_y: f32) -> Vec2 {
    let a = deg_to_rad(angle_deg);
    Vec2::new(a.cos() * speed * sign_x, a.sin() * speed * sign_y)
}

/// Probe reports the body already inside a surface beyond the tolerance.
fn overlapping(hit: &ProbeHit) -> bool {
    hit.hit && hit.distance < -ALMOST_ZERO
}

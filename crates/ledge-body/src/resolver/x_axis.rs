// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use ledge_geom::math::sign;
use ledge_geom::{Probe, ProbeHit, RayCaster, Vec2, ALMOST_ZERO};
use tracing::{debug, trace};

use super::{along_slope, down_filter, sandwich, AxisOutcome};
use crate::body::KinematicBody;
use crate::contact;
use crate::events::BodyEvent;
use crate::platform::PlatformRegistry;
use crate::side::Side;

/// Probes gathered for one side of a horizontal contact.
struct SideProbes {
    side: Side,
    /// `+1` for right, `-1` for left.
    dir: f32,
    wall: ProbeHit,
    slope: ProbeHit,
    slope_check: bool,
    /// Vertical pinch flag on this side, set by the Y pass this tick.
    pinched: bool,
}

/// Resolves horizontal motion, snaps onto descending slopes, and tracks the
/// `Left` and `Right` slots. Returns the branch taken and whether the
/// descending-slope snap fired.
pub(super) fn resolve<W: RayCaster + ?Sized>(
    body: &mut KinematicBody,
    world: &W,
    platforms: &mut PlatformRegistry,
) -> (AxisOutcome, bool) {
    let v = body.velocity;
    // Read after the Y pass: vertical pinch flags are this tick's.
    let cur = body.state;
    let prev = body.previous;
    let pos = body.position;
    let solid = body.solid_layer;
    let filter = down_filter(body, world);

    let c = &body.collider;
    let left = c.probe(world, pos, Probe::Left, solid, -v.x);
    let right = c.probe(world, pos, Probe::Right, solid, v.x);
    let vleft = c.probe(world, pos, Probe::VerticalLeft, filter, -v.x);
    let vright = c.probe(world, pos, Probe::VerticalRight, filter, v.x);

    let pinned_right = cur.right_sandwich && !cur.left_sandwich;
    let pinned_left = cur.left_sandwich && !cur.right_sandwich;
    let right_check = (right.within(v.x) || pinned_right) && v.x >= -ALMOST_ZERO;
    let left_check = (left.within(-v.x) || pinned_left) && v.x <= ALMOST_ZERO;

    let state = &mut body.state;
    state.left_wall = false;
    state.right_wall = false;
    state.up_sandwich = false;
    state.down_sandwich = false;
    state.horizontal_gap = None;

    let outcome = if right.within(0.0) && left.within(0.0) {
        let (up, down) = sandwich::horizontal_sides(left.normal, right.normal);
        body.state.up_sandwich = up;
        body.state.down_sandwich = down;
        let extent = body.collider.config().horizontal_hitbox.width;
        let gap = sandwich::gap(extent, right.distance, left.distance);
        body.state.horizontal_gap = Some(gap);
        if !prev.is_horizontal_sandwich() {
            debug!(gap, up, down, "horizontal sandwich");
            body.emit(BodyEvent::HorizontalSandwich { gap });
        }
        body.position.x += sandwich::recenter(right.distance, left.distance);
        body.velocity.x = 0.0;
        AxisOutcome::Sandwich
    } else if right_check && !left_check {
        side_contact(
            body,
            SideProbes {
                side: Side::Right,
                dir: 1.0,
                wall: right,
                slope: vright,
                slope_check: vright.within(v.x) && v.x > ALMOST_ZERO,
                pinched: cur.right_sandwich,
            },
        )
    } else if left_check && !right_check {
        side_contact(
            body,
            SideProbes {
                side: Side::Left,
                dir: -1.0,
                wall: left,
                slope: vleft,
                slope_check: vleft.within(-v.x) && v.x < -ALMOST_ZERO,
                pinched: cur.left_sandwich,
            },
        )
    } else {
        body.position.x += v.x * body.time_scale;
        AxisOutcome::Free
    };

    let snap_reach = body.collider.config().slope_check_offset;
    let below = body
        .collider
        .probe(world, body.position, Probe::Down, filter, snap_reach);
    let pinched_both = body.state.left_sandwich && body.state.right_sandwich;
    let slope_snap = below.within(snap_reach) && body.velocity.y == 0.0 && !pinched_both;
    if slope_snap {
        body.position.y -= below.distance;
        body.velocity.y = 0.0;
    }
    trace!(?outcome, x = body.position.x, vx = body.velocity.x, slope_snap, "x axis");

    let v = body.velocity;
    let touching_right = if right.within(v.x + ALMOST_ZERO) {
        right.object
    } else {
        None
    };
    contact::track(body, platforms, Side::Right, touching_right);
    let touching_left = if left.within(-v.x + ALMOST_ZERO) {
        left.object
    } else {
        None
    };
    contact::track(body, platforms, Side::Left, touching_left);

    (outcome, slope_snap)
}

/// One-sided horizontal contact: pinned by a vertical pinch, walk up a
/// slope, or stop against a wall.
fn side_contact(body: &mut KinematicBody, p: SideProbes) -> AxisOutcome {
    let v = body.velocity;
    let toward = v.x * p.dir >= -ALMOST_ZERO;
    let angle = p.slope.normal.angle_deg(Vec2::UP);

    if p.pinched && p.wall.distance > 0.0 && toward {
        body.position.x += p.dir * p.slope.distance.min(0.0);
        body.velocity.x = 0.0;
        AxisOutcome::Pinned(p.side)
    } else if p.slope_check
        && p.wall.distance >= -ALMOST_ZERO
        && angle <= body.max_horizontal_slope_angle
    {
        let step = along_slope(angle, v.x.abs(), sign(v.x), 1.0);
        body.position += step.scale(body.time_scale);
        AxisOutcome::Slope(p.side)
    } else {
        body.position.x += p.dir * p.wall.distance;
        if p.side == Side::Left {
            body.state.left_wall = true;
        } else {
            body.state.right_wall = true;
        }
        body.bump.bump(&mut body.velocity, p.side, &p.wall);
        AxisOutcome::Contact(p.side)
    }
}

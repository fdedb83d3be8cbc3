// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use ledge_geom::math::{deg_to_rad, sign};
use ledge_geom::{Probe, RayCaster, Vec2, ALMOST_ZERO};
use tracing::{debug, trace};

use super::{along_slope, down_filter, overlapping, sandwich, AxisOutcome};
use crate::body::KinematicBody;
use crate::contact;
use crate::events::BodyEvent;
use crate::platform::PlatformRegistry;
use crate::side::Side;

/// Resolves vertical motion and tracks the `Up` and stepping (`Down`) slots.
///
/// Branches, first match wins: pinch between ceiling and floor, slope met
/// while rising, slope met while falling, ceiling, ground, free motion.
pub(super) fn resolve<W: RayCaster + ?Sized>(
    body: &mut KinematicBody,
    world: &W,
    platforms: &mut PlatformRegistry,
) -> AxisOutcome {
    let v = body.velocity;
    let g = body.gravity;
    let prev = body.previous;
    let pos = body.position;
    let solid = body.solid_layer;
    let filter = down_filter(body, world);

    let c = &body.collider;
    let up = c.probe(world, pos, Probe::Up, solid, v.y);
    let down = c.probe(world, pos, Probe::Down, filter, -v.y);
    let thick_up = c.probe(world, pos, Probe::ThicknessUp, solid, v.y);
    let thick_down = c.probe(world, pos, Probe::ThicknessDown, filter, -v.y);

    // A horizontal pinch from one side keeps the body stuck to that jaw.
    let pinned_up = prev.up_sandwich && !prev.down_sandwich;
    let pinned_down = prev.down_sandwich && !prev.up_sandwich;
    let up_check = (up.within(v.y) || pinned_up) && v.y > g.y;
    let down_check = (down.within(-v.y) || pinned_down) && v.y <= -g.y;

    let up_angle = thick_up.normal.angle_deg(Vec2::DOWN);
    let down_angle = thick_down.normal.angle_deg(Vec2::UP);
    let slope_ok = |angle: f32| !body.cap_vertical_slopes || angle <= body.max_horizontal_slope_angle;
    let up_slope = thick_up.within(v.y)
        && thick_up.normal.x.abs() > ALMOST_ZERO
        && v.y > ALMOST_ZERO
        && slope_ok(up_angle);
    let down_slope = thick_down.within(-v.y)
        && thick_down.normal.x.abs() > ALMOST_ZERO
        && v.y < -ALMOST_ZERO
        && slope_ok(down_angle);

    let state = &mut body.state;
    state.down_wall = false;
    state.up_wall = false;
    state.left_sandwich = false;
    state.right_sandwich = false;
    state.vertical_gap = None;

    let threshold = deg_to_rad(Vec2::UP.angle_deg(down.normal)).sin() * v.x.abs();
    let outcome = if up.within(threshold) && down.within(threshold) {
        let (left, right) = sandwich::vertical_sides(up.normal, down.normal);
        body.state.left_sandwich = left;
        body.state.right_sandwich = right;
        body.position.y += sandwich::recenter(up.distance, down.distance);
        let extent = body.collider.config().vertical_hitbox.height;
        let gap = sandwich::gap(extent, up.distance, down.distance);
        body.state.vertical_gap = Some(gap);
        if !prev.is_vertical_sandwich() {
            debug!(gap, left, right, "vertical sandwich");
            body.emit(BodyEvent::VerticalSandwich { gap });
        }
        body.velocity.y = 0.0;
        AxisOutcome::Sandwich
    } else if up_slope && !up_check {
        let step = along_slope(up_angle, v.y.abs(), sign(thick_up.normal.x), sign(v.y));
        body.position += step.scale(body.time_scale);
        AxisOutcome::Slope(Side::Up)
    } else if down_slope && !down_check {
        let step = along_slope(down_angle, v.y.abs(), sign(thick_down.normal.x), sign(v.y));
        body.position += step.scale(body.time_scale);
        AxisOutcome::Slope(Side::Down)
    } else if up_check && !down_check {
        if pinned_up {
            body.position.y += thick_up.distance.min(0.0);
            body.velocity.y = 0.0;
            AxisOutcome::Pinned(Side::Up)
        } else {
            body.position.y += up.distance;
            body.state.up_wall = true;
            body.bump.bump(&mut body.velocity, Side::Up, &up);
            AxisOutcome::Contact(Side::Up)
        }
    } else if down_check && !up_check {
        if pinned_down {
            body.position.y -= thick_down.distance.min(0.0);
            body.velocity.y = 0.0;
            AxisOutcome::Pinned(Side::Down)
        } else {
            body.position.y -= down.distance;
            // Landing while jammed into a wall sideways does not count as ground.
            let left = body
                .collider
                .probe(world, body.position, Probe::Left, solid, -v.x);
            let right = body
                .collider
                .probe(world, body.position, Probe::Right, solid, v.x);
            if !overlapping(&left) && !overlapping(&right) {
                body.bump.bump(&mut body.velocity, Side::Down, &down);
                body.state.down_wall = true;
            }
            AxisOutcome::Contact(Side::Down)
        }
    } else {
        body.position.y += v.y * body.time_scale;
        AxisOutcome::Free
    };
    trace!(?outcome, y = body.position.y, vy = body.velocity.y, "y axis");

    let above = if up_check { up.object } else { None };
    contact::track(body, platforms, Side::Up, above);
    let below = if down_check { down.object } else { None };
    contact::track(body, platforms, Side::Down, below);

    outcome
}

// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Body construction and tick-loop helpers.

use ledge_body::{KinematicBody, PlatformRegistry, TickReport};
use ledge_geom::{RayCaster, Vec2};

/// Default body resting at `position` with zero velocity.
pub fn body_at(position: Vec2) -> KinematicBody {
    let mut body = KinematicBody::default();
    body.set_position(position);
    body
}

/// Steps `body` `ticks` times and returns the per-tick reports.
pub fn run_ticks<W: RayCaster + ?Sized>(
    body: &mut KinematicBody,
    world: &W,
    platforms: &mut PlatformRegistry,
    ticks: usize,
) -> Vec<TickReport> {
    (0..ticks).map(|_| body.step(world, platforms)).collect()
}

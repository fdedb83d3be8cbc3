// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use ledge_geom::{ProbeHit, Vec2};

use crate::side::Side;

/// Velocity response when the body is snapped against a surface.
///
/// Invoked for wall, ceiling and ground contacts, after the position has been
/// corrected. Pinch clamps and slope redirection do not bump.
pub trait BumpPolicy {
    /// Adjusts `velocity` after hitting `hit` on `side` of the body.
    fn bump(&mut self, velocity: &mut Vec2, side: Side, hit: &ProbeHit);
}

/// Zeroes the velocity component pointing into the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StopOnBump;

impl BumpPolicy for StopOnBump {
    fn bump(&mut self, velocity: &mut Vec2, side: Side, _hit: &ProbeHit) {
        if side.is_horizontal() {
            velocity.x = 0.0;
        } else {
            velocity.y = 0.0;
        }
    }
}

impl<F> BumpPolicy for F
where
    F: FnMut(&mut Vec2, Side, &ProbeHit),
{
    fn bump(&mut self, velocity: &mut Vec2, side: Side, hit: &ProbeHit) {
        self(velocity, side, hit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_on_bump_clears_only_the_blocked_axis() {
        let mut v = Vec2::new(0.3, -0.4);
        StopOnBump.bump(&mut v, Side::Right, &ProbeHit::NONE);
        assert_eq!(v, Vec2::new(0.0, -0.4));
        let mut v = Vec2::new(0.3, -0.4);
        StopOnBump.bump(&mut v, Side::Down, &ProbeHit::NONE);
        assert_eq!(v, Vec2::new(0.3, 0.0));
    }

    #[test]
    fn closures_are_policies() {
        let mut bounce = |v: &mut Vec2, side: Side, _: &ProbeHit| {
            if side == Side::Down {
                v.y = -v.y * 0.5;
            }
        };
        let mut v = Vec2::new(0.0, -1.0);
        bounce.bump(&mut v, Side::Down, &ProbeHit::NONE);
        assert_eq!(v.y, 0.5);
    }
}

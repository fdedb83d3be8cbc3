// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::error::GeomError;
use crate::math::Vec2;
use crate::ray::RayCaster;
use crate::types::layer::LayerMask;

use super::{Hitbox, Probe, ProbeConfig, ProbeHit, ProbeSegment, ALMOST_ZERO};

/// Probe geometry of one body plus the swept ray sampler.
///
/// Segment endpoints are cached in body-local space and rebuilt by every
/// setter, so a probe call only has to translate them to the body position.
/// Setters validate the candidate configuration first and leave the collider
/// untouched when it is rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    config: ProbeConfig,
    enabled: bool,
    segments: [ProbeSegment; 9],
}

impl Default for Collider {
    fn default() -> Self {
        Self::from_valid(ProbeConfig::default())
    }
}

impl Collider {
    /// Builds a collider after validating `config`.
    pub fn new(config: ProbeConfig) -> Result<Self, GeomError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: ProbeConfig) -> Self {
        Self {
            config,
            enabled: true,
            segments: build_segments(&config),
        }
    }

    /// Current probe configuration.
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Replaces the whole configuration.
    pub fn set_config(&mut self, config: ProbeConfig) -> Result<(), GeomError> {
        config.validate()?;
        self.config = config;
        self.segments = build_segments(&config);
        Ok(())
    }

    /// Replaces the wide, flat hitbox.
    pub fn set_horizontal_hitbox(&mut self, hitbox: Hitbox) -> Result<(), GeomError> {
        self.set_config(ProbeConfig {
            horizontal_hitbox: hitbox,
            ..self.config
        })
    }

    /// Replaces the tall, narrow hitbox.
    pub fn set_vertical_hitbox(&mut self, hitbox: Hitbox) -> Result<(), GeomError> {
        self.set_config(ProbeConfig {
            vertical_hitbox: hitbox,
            ..self.config
        })
    }

    /// Moves the one-way platform probe.
    pub fn set_platform_check_offset(&mut self, offset: f32) -> Result<(), GeomError> {
        self.set_config(ProbeConfig {
            platform_check_offset: offset,
            ..self.config
        })
    }

    /// Changes the descending-slope snap reach.
    pub fn set_slope_check_offset(&mut self, offset: f32) -> Result<(), GeomError> {
        self.set_config(ProbeConfig {
            slope_check_offset: offset,
            ..self.config
        })
    }

    /// Changes the spacing of sampled rays.
    pub fn set_raycast_unit(&mut self, unit: f32) -> Result<(), GeomError> {
        self.set_config(ProbeConfig {
            raycast_unit: unit,
            ..self.config
        })
    }

    /// Whether probing is active.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// A disabled collider reports [`ProbeHit::NONE`] for every probe.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// See [`ProbeConfig::slope_check_rate`].
    pub fn slope_check_rate(&self) -> f32 {
        self.config.slope_check_rate()
    }

    /// Body-local segment of a named probe.
    pub fn segment(&self, probe: Probe) -> ProbeSegment {
        self.segments[probe as usize]
    }

    /// Sweeps a named probe from a body at `position` up to `distance`.
    pub fn probe<C: RayCaster + ?Sized>(
        &self,
        caster: &C,
        position: Vec2,
        probe: Probe,
        filter: LayerMask,
        distance: f32,
    ) -> ProbeHit {
        let segment = self.segment(probe).translated(position);
        self.sweep(caster, &segment, distance, filter)
    }

    /// Samples parallel rays along a world-space `segment` and keeps the
    /// nearest accepted hit.
    ///
    /// Samples are spaced at most `raycast_unit` apart with both endpoints
    /// included. Each ray starts `skin` behind its sample point and reaches
    /// `max(distance, ALMOST_ZERO)` past it. On equal distances the later
    /// sample wins.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn sweep<C: RayCaster + ?Sized>(
        &self,
        caster: &C,
        segment: &ProbeSegment,
        distance: f32,
        filter: LayerMask,
    ) -> ProbeHit {
        if !self.enabled {
            return ProbeHit::NONE;
        }
        let direction = segment.direction.normalize();
        if direction.is_zero() {
            return ProbeHit::NONE;
        }

        // Bounded: segment length and raycast_unit are validated.
        let count = (segment.length() / self.config.raycast_unit).ceil() as u32;
        let reach = distance.max(ALMOST_ZERO) + segment.skin;
        let pull_back = direction.scale(segment.skin);

        let mut nearest = ProbeHit::NONE;
        for i in 0..=count {
            let t = if count == 0 {
                0.0
            } else {
                i as f32 / count as f32
            };
            let origin = segment.from.lerp(segment.to, t) - pull_back;
            let Some(raw) = caster.cast(origin, direction, reach, filter) else {
                continue;
            };
            if segment.ignore_near_zero && raw.distance <= ALMOST_ZERO {
                continue;
            }
            let net = raw.distance - segment.skin;
            if net <= nearest.distance {
                nearest = ProbeHit {
                    hit: true,
                    distance: net,
                    normal: raw.normal,
                    object: Some(raw.object),
                };
            }
        }
        nearest
    }
}

fn build_segments(config: &ProbeConfig) -> [ProbeSegment; 9] {
    let h = config.horizontal_hitbox;
    let v = config.vertical_hitbox;
    let raise = Vec2::new(0.0, config.platform_check_offset);
    let seg = |from: Vec2, to: Vec2, skin: f32, direction: Vec2| ProbeSegment {
        from,
        to,
        skin,
        direction,
        ignore_near_zero: true,
    };

    // Order matches `Probe`'s discriminants.
    [
        seg(h.corner(-1.0, -1.0), h.corner(-1.0, 1.0), h.width * 0.5, Vec2::LEFT),
        seg(h.corner(1.0, -1.0), h.corner(1.0, 1.0), h.width * 0.5, Vec2::RIGHT),
        seg(v.corner(-1.0, -1.0), v.corner(-1.0, 1.0), v.width, Vec2::LEFT),
        seg(v.corner(1.0, -1.0), v.corner(1.0, 1.0), v.width, Vec2::RIGHT),
        seg(v.corner(-1.0, -1.0), v.corner(1.0, -1.0), v.height * 0.5, Vec2::DOWN),
        seg(v.corner(-1.0, 1.0), v.corner(1.0, 1.0), v.height * 0.5, Vec2::UP),
        seg(h.corner(-1.0, -1.0), h.corner(1.0, -1.0), h.height, Vec2::DOWN),
        seg(h.corner(-1.0, 1.0), h.corner(1.0, 1.0), h.height, Vec2::UP),
        ProbeSegment {
            ignore_near_zero: false,
            ..seg(
                v.corner(-1.0, -1.0) + raise,
                v.corner(1.0, -1.0) + raise,
                h.height - config.platform_check_offset,
                Vec2::DOWN,
            )
        },
    ]
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::ray::{ObjectId, RayHit};
    use std::cell::Cell;

    /// Counts casts and never hits.
    #[derive(Default)]
    struct CountingCaster {
        casts: Cell<u32>,
    }

    impl RayCaster for CountingCaster {
        fn cast(&self, _: Vec2, _: Vec2, _: f32, _: LayerMask) -> Option<RayHit> {
            self.casts.set(self.casts.get() + 1);
            None
        }
    }

    /// Reports the same hit for every ray.
    struct ConstantCaster(f32);

    impl RayCaster for ConstantCaster {
        fn cast(&self, _: Vec2, direction: Vec2, _: f32, _: LayerMask) -> Option<RayHit> {
            Some(RayHit {
                distance: self.0,
                normal: -direction,
                object: ObjectId(7),
            })
        }
    }

    #[test]
    fn down_probe_spans_vertical_bottom_edge() {
        let c = Collider::default();
        let seg = c.segment(Probe::Down);
        assert_eq!(seg.from, Vec2::new(-0.375, -0.5));
        assert_eq!(seg.to, Vec2::new(0.375, -0.5));
        assert_eq!(seg.skin, 0.5);
        assert_eq!(seg.direction, Vec2::DOWN);
        assert!(seg.ignore_near_zero);
    }

    #[test]
    fn platform_probe_is_raised_by_offset() {
        let c = Collider::default();
        let seg = c.segment(Probe::PlatformDown);
        assert!((seg.from.y - -0.45).abs() < 1e-6);
        assert!((seg.skin - 0.7).abs() < 1e-6);
        assert!(!seg.ignore_near_zero);
    }

    #[test]
    fn wall_probes_use_horizontal_hitbox() {
        let c = Collider::default();
        let right = c.segment(Probe::Right);
        assert_eq!(right.from, Vec2::new(0.5, -0.375));
        assert_eq!(right.to, Vec2::new(0.5, 0.375));
        assert_eq!(right.skin, 0.5);
        let vright = c.segment(Probe::VerticalRight);
        assert_eq!(vright.from, Vec2::new(0.375, -0.5));
        assert_eq!(vright.skin, 0.75);
    }

    #[test]
    fn setter_rebuilds_segments() {
        let mut c = Collider::default();
        c.set_vertical_hitbox(Hitbox::new(0.5, 2.0)).unwrap();
        assert_eq!(c.segment(Probe::Up).from, Vec2::new(-0.25, 1.0));
        assert_eq!(c.segment(Probe::Up).skin, 1.0);
    }

    #[test]
    fn rejected_setter_keeps_previous_config() {
        let mut c = Collider::default();
        let before = c.clone();
        assert!(c.set_vertical_hitbox(Hitbox::new(0.75, 0.5)).is_err());
        assert!(c.set_raycast_unit(-1.0).is_err());
        assert!(c.set_raycast_unit(1e-30).is_err());
        assert_eq!(c, before);
    }

    #[test]
    fn sample_count_covers_both_endpoints() {
        let c = Collider::default();
        let caster = CountingCaster::default();
        // 0.75 / 0.05 = 15 intervals -> 16 samples.
        let _ = c.probe(&caster, Vec2::ZERO, Probe::Down, LayerMask::ALL, 1.0);
        assert_eq!(caster.casts.get(), 16);
    }

    #[test]
    fn zero_length_segment_samples_once() {
        let c = Collider::default();
        let caster = CountingCaster::default();
        let seg = ProbeSegment {
            from: Vec2::new(1.0, 1.0),
            to: Vec2::new(1.0, 1.0),
            skin: 0.1,
            direction: Vec2::DOWN,
            ignore_near_zero: true,
        };
        let _ = c.sweep(&caster, &seg, 1.0, LayerMask::ALL);
        assert_eq!(caster.casts.get(), 1);
    }

    #[test]
    fn zero_direction_and_disabled_collider_never_hit() {
        let mut c = Collider::default();
        let caster = ConstantCaster(0.2);
        let seg = ProbeSegment {
            direction: Vec2::ZERO,
            ..c.segment(Probe::Down)
        };
        assert_eq!(c.sweep(&caster, &seg, 1.0, LayerMask::ALL), ProbeHit::NONE);

        c.set_enabled(false);
        assert_eq!(
            c.probe(&caster, Vec2::ZERO, Probe::Down, LayerMask::ALL, 1.0),
            ProbeHit::NONE
        );
    }

    #[test]
    fn near_zero_raw_hits_are_filtered_unless_disabled() {
        let c = Collider::default();
        let caster = ConstantCaster(0.005);
        let down = c.probe(&caster, Vec2::ZERO, Probe::Down, LayerMask::ALL, 1.0);
        assert!(!down.hit);
        let platform = c.probe(&caster, Vec2::ZERO, Probe::PlatformDown, LayerMask::ALL, 1.0);
        assert!(platform.hit);
        assert!((platform.distance - (0.005 - 0.7)).abs() < 1e-6);
        assert_eq!(platform.object, Some(ObjectId(7)));
    }
}

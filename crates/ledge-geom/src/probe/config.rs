// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::error::GeomError;
use crate::math::Vec2;

use super::{DEFAULT_RAYCAST_UNIT, MIN_RAYCAST_UNIT};

/// Width and height of an axis-aligned rectangle centred on the body.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hitbox {
    /// Extent along x.
    pub width: f32,
    /// Extent along y.
    pub height: f32,
}

impl Hitbox {
    /// Creates a hitbox of the given size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Corner at `(sx, sy)` half-extents from the centre, with `sx, sy ∈ {-1, 1}`.
    pub(crate) fn corner(self, sx: f32, sy: f32) -> Vec2 {
        Vec2::new(self.width * 0.5 * sx, self.height * 0.5 * sy)
    }

    fn check(self, name: &str) -> Result<(), GeomError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(GeomError::InvalidHitbox(format!(
                "{name} hitbox {}x{} must be finite and positive",
                self.width, self.height
            )))
        }
    }
}

/// Probe geometry for one body.
///
/// Invariants (checked by [`ProbeConfig::validate`]):
/// - every dimension is finite and positive;
/// - the vertical hitbox is strictly taller and the horizontal hitbox strictly
///   wider than the other;
/// - offsets are finite and non-negative, and the platform check offset stays
///   below the horizontal hitbox height so the platform probe keeps a
///   positive skin;
/// - `raycast_unit` is finite and at least [`MIN_RAYCAST_UNIT`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProbeConfig {
    /// Wide, flat rectangle: wall probes and slope thickness probes.
    pub horizontal_hitbox: Hitbox,
    /// Tall, narrow rectangle: ground/ceiling probes and slope direction probes.
    pub vertical_hitbox: Hitbox,
    /// Height above the vertical hitbox's bottom edge at which the one-way
    /// platform probe starts.
    pub platform_check_offset: f32,
    /// Extra downward reach used to keep the body glued to descending slopes.
    pub slope_check_offset: f32,
    /// Spacing between sampled rays along a probe segment.
    pub raycast_unit: f32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            horizontal_hitbox: Hitbox::new(1.0, 0.75),
            vertical_hitbox: Hitbox::new(0.75, 1.0),
            platform_check_offset: 0.05,
            slope_check_offset: 0.1,
            raycast_unit: DEFAULT_RAYCAST_UNIT,
        }
    }
}

impl ProbeConfig {
    /// Checks every invariant, rejecting rather than clamping.
    pub fn validate(&self) -> Result<(), GeomError> {
        let h = self.horizontal_hitbox;
        let v = self.vertical_hitbox;
        h.check("horizontal")?;
        v.check("vertical")?;
        if v.height <= h.height {
            return Err(GeomError::InvalidHitbox(format!(
                "vertical height {} must exceed horizontal height {}",
                v.height, h.height
            )));
        }
        if h.width <= v.width {
            return Err(GeomError::InvalidHitbox(format!(
                "horizontal width {} must exceed vertical width {}",
                h.width, v.width
            )));
        }

        let non_negative = |v: f32| v.is_finite() && v >= 0.0;
        if !non_negative(self.platform_check_offset) || self.platform_check_offset >= h.height {
            return Err(GeomError::InvalidProbe(format!(
                "platform_check_offset {} must be in [0, {})",
                self.platform_check_offset, h.height
            )));
        }
        if !non_negative(self.slope_check_offset) {
            return Err(GeomError::InvalidProbe(format!(
                "slope_check_offset {} must be finite and non-negative",
                self.slope_check_offset
            )));
        }
        if !(self.raycast_unit.is_finite() && self.raycast_unit >= MIN_RAYCAST_UNIT) {
            return Err(GeomError::InvalidProbe(format!(
                "raycast_unit {} must be finite and at least {MIN_RAYCAST_UNIT}",
                self.raycast_unit
            )));
        }
        Ok(())
    }

    /// Rise over run between the two hitboxes' corners: the steepest slope
    /// the thickness probes can see before the wall probes do.
    pub fn slope_check_rate(&self) -> f32 {
        (self.vertical_hitbox.height - self.horizontal_hitbox.height)
            / (self.horizontal_hitbox.width - self.vertical_hitbox.width)
    }
}

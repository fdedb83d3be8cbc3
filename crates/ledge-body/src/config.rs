// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Body configuration, the config storage port, and the typed config service.

use ledge_geom::{Collider, GeomError, Hitbox, LayerMask, ProbeConfig, Vec2};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::body::KinematicBody;

/// Storage port for raw config blobs (keyed by logical name).
pub trait ConfigStore {
    /// Load a raw config blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Persist a raw config blob.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key not present in store.
    #[error("not found")]
    NotFound,
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Hitbox or probe settings rejected by the collider.
    #[error("geometry: {0}")]
    Geometry(#[from] GeomError),
    /// A body setting is out of range.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Offending setting.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// Thin service that serializes config values and delegates storage to a `ConfigStore`.
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Create a new service using the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Consume the service and return the inner store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Load and deserialize a config value for `key`. Returns `Ok(None)` if missing.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        match self.store.load_raw(key) {
            Ok(bytes) => {
                if bytes.is_empty() {
                    return Ok(None);
                }
                let value = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Serialize and persist a config value for `key`.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), ConfigError>
    where
        T: Serialize,
    {
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)
    }

    /// Loads the body config stored under `key`, falling back to defaults
    /// when it is missing, and validates it.
    pub fn load_body(&self, key: &str) -> Result<BodyConfig, ConfigError> {
        let config = self.load::<BodyConfig>(key)?.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }
}

/// Everything needed to build a [`KinematicBody`].
///
/// Every field has a default, so a partial JSON document is a valid config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Wide, flat hitbox.
    pub horizontal_hitbox: Hitbox,
    /// Tall, narrow hitbox.
    pub vertical_hitbox: Hitbox,
    /// Platform probe offset above the vertical hitbox's bottom edge.
    pub platform_check_offset: f32,
    /// Reach of the descending-slope snap.
    pub slope_check_offset: f32,
    /// Spacing between sampled rays.
    pub raycast_unit: f32,
    /// Added to the velocity every tick.
    pub gravity: Vec2,
    /// Layers that block from every side.
    pub solid_layer: LayerMask,
    /// One-way layers that only block a falling body.
    pub platform_layer: LayerMask,
    /// Steepest slope (degrees) walked along instead of treated as a wall.
    pub max_horizontal_slope_angle: f32,
    /// Also apply `max_horizontal_slope_angle` to slopes met vertically.
    pub cap_vertical_slopes: bool,
    /// Scales free and slope displacement.
    pub time_scale: f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        let probe = ProbeConfig::default();
        Self {
            horizontal_hitbox: probe.horizontal_hitbox,
            vertical_hitbox: probe.vertical_hitbox,
            platform_check_offset: probe.platform_check_offset,
            slope_check_offset: probe.slope_check_offset,
            raycast_unit: probe.raycast_unit,
            gravity: Vec2::new(0.0, -0.02),
            solid_layer: LayerMask::from_layer(0),
            platform_layer: LayerMask::from_layer(1),
            max_horizontal_slope_angle: 50.0,
            cap_vertical_slopes: false,
            time_scale: 1.0,
        }
    }
}

impl BodyConfig {
    /// Probe part of the config.
    pub fn probe_config(&self) -> ProbeConfig {
        ProbeConfig {
            horizontal_hitbox: self.horizontal_hitbox,
            vertical_hitbox: self.vertical_hitbox,
            platform_check_offset: self.platform_check_offset,
            slope_check_offset: self.slope_check_offset,
            raycast_unit: self.raycast_unit,
        }
    }

    /// Checks probe geometry and body settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.probe_config().validate()?;
        check_gravity(self.gravity)?;
        check_slope_angle(self.max_horizontal_slope_angle)?;
        check_time_scale(self.time_scale)?;
        Ok(())
    }

    /// Validates and builds a resting body at the origin.
    pub fn build(&self) -> Result<KinematicBody, ConfigError> {
        self.validate()?;
        let collider = Collider::new(self.probe_config())?;
        let mut body = KinematicBody::new(collider);
        body.set_gravity(self.gravity)?;
        body.set_layers(self.solid_layer, self.platform_layer);
        body.set_max_horizontal_slope_angle(self.max_horizontal_slope_angle)?;
        body.set_cap_vertical_slopes(self.cap_vertical_slopes);
        body.set_time_scale(self.time_scale)?;
        Ok(body)
    }
}

pub(crate) fn check_gravity(gravity: Vec2) -> Result<(), ConfigError> {
    if gravity.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field: "gravity",
            reason: format!("{gravity:?} is not finite"),
        })
    }
}

pub(crate) fn check_slope_angle(degrees: f32) -> Result<(), ConfigError> {
    if (0.0..=90.0).contains(&degrees) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field: "max_horizontal_slope_angle",
            reason: format!("{degrees} is outside [0, 90] degrees"),
        })
    }
}

pub(crate) fn check_time_scale(scale: f32) -> Result<(), ConfigError> {
    if scale.is_finite() && scale >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field: "time_scale",
            reason: format!("{scale} must be finite and non-negative"),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: BodyConfig =
            serde_json::from_str(r#"{ "time_scale": 0.5, "solid_layer": 4 }"#).unwrap();
        assert_eq!(cfg.time_scale, 0.5);
        assert_eq!(cfg.solid_layer, LayerMask::from_layer(2));
        assert_eq!(cfg.vertical_hitbox, Hitbox::new(0.75, 1.0));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn bad_hitbox_surfaces_as_geometry_error() {
        let cfg = BodyConfig {
            vertical_hitbox: Hitbox::new(2.0, 1.0),
            ..BodyConfig::default()
        };
        assert!(matches!(cfg.build(), Err(ConfigError::Geometry(GeomError::InvalidHitbox(_)))));
    }

    #[test]
    fn out_of_range_settings_are_rejected() {
        let base = BodyConfig::default();
        let bad = [
            BodyConfig { max_horizontal_slope_angle: 91.0, ..base },
            BodyConfig { max_horizontal_slope_angle: f32::NAN, ..base },
            BodyConfig { time_scale: -1.0, ..base },
            BodyConfig { gravity: Vec2::new(0.0, f32::INFINITY), ..base },
        ];
        for cfg in bad {
            assert!(matches!(cfg.validate(), Err(ConfigError::Invalid { .. })), "{cfg:?}");
        }
    }

    #[test]
    fn build_applies_every_setting() {
        let cfg = BodyConfig {
            gravity: Vec2::new(0.0, -0.05),
            max_horizontal_slope_angle: 30.0,
            cap_vertical_slopes: true,
            time_scale: 2.0,
            ..BodyConfig::default()
        };
        let body = cfg.build().unwrap();
        assert_eq!(body.gravity(), Vec2::new(0.0, -0.05));
        assert_eq!(body.max_horizontal_slope_angle(), 30.0);
        assert!(body.cap_vertical_slopes());
        assert_eq!(body.time_scale(), 2.0);
        assert_eq!(body.config(), cfg);
    }
}

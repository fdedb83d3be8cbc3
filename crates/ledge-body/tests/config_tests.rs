// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use ledge_body::{BodyConfig, ConfigError, ConfigService};
use ledge_dry_tests::InMemoryConfigStore;
use ledge_geom::{Hitbox, Vec2};

#[test]
fn missing_config_falls_back_to_defaults() {
    let service = ConfigService::new(InMemoryConfigStore::new());
    assert_eq!(service.load_body("hero").unwrap(), BodyConfig::default());
}

#[test]
fn partial_document_keeps_other_defaults() {
    let store = InMemoryConfigStore::with_raw(
        "hero",
        r#"{ "gravity": { "x": 0.0, "y": -0.0625 }, "max_horizontal_slope_angle": 35.0 }"#,
    );
    let service = ConfigService::new(store);

    let config = service.load_body("hero").unwrap();
    assert_eq!(config.gravity, Vec2::new(0.0, -0.0625));
    assert_eq!(config.max_horizontal_slope_angle, 35.0);
    assert_eq!(config.vertical_hitbox, BodyConfig::default().vertical_hitbox);

    let body = config.build().unwrap();
    assert_eq!(body.gravity(), Vec2::new(0.0, -0.0625));
    assert_eq!(body.config(), config);
}

#[test]
fn stored_config_with_equal_hitboxes_is_rejected() {
    let bad = BodyConfig {
        vertical_hitbox: Hitbox::new(1.0, 0.75),
        ..BodyConfig::default()
    };
    let store = InMemoryConfigStore::new();
    let service = ConfigService::new(store.clone());
    service.save("hero", &bad).unwrap();

    let err = service.load_body("hero").unwrap_err();
    assert!(matches!(err, ConfigError::Geometry(_)), "{err}");
    assert!(bad.build().is_err());
}

#[test]
fn out_of_range_body_settings_are_invalid() {
    let steep = BodyConfig {
        max_horizontal_slope_angle: 120.0,
        ..BodyConfig::default()
    };
    assert!(matches!(
        steep.validate(),
        Err(ConfigError::Invalid {
            field: "max_horizontal_slope_angle",
            ..
        })
    ));

    let frozen_gravity = BodyConfig {
        gravity: Vec2::new(0.0, f32::NAN),
        ..BodyConfig::default()
    };
    assert!(frozen_gravity.validate().is_err());
}

#[test]
fn garbage_json_surfaces_as_serde_error() {
    let service = ConfigService::new(InMemoryConfigStore::with_raw("hero", "not json"));
    assert!(matches!(service.load_body("hero"), Err(ConfigError::Serde(_))));
}

#[test]
fn store_failures_propagate() {
    let store = InMemoryConfigStore::new();
    store.set_fail_on_save(true);
    let service = ConfigService::new(store.clone());
    assert!(service.save("hero", &BodyConfig::default()).is_err());
    assert!(store.keys().is_empty());
}

// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Integration tests for the swept ray sampler against a static scene.
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use ledge_geom::{
    Collider, ConvexPolygon, LayerMask, ObjectId, Probe, ProbeConfig, StaticScene, Vec2,
    ALMOST_ZERO,
};
use proptest::prelude::*;

const SOLID: LayerMask = LayerMask::from_layer(0);

fn floor() -> StaticScene {
    let mut scene = StaticScene::new();
    scene
        .insert_box(ObjectId(1), Vec2::new(-50.0, -1.0), Vec2::new(50.0, 0.0), SOLID)
        .unwrap();
    scene
}

#[test]
fn body_resting_on_floor_reports_zero_distance() {
    let c = Collider::default();
    let hit = c.probe(&floor(), Vec2::new(0.0, 0.5), Probe::Down, SOLID, 0.02);
    assert!(hit.hit);
    assert!(hit.distance.abs() < 1e-6);
    assert!((hit.normal - Vec2::UP).length() < 1e-6);
    assert_eq!(hit.object, Some(ObjectId(1)));
}

#[test]
fn embedded_body_reports_negative_distance() {
    let c = Collider::default();
    let hit = c.probe(&floor(), Vec2::new(0.0, 0.3), Probe::Down, SOLID, 0.0);
    assert!(hit.hit);
    assert!((hit.distance - -0.2).abs() < 1e-5);
}

#[test]
fn floor_beyond_reach_is_missed() {
    let c = Collider::default();
    let hit = c.probe(&floor(), Vec2::new(0.0, 1.0), Probe::Down, SOLID, 0.25);
    assert!(!hit.hit);
}

#[test]
fn filter_excludes_floor_layer() {
    let c = Collider::default();
    let hit = c.probe(
        &floor(),
        Vec2::new(0.0, 0.5),
        Probe::Down,
        LayerMask::from_layer(3),
        1.0,
    );
    assert!(!hit.hit);
}

#[test]
fn adjacent_floors_report_the_later_sample() {
    let mut scene = StaticScene::new();
    scene
        .insert_box(ObjectId(1), Vec2::new(-5.0, -1.0), Vec2::new(0.0, 0.0), SOLID)
        .unwrap();
    scene
        .insert_box(ObjectId(2), Vec2::new(0.0, -1.0), Vec2::new(5.0, 0.0), SOLID)
        .unwrap();
    let c = Collider::default();
    let hit = c.probe(&scene, Vec2::new(0.0, 0.5), Probe::Down, SOLID, 0.1);
    assert_eq!(hit.object, Some(ObjectId(2)));
}

#[test]
fn right_probe_sees_ramp_normal() {
    let mut scene = StaticScene::new();
    let ramp = ConvexPolygon::new(vec![
        Vec2::new(1.0, 0.0),
        Vec2::new(3.0, 0.0),
        Vec2::new(3.0, 2.0),
    ])
    .unwrap();
    scene.insert(ObjectId(4), ramp, SOLID);
    let c = Collider::default();
    let hit = c.probe(&scene, Vec2::new(0.0, 0.6), Probe::VerticalRight, SOLID, 1.0);
    assert!(hit.hit);
    let expected = Vec2::new(-1.0, 1.0).normalize();
    assert!((hit.normal - expected).length() < 1e-5);
    // Lowest sample at y = 0.1 meets the ramp at x = 1.1.
    assert!((hit.distance - 0.725).abs() < 1e-5);
}

#[test]
fn thickness_up_measures_from_horizontal_top_edge() {
    let mut scene = StaticScene::new();
    scene
        .insert_box(ObjectId(5), Vec2::new(-5.0, 1.0), Vec2::new(5.0, 2.0), SOLID)
        .unwrap();
    let c = Collider::default();
    // Horizontal top edge sits at 0.375 + 0.5; ceiling bottom at 1.0.
    let hit = c.probe(&scene, Vec2::new(0.0, 0.5), Probe::ThicknessUp, SOLID, 0.2);
    assert!(hit.hit);
    assert!((hit.distance - 0.125).abs() < 1e-5);
}

proptest! {
    #[test]
    fn down_distance_tracks_height_above_floor(x in -10.0f32..10.0, y in 0.5f32..3.0) {
        let c = Collider::default();
        let hit = c.probe(&floor(), Vec2::new(x, y), Probe::Down, SOLID, 5.0);
        prop_assert!(hit.hit);
        prop_assert!((hit.distance - (y - 0.5)).abs() < 1e-4);
    }

    #[test]
    fn reported_hits_stay_within_reach(y in 0.0f32..2.0, reach in 0.0f32..1.0) {
        let c = Collider::default();
        let hit = c.probe(&floor(), Vec2::new(0.0, y), Probe::Down, SOLID, reach);
        if hit.hit {
            prop_assert!(hit.distance <= reach.max(ALMOST_ZERO) + 1e-5);
        }
    }

    #[test]
    fn finer_sampling_never_moves_a_flat_hit(unit in 0.01f32..0.5) {
        let config = ProbeConfig { raycast_unit: unit, ..ProbeConfig::default() };
        let c = Collider::new(config).unwrap();
        let hit = c.probe(&floor(), Vec2::new(0.25, 0.75), Probe::Down, SOLID, 1.0);
        prop_assert!(hit.hit);
        prop_assert!((hit.distance - 0.25).abs() < 1e-5);
    }
}

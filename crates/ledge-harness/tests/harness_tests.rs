// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scenario runs, golden files, and the CLI commands end to end.
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;

use ledge_geom::ObjectId;
use ledge_harness::cli::{execute, Cli, Commands};
use ledge_harness::{run_scenario, Golden, Scenario};

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(format!("{name}.json"))
}

fn load(name: &str) -> Scenario {
    Scenario::load(&scenario_path(name)).expect("bundled scenario must load")
}

#[test]
fn bundled_scenarios_are_deterministic() {
    for name in ["walk_ramp", "one_way_hop", "pinch"] {
        let scenario = load(name);
        let a = run_scenario(&scenario).unwrap();
        let b = run_scenario(&scenario).unwrap();
        assert_eq!(a.hashes.len(), scenario.ticks as usize, "{name}");
        assert_eq!(a.hashes, b.hashes, "{name}");
        assert_eq!(a.last, b.last, "{name}");
    }
}

#[test]
fn walker_moves_right_and_touches_the_ramp() {
    let scenario = load("walk_ramp");
    let run = run_scenario(&scenario).unwrap();
    let last = run.last.unwrap();
    assert!(last.position.x > scenario.start.x);
    let [enter, _, _] = last.calls[&ObjectId(2)];
    assert!(enter >= 1);
}

#[test]
fn hop_lands_on_the_one_way_platform() {
    let run = run_scenario(&load("one_way_hop")).unwrap();
    let last = run.last.unwrap();
    assert!((last.position.y - 2.2).abs() < 1e-3, "y = {}", last.position.y);
    assert_eq!(last.touching.stepping, Some(ObjectId(2)));
    let [enter, stay, exit] = last.calls[&ObjectId(2)];
    assert_eq!((enter, exit), (1, 0));
    assert!(stay > 0);
}

#[test]
fn changing_the_input_changes_the_trail() {
    let base = load("one_way_hop");
    let mut later = base.clone();
    later.jump_ticks = vec![6];
    let a = run_scenario(&base).unwrap().hashes;
    let b = run_scenario(&later).unwrap().hashes;
    assert_eq!(a[..4], b[..4]);
    assert_ne!(a[4], b[4]);
}

#[test]
fn record_then_run_verifies() {
    let dir = tempfile::tempdir().unwrap();
    let golden = dir.path().join("hop.hashes.json");
    execute(Cli {
        command: Commands::Record {
            scenario: scenario_path("one_way_hop"),
            out: golden.clone(),
        },
    })
    .unwrap();

    let saved = Golden::load(&golden).unwrap();
    assert_eq!(saved.scenario, "one_way_hop");
    assert_eq!(saved.hashes_hex.len(), 120);

    execute(Cli {
        command: Commands::Run {
            scenario: scenario_path("one_way_hop"),
            golden: Some(golden),
            emit_repro: None,
        },
    })
    .unwrap();
}

#[test]
fn tampered_golden_fails_and_emits_repro() {
    let dir = tempfile::tempdir().unwrap();
    let golden_path = dir.path().join("pinch.hashes.json");
    let run = run_scenario(&load("pinch")).unwrap();
    let mut golden = Golden::new("pinch", run.hashes);
    golden.hashes_hex[9] = "00".repeat(32);
    golden.save(&golden_path).unwrap();

    let repro = dir.path().join("repro");
    let err = execute(Cli {
        command: Commands::Run {
            scenario: scenario_path("pinch"),
            golden: Some(golden_path),
            emit_repro: Some(repro.clone()),
        },
    })
    .unwrap_err();

    assert!(err.to_string().contains("tick 10"), "{err}");
    for file in [
        "scenario.json",
        "actual.hashes.json",
        "expected.hashes.json",
        "diff.txt",
    ] {
        assert!(repro.join(file).is_file(), "{file} missing");
    }
}

#[test]
fn torture_passes_on_a_deterministic_scenario() {
    execute(Cli {
        command: Commands::Torture {
            scenario: scenario_path("walk_ramp"),
            runs: 3,
            emit_repro: None,
        },
    })
    .unwrap();
}

#[test]
fn golden_with_foreign_domain_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("g.json");
    let mut golden = Golden::new("x", vec![]);
    golden.hash_domain = "SOMETHING_ELSE".into();
    golden.save(&path).unwrap();
    assert!(Golden::load(&path).is_err());
}

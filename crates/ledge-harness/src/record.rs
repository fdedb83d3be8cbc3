// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scenario execution and per-tick state hashing.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use anyhow::{Context, Result};
use ledge_body::{ContactSlots, ContactState, KinematicBody, Platform, PlatformRegistry, Side};
use ledge_geom::{ObjectId, Vec2};
use serde::Serialize;
use tracing::{debug, info};

use crate::scenario::Scenario;

/// Domain separator mixed into every tick hash.
pub const HASH_DOMAIN: &str = "LEDGE_TICK_HASH_V1";

/// Platform callback counts for one object: `[enter, stay, exit]`.
pub type CallCounts = [u32; 3];

/// Body snapshot taken after a tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickRecord {
    /// 1-based tick number.
    pub tick: u32,
    /// Position after the tick.
    pub position: Vec2,
    /// Velocity after the tick.
    pub velocity: Vec2,
    /// Contact flags after the tick.
    pub state: ContactState,
    /// Touched objects after the tick.
    pub touching: ContactSlots,
    /// Cumulative platform callbacks per registered object.
    pub calls: BTreeMap<ObjectId, CallCounts>,
}

impl TickRecord {
    /// BLAKE3 digest of the snapshot, over the exact bit patterns of every float.
    pub fn state_hash(&self) -> [u8; 32] {
        let mut h = blake3::Hasher::new();
        h.update(HASH_DOMAIN.as_bytes());
        h.update(&self.tick.to_le_bytes());
        for v in [self.position, self.velocity] {
            h.update(&v.x.to_bits().to_le_bytes());
            h.update(&v.y.to_bits().to_le_bytes());
        }
        h.update(&flag_bits(&self.state).to_le_bytes());
        for gap in [self.state.vertical_gap, self.state.horizontal_gap] {
            hash_option(&mut h, gap.map(|g| u64::from(g.to_bits())));
        }
        for side in [Side::Left, Side::Right, Side::Up, Side::Down] {
            hash_option(&mut h, self.touching.get(side).map(|id| id.0));
        }
        h.update(&(self.calls.len() as u64).to_le_bytes());
        for (id, counts) in &self.calls {
            h.update(&id.0.to_le_bytes());
            for n in counts {
                h.update(&n.to_le_bytes());
            }
        }
        h.finalize().into()
    }
}

fn flag_bits(s: &ContactState) -> u16 {
    [
        s.left_wall,
        s.right_wall,
        s.down_wall,
        s.up_wall,
        s.left_sandwich,
        s.right_sandwich,
        s.up_sandwich,
        s.down_sandwich,
    ]
    .iter()
    .enumerate()
    .fold(0, |acc, (i, &set)| acc | (u16::from(set) << i))
}

fn hash_option(h: &mut blake3::Hasher, value: Option<u64>) {
    match value {
        Some(v) => {
            h.update(&[1]);
            h.update(&v.to_le_bytes());
        }
        None => {
            h.update(&[0]);
        }
    }
}

type Tally = Rc<RefCell<BTreeMap<ObjectId, CallCounts>>>;

/// Handler that only counts its callbacks.
struct CountingPlatform {
    object: ObjectId,
    tally: Tally,
}

impl CountingPlatform {
    fn bump(&self, slot: usize) {
        let mut tally = self.tally.borrow_mut();
        let counts = tally.entry(self.object).or_default();
        counts[slot] += 1;
    }
}

impl Platform for CountingPlatform {
    fn on_body_enter(&mut self, _body: &mut KinematicBody, _side: Side) {
        self.bump(0);
    }

    fn on_body_stay(&mut self, _body: &mut KinematicBody, _side: Side) {
        self.bump(1);
    }

    fn on_body_exit(&mut self, _body: &mut KinematicBody, _side: Side) {
        self.bump(2);
    }
}

/// Outcome of one scenario run.
#[derive(Debug, Clone)]
pub struct Run {
    /// Hex-encoded state hash after every tick.
    pub hashes: Vec<String>,
    /// Snapshot after the last tick, if any tick ran.
    pub last: Option<TickRecord>,
}

/// Runs `scenario` from scratch.
pub fn run_scenario(scenario: &Scenario) -> Result<Run> {
    scenario.check()?;
    let scene = scenario.build_scene()?;
    let mut body = scenario.config.build().context("failed to build body")?;
    body.set_position(scenario.start);
    body.set_velocity(scenario.velocity);

    let tally = Tally::default();
    let mut platforms = PlatformRegistry::new();
    for &object in &scenario.platforms {
        tally.borrow_mut().insert(object, CallCounts::default());
        platforms.insert(
            object,
            CountingPlatform {
                object,
                tally: Rc::clone(&tally),
            },
        );
    }

    info!(name = %scenario.name, ticks = scenario.ticks, shapes = scenario.shapes.len(), "scenario start");
    let mut hashes = Vec::with_capacity(scenario.ticks as usize);
    let mut last = None;
    for tick in 1..=scenario.ticks {
        drive(&mut body, scenario, tick);
        let report = body.step(&scene, &mut platforms);
        let record = TickRecord {
            tick,
            position: body.position(),
            velocity: body.velocity(),
            state: *body.state(),
            touching: *body.touching(),
            calls: tally.borrow().clone(),
        };
        let hash = hex::encode(record.state_hash());
        debug!(tick, ?report, %hash, "tick");
        hashes.push(hash);
        last = Some(record);
    }
    Ok(Run { hashes, last })
}

/// Applies the scripted input for `tick` before it is stepped.
fn drive(body: &mut KinematicBody, scenario: &Scenario, tick: u32) {
    let mut v = body.velocity();
    if let Some(speed) = scenario.drive {
        v.x = speed;
    }
    if scenario.jump_ticks.contains(&tick) && body.is_grounded() {
        v.y = scenario.jump_speed;
    }
    body.set_velocity(v);
}

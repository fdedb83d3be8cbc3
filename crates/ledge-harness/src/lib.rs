// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ledge determinism harness.
//!
//! Runs a [`scenario::Scenario`] (a level, a body config, and a scripted
//! input track) for a fixed number of ticks, hashes the body after every tick,
//! and compares the hash trail against a recorded golden file or against
//! repeated runs of itself.

pub mod cli;
pub mod golden;
pub mod record;
pub mod scenario;

pub use golden::Golden;
pub use record::{run_scenario, Run, TickRecord};
pub use scenario::{Scenario, ShapeSpec};

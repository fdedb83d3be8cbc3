// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for Ledge crates.
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`scene`] - Level builders (floors, walls, one-way platforms, ramps)
//! - [`platform`] - Recording platform handlers and an event sink
//! - [`run`] - Body construction and tick-loop helpers
#![forbid(unsafe_code)]

pub mod config;
pub mod platform;
pub mod run;
pub mod scene;

pub use config::InMemoryConfigStore;
pub use platform::{CallKind, CallLog, EventSink, PlatformCall, RecordingPlatform};
pub use run::{body_at, run_ticks};
pub use scene::{SceneBuilder, PLATFORM, SOLID};

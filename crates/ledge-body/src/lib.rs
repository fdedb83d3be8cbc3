// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Kinematic platformer body for Ledge.

A [`KinematicBody`] is probed with two overlapping rectangles (see
`ledge_geom::Collider`) against any [`ledge_geom::RayCaster`]. Each
[`KinematicBody::step`]:

1. copies the current contact flags into the previous-tick buffer,
2. adds gravity to the velocity,
3. resolves the Y axis (pinch, slopes, ceiling, ground, free motion),
4. resolves the X axis (pinch, walls, slopes, free motion) and glues the body
   to descending slopes,
5. sends `on_body_stay` to every touched [`Platform`].

Contact changes are reported to the [`PlatformRegistry`] and to event
subscribers as they happen. Nothing here allocates per tick or reads ambient
state, so identical inputs give bit-identical trajectories.
"]

/// Body state, accessors, and the per-tick entry point.
pub mod body;
/// Velocity response on contact.
pub mod bump;
pub mod config;
mod contact;
pub mod events;
pub mod platform;
pub mod resolver;
/// Sides of the body.
pub mod side;
pub mod state;

pub use body::KinematicBody;
pub use bump::{BumpPolicy, StopOnBump};
pub use config::{BodyConfig, ConfigError, ConfigService, ConfigStore};
pub use events::{BodyEvent, SubscriptionId};
pub use platform::{Platform, PlatformRegistry};
pub use resolver::{AxisOutcome, TickReport};
pub use side::Side;
pub use state::{ContactSlots, ContactState};

// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;

use ledge_geom::{Collider, LayerMask, RayCaster, Vec2};

use crate::bump::{BumpPolicy, StopOnBump};
use crate::config::{self, BodyConfig, ConfigError};
use crate::events::{BodyEvent, SubscriptionId, Subscribers};
use crate::platform::PlatformRegistry;
use crate::resolver::{self, TickReport};
use crate::side::Side;
use crate::state::{ContactSlots, ContactState};

/// A single kinematic platformer character.
///
/// The body owns its position; hosts copy it to and from their own transform.
/// Call [`step`](Self::step) once per fixed tick. Velocity is in world units
/// per tick.
pub struct KinematicBody {
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) gravity: Vec2,
    pub(crate) solid_layer: LayerMask,
    pub(crate) platform_layer: LayerMask,
    pub(crate) collider: Collider,
    pub(crate) max_horizontal_slope_angle: f32,
    pub(crate) cap_vertical_slopes: bool,
    pub(crate) time_scale: f32,
    pub(crate) state: ContactState,
    pub(crate) previous: ContactState,
    pub(crate) slots: ContactSlots,
    pub(crate) subscribers: Subscribers,
    pub(crate) bump: Box<dyn BumpPolicy>,
}

impl KinematicBody {
    /// Creates a resting body at the origin with default body settings.
    pub fn new(collider: Collider) -> Self {
        let defaults = BodyConfig::default();
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            gravity: defaults.gravity,
            solid_layer: defaults.solid_layer,
            platform_layer: defaults.platform_layer,
            collider,
            max_horizontal_slope_angle: defaults.max_horizontal_slope_angle,
            cap_vertical_slopes: defaults.cap_vertical_slopes,
            time_scale: defaults.time_scale,
            state: ContactState::default(),
            previous: ContactState::default(),
            slots: ContactSlots::default(),
            subscribers: Subscribers::default(),
            bump: Box::new(StopOnBump),
        }
    }

    /// Advances one tick against `world`, notifying `platforms` of contact changes.
    pub fn step<W: RayCaster + ?Sized>(
        &mut self,
        world: &W,
        platforms: &mut PlatformRegistry,
    ) -> TickReport {
        resolver::tick(self, world, platforms)
    }

    /// World position of the body centre.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Teleports the body. Contact state is left as is until the next tick.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Moves the body by `delta` without collision.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Velocity in world units per tick.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Replaces the velocity.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Mutable access for per-component edits (e.g. `velocity_mut().x = speed`).
    pub fn velocity_mut(&mut self) -> &mut Vec2 {
        &mut self.velocity
    }

    /// Per-tick acceleration.
    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Changes gravity; rejects non-finite values.
    pub fn set_gravity(&mut self, gravity: Vec2) -> Result<(), ConfigError> {
        config::check_gravity(gravity)?;
        self.gravity = gravity;
        Ok(())
    }

    /// Layers that block from every side.
    pub fn solid_layer(&self) -> LayerMask {
        self.solid_layer
    }

    /// One-way layers.
    pub fn platform_layer(&self) -> LayerMask {
        self.platform_layer
    }

    /// Replaces both layer filters.
    pub fn set_layers(&mut self, solid: LayerMask, platform: LayerMask) {
        self.solid_layer = solid;
        self.platform_layer = platform;
    }

    /// Probe geometry.
    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    /// Probe geometry; its setters validate and rebuild the probe segments.
    pub fn collider_mut(&mut self) -> &mut Collider {
        &mut self.collider
    }

    /// Steepest walkable slope in degrees.
    pub fn max_horizontal_slope_angle(&self) -> f32 {
        self.max_horizontal_slope_angle
    }

    /// Changes the walkable slope limit; accepts `[0, 90]` degrees.
    pub fn set_max_horizontal_slope_angle(&mut self, degrees: f32) -> Result<(), ConfigError> {
        config::check_slope_angle(degrees)?;
        self.max_horizontal_slope_angle = degrees;
        Ok(())
    }

    /// Whether the slope limit also applies to slopes met vertically.
    pub fn cap_vertical_slopes(&self) -> bool {
        self.cap_vertical_slopes
    }

    /// See [`cap_vertical_slopes`](Self::cap_vertical_slopes).
    pub fn set_cap_vertical_slopes(&mut self, cap: bool) {
        self.cap_vertical_slopes = cap;
    }

    /// Displacement multiplier for free and slope motion.
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Changes the time scale; rejects negative or non-finite values.
    pub fn set_time_scale(&mut self, scale: f32) -> Result<(), ConfigError> {
        config::check_time_scale(scale)?;
        self.time_scale = scale;
        Ok(())
    }

    /// Replaces the bump response.
    pub fn set_bump_policy(&mut self, policy: impl BumpPolicy + 'static) {
        self.bump = Box::new(policy);
    }

    /// Current settings as a config value.
    pub fn config(&self) -> BodyConfig {
        let probe = self.collider.config();
        BodyConfig {
            horizontal_hitbox: probe.horizontal_hitbox,
            vertical_hitbox: probe.vertical_hitbox,
            platform_check_offset: probe.platform_check_offset,
            slope_check_offset: probe.slope_check_offset,
            raycast_unit: probe.raycast_unit,
            gravity: self.gravity,
            solid_layer: self.solid_layer,
            platform_layer: self.platform_layer,
            max_horizontal_slope_angle: self.max_horizontal_slope_angle,
            cap_vertical_slopes: self.cap_vertical_slopes,
            time_scale: self.time_scale,
        }
    }

    /// Contact flags after the last tick.
    pub fn state(&self) -> &ContactState {
        &self.state
    }

    /// Contact flags after the tick before that.
    pub fn previous_state(&self) -> &ContactState {
        &self.previous
    }

    /// Objects touched on each side.
    pub fn touching(&self) -> &ContactSlots {
        &self.slots
    }

    /// Standing on ground or on the lower jaw of a pinch.
    pub fn is_grounded(&self) -> bool {
        self.state.is_grounded()
    }

    /// Grounded now, airborne on the previous tick.
    pub fn just_landed(&self) -> bool {
        self.state.is_grounded() && !self.previous.is_grounded()
    }

    /// Airborne now, grounded on the previous tick.
    pub fn just_left_ground(&self) -> bool {
        !self.state.is_grounded() && self.previous.is_grounded()
    }

    /// Blocked on `side` now but not on the previous tick.
    pub fn wall_entered(&self, side: Side) -> bool {
        self.state.wall(side) && !self.previous.wall(side)
    }

    /// A vertical pinch began this tick.
    pub fn sandwich_started_vertical(&self) -> bool {
        self.state.is_vertical_sandwich() && !self.previous.is_vertical_sandwich()
    }

    /// A horizontal pinch began this tick.
    pub fn sandwich_started_horizontal(&self) -> bool {
        self.state.is_horizontal_sandwich() && !self.previous.is_horizontal_sandwich()
    }

    /// Registers an event listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&BodyEvent) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    /// Removes an event listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub(crate) fn emit(&mut self, event: BodyEvent) {
        self.subscribers.emit(&event);
    }
}

impl fmt::Debug for KinematicBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KinematicBody")
            .field("position", &self.position)
            .field("velocity", &self.velocity)
            .field("state", &self.state)
            .field("slots", &self.slots)
            .field("subscribers", &self.subscribers)
            .finish_non_exhaustive()
    }
}

impl Default for KinematicBody {
    fn default() -> Self {
        Self::new(Collider::default())
    }
}

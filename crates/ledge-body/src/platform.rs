// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Contact callbacks for objects that react to the body (moving platforms,
//! springs, crumbling floors, ...).

use std::collections::BTreeMap;

use ledge_geom::ObjectId;

use crate::body::KinematicBody;
use crate::side::Side;

/// Capability an object exposes to react to body contact.
///
/// All methods default to no-ops. Callbacks get the body mutably and may move
/// it or change its velocity. `on_body_enter` and `on_body_exit` run while a
/// tick is in progress, so they can observe a body whose Y axis is resolved
/// and whose X axis is not; `on_body_stay` runs after both axes.
pub trait Platform {
    /// The body started touching this object on `side`.
    fn on_body_enter(&mut self, _body: &mut KinematicBody, _side: Side) {}
    /// The body is still touching this object on `side` at the end of a tick.
    fn on_body_stay(&mut self, _body: &mut KinematicBody, _side: Side) {}
    /// The body stopped touching this object on `side`.
    fn on_body_exit(&mut self, _body: &mut KinematicBody, _side: Side) {}
}

/// Platform handlers keyed by the identity of the object they belong to.
///
/// Objects without a handler still show up in contact slots and body events;
/// they just receive no callbacks.
#[derive(Default)]
pub struct PlatformRegistry {
    handlers: BTreeMap<ObjectId, Box<dyn Platform>>,
}

impl PlatformRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the handler for `object`.
    pub fn insert(&mut self, object: ObjectId, platform: impl Platform + 'static) {
        self.handlers.insert(object, Box::new(platform));
    }

    /// Drops the handler for `object`.
    pub fn remove(&mut self, object: ObjectId) -> Option<Box<dyn Platform>> {
        self.handlers.remove(&object)
    }

    /// Whether `object` has a handler.
    pub fn contains(&self, object: ObjectId) -> bool {
        self.handlers.contains_key(&object)
    }

    /// Handler for `object`, if any.
    pub fn get_mut(&mut self, object: ObjectId) -> Option<&mut (dyn Platform + 'static)> {
        self.handlers.get_mut(&object).map(|p| &mut **p)
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` when no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl core::fmt::Debug for PlatformRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Body-level notifications and their subscriber list.

use core::fmt;

use ledge_geom::ObjectId;
use serde::{Deserialize, Serialize};

use crate::side::Side;

/// Something a listener may want to react to during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyEvent {
    /// A ceiling and a floor started pinching the body.
    VerticalSandwich {
        /// Distance between the two surfaces.
        gap: f32,
    },
    /// Two walls started pinching the body.
    HorizontalSandwich {
        /// Distance between the two surfaces.
        gap: f32,
    },
    /// The body started touching `object` on `side`.
    PlatformEnter {
        /// Touched object.
        object: ObjectId,
        /// Side of the body.
        side: Side,
        /// Whether a platform handler is registered for `object`.
        platform: bool,
    },
    /// The body stopped touching `object` on `side`.
    PlatformExit {
        /// Previously touched object.
        object: ObjectId,
        /// Side of the body.
        side: Side,
        /// Whether a platform handler is registered for `object`.
        platform: bool,
    },
}

/// Handle returned by [`KinematicBody::subscribe`](crate::KinematicBody::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&BodyEvent)>;

/// Ordered listener list; delivery follows registration order.
#[derive(Default)]
pub struct Subscribers {
    next: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Subscribers {
    /// Registers `listener` and returns its handle.
    pub fn subscribe(&mut self, listener: impl FnMut(&BodyEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if the handle was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` when nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub(crate) fn emit(&mut self, event: &BodyEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn delivery_follows_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut subs = Subscribers::default();
        for tag in ["a", "b", "c"] {
            let seen = Rc::clone(&seen);
            subs.subscribe(move |_| seen.borrow_mut().push(tag));
        }
        subs.emit(&BodyEvent::VerticalSandwich { gap: 0.5 });
        assert_eq!(*seen.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn unsubscribe_removes_only_that_listener() {
        let hits = Rc::new(RefCell::new(0));
        let mut subs = Subscribers::default();
        let h = Rc::clone(&hits);
        let first = subs.subscribe(move |_| *h.borrow_mut() += 1);
        let h = Rc::clone(&hits);
        subs.subscribe(move |_| *h.borrow_mut() += 10);

        assert!(subs.unsubscribe(first));
        assert!(!subs.unsubscribe(first));
        subs.emit(&BodyEvent::HorizontalSandwich { gap: 0.1 });
        assert_eq!(*hits.borrow(), 10);
        assert_eq!(subs.len(), 1);
    }
}

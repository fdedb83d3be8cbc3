// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Platform handlers that record every callback, and an event sink.

use std::cell::RefCell;
use std::rc::Rc;

use ledge_body::{BodyEvent, KinematicBody, Platform, Side};
use ledge_geom::{ObjectId, Vec2};

/// Which platform callback fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// `on_body_enter`.
    Enter,
    /// `on_body_stay`.
    Stay,
    /// `on_body_exit`.
    Exit,
}

/// One recorded callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformCall {
    /// Object the handler belongs to.
    pub object: ObjectId,
    /// Callback.
    pub kind: CallKind,
    /// Side of the body.
    pub side: Side,
}

/// Shared, ordered log of platform callbacks across several handlers.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<PlatformCall>>>);

impl CallLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: PlatformCall) {
        self.0.borrow_mut().push(call);
    }

    /// Copy of every call so far.
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.0.borrow().clone()
    }

    /// Calls of one kind, in order.
    pub fn of_kind(&self, kind: CallKind) -> Vec<PlatformCall> {
        self.0.borrow().iter().filter(|c| c.kind == kind).copied().collect()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Handler that appends each callback to a [`CallLog`].
///
/// Optionally pushes the body on enter, to exercise callbacks that mutate
/// the body mid-tick (springs, conveyors).
#[derive(Debug, Clone)]
pub struct RecordingPlatform {
    object: ObjectId,
    log: CallLog,
    push_on_enter: Option<Vec2>,
}

impl RecordingPlatform {
    /// Records into `log` as `object`.
    pub fn new(object: ObjectId, log: &CallLog) -> Self {
        Self {
            object,
            log: log.clone(),
            push_on_enter: None,
        }
    }

    /// Sets the body's velocity to `velocity` whenever it enters.
    pub fn launching(mut self, velocity: Vec2) -> Self {
        self.push_on_enter = Some(velocity);
        self
    }

    fn record(&self, kind: CallKind, side: Side) {
        self.log.push(PlatformCall {
            object: self.object,
            kind,
            side,
        });
    }
}

impl Platform for RecordingPlatform {
    fn on_body_enter(&mut self, body: &mut KinematicBody, side: Side) {
        self.record(CallKind::Enter, side);
        if let Some(velocity) = self.push_on_enter {
            body.set_velocity(velocity);
        }
    }

    fn on_body_stay(&mut self, _body: &mut KinematicBody, side: Side) {
        self.record(CallKind::Stay, side);
    }

    fn on_body_exit(&mut self, _body: &mut KinematicBody, side: Side) {
        self.record(CallKind::Exit, side);
    }
}

/// Collects body events through a subscription.
#[derive(Debug, Clone, Default)]
pub struct EventSink(Rc<RefCell<Vec<BodyEvent>>>);

impl EventSink {
    /// Subscribes a new sink to `body`.
    pub fn attach(body: &mut KinematicBody) -> Self {
        let sink = Self::default();
        let inner = Rc::clone(&sink.0);
        body.subscribe(move |event| inner.borrow_mut().push(*event));
        sink
    }

    /// Copy of every event so far.
    pub fn events(&self) -> Vec<BodyEvent> {
        self.0.borrow().clone()
    }

    /// Forgets everything received so far.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-side contact bookkeeping and platform notification.

use ledge_geom::ObjectId;
use tracing::debug;

use crate::body::KinematicBody;
use crate::events::BodyEvent;
use crate::platform::PlatformRegistry;
use crate::side::Side;

/// Records that the body now touches `touched` on `side`.
///
/// A change of object notifies exit on the old one strictly before enter on
/// the new one. Exit handlers still see the old object in the slot; enter
/// handlers already see the new one.
pub(crate) fn track(
    body: &mut KinematicBody,
    platforms: &mut PlatformRegistry,
    side: Side,
    touched: Option<ObjectId>,
) {
    let current = body.slots.get(side);
    if current == touched {
        return;
    }

    if let Some(object) = current {
        let platform = platforms.contains(object);
        debug!(%object, %side, platform, "contact exit");
        body.emit(BodyEvent::PlatformExit {
            object,
            side,
            platform,
        });
        if let Some(handler) = platforms.get_mut(object) {
            handler.on_body_exit(body, side);
        }
        body.slots.set(side, None);
    }

    if let Some(object) = touched {
        body.slots.set(side, Some(object));
        let platform = platforms.contains(object);
        debug!(%object, %side, platform, "contact enter");
        if let Some(handler) = platforms.get_mut(object) {
            handler.on_body_enter(body, side);
        }
        body.emit(BodyEvent::PlatformEnter {
            object,
            side,
            platform,
        });
    }
}

/// Sends `on_body_stay` to every touched platform: left, right, down, up.
pub(crate) fn dispatch_stay(body: &mut KinematicBody, platforms: &mut PlatformRegistry) {
    for side in Side::STAY_ORDER {
        let Some(object) = body.slots.get(side) else {
            continue;
        };
        if let Some(handler) = platforms.get_mut(object) {
            handler.on_body_stay(body, side);
        }
    }
}

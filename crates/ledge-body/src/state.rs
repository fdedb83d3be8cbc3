// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-tick contact flags and the objects touched on each side.

use ledge_geom::ObjectId;
use serde::{Deserialize, Serialize};

use crate::side::Side;

/// Contact flags written by the axis resolvers.
///
/// The Y pass owns `down_wall`, `up_wall`, the vertical pinch flags
/// (`left_sandwich`, `right_sandwich`) and `vertical_gap`; the X pass owns
/// the rest. Each pass clears its own flags before resolving.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContactState {
    /// Blocked on the left by a wall.
    pub left_wall: bool,
    /// Blocked on the right by a wall.
    pub right_wall: bool,
    /// Standing on ground.
    pub down_wall: bool,
    /// Blocked by a ceiling.
    pub up_wall: bool,
    /// Pinched vertically with the squeeze coming from the left.
    pub left_sandwich: bool,
    /// Pinched vertically with the squeeze coming from the right.
    pub right_sandwich: bool,
    /// Pinched horizontally with the squeeze coming from above.
    pub up_sandwich: bool,
    /// Pinched horizontally with the squeeze coming from below.
    pub down_sandwich: bool,
    /// Distance between the two surfaces of a vertical pinch.
    pub vertical_gap: Option<f32>,
    /// Distance between the two surfaces of a horizontal pinch.
    pub horizontal_gap: Option<f32>,
}

impl ContactState {
    /// Standing on something, either ground or the lower jaw of a pinch.
    pub fn is_grounded(&self) -> bool {
        self.down_wall || self.down_sandwich
    }

    /// Wall flag for `side`.
    pub fn wall(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left_wall,
            Side::Right => self.right_wall,
            Side::Down => self.down_wall,
            Side::Up => self.up_wall,
        }
    }

    /// Pinched between ceiling and floor.
    pub fn is_vertical_sandwich(&self) -> bool {
        self.left_sandwich || self.right_sandwich
    }

    /// Pinched between two walls.
    pub fn is_horizontal_sandwich(&self) -> bool {
        self.up_sandwich || self.down_sandwich
    }
}

/// Objects currently touched on each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactSlots {
    /// Touched on the left.
    pub left: Option<ObjectId>,
    /// Touched on the right.
    pub right: Option<ObjectId>,
    /// Touched above.
    pub up: Option<ObjectId>,
    /// Stood on.
    pub stepping: Option<ObjectId>,
}

impl ContactSlots {
    /// Object touched on `side`.
    pub fn get(&self, side: Side) -> Option<ObjectId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
            Side::Down => self.stepping,
            Side::Up => self.up,
        }
    }

    pub(crate) fn set(&mut self, side: Side, object: Option<ObjectId>) {
        let slot = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
            Side::Down => &mut self.stepping,
            Side::Up => &mut self.up,
        };
        *slot = object;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grounded_by_floor_or_lower_jaw() {
        let mut s = ContactState::default();
        assert!(!s.is_grounded());
        s.down_sandwich = true;
        assert!(s.is_grounded());
        s = ContactState {
            down_wall: true,
            ..ContactState::default()
        };
        assert!(s.is_grounded());
    }

    #[test]
    fn down_slot_is_stepping() {
        let mut slots = ContactSlots::default();
        slots.set(Side::Down, Some(ObjectId(3)));
        assert_eq!(slots.stepping, Some(ObjectId(3)));
        assert_eq!(slots.get(Side::Down), Some(ObjectId(3)));
        assert_eq!(slots.get(Side::Up), None);
    }
}

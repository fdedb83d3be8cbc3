// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;

use serde::{Deserialize, Serialize};

/// Side of the body a contact is on.
///
/// `Down` is the surface the body stands on; platform callbacks receive
/// `Side::Down` while the body is stepping on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// −x.
    Left,
    /// +x.
    Right,
    /// −y.
    Down,
    /// +y.
    Up,
}

impl Side {
    /// Order in which `on_body_stay` is dispatched at the end of a tick.
    pub const STAY_ORDER: [Self; 4] = [Self::Left, Self::Right, Self::Down, Self::Up];

    /// Returns `true` for `Left` and `Right`.
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Down => "down",
            Self::Up => "up",
        })
    }
}

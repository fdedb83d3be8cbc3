// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use thiserror::Error;

/// Errors raised when building shapes or probe configurations.
///
/// Per-tick probing never fails; these only surface at configuration time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeomError {
    /// The hitbox pair violates the tall/narrow vs wide/flat invariant, or a
    /// dimension is not finite and positive.
    #[error("invalid hitbox: {0}")]
    InvalidHitbox(String),
    /// A probe offset or sampling step is out of range.
    #[error("invalid probe setting: {0}")]
    InvalidProbe(String),
    /// The polygon has fewer than three vertices, zero area, or non-finite points.
    #[error("degenerate polygon: {0}")]
    DegeneratePolygon(String),
    /// The polygon is not convex.
    #[error("polygon is not convex")]
    NonConvex,
}

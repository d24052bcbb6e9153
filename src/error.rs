//! Turn rejections, informational outcomes, and configuration errors.

use crate::axis::{Axis, AxisMapping};

/// Why a turn intent did not start a turn.
///
/// None of these are fatal; they are state-machine guards reported back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    /// The input does not correspond to any turn or meta-control.
    #[error("input is not a recognized turn intent")]
    UnrecognizedIntent,
    /// A locked face on another axis forbids turning this axis.
    #[error("turning {mapping} is blocked by a locked face on another axis")]
    TurnBlocked { mapping: AxisMapping },
    /// Another turn is still animating; the intent was dropped.
    #[error("a turn about {axis:?} is still in progress")]
    TurnInProgress { axis: Axis },
}

/// What an accepted intent did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TurnOutcome {
    /// A face turn started animating.
    Started {
        mapping: AxisMapping,
        /// Signed target angle in radians.
        target_angle: f32,
    },
    /// Lock mode is active; the face lock was flipped instead of turning.
    LockToggled { mapping: AxisMapping, locked: bool },
    /// The base turn angle was changed, in degrees.
    AngleAdjusted { turn_angle: f32 },
}

/// Invalid [`PuzzleConfig`](crate::PuzzleConfig) values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("turn angle must be 45, 90 or 180 degrees, got {0}")]
    TurnAngle(f32),
    #[error("turn speed must be positive, got {0}")]
    TurnSpeed(f32),
    #[error("distance limits must satisfy 0 < min <= max, got {min}..{max}")]
    DistanceLimits { min: f32, max: f32 },
}

//! Error types for the game core

use crate::game::PhaseKind;
use thiserror::Error;

/// Actions the state machine declines. None of these is fatal: the
/// controller logs them and the game carries on in the same phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("cannot start: calibration incomplete (field missing: {field_missing}, ball missing: {ball_missing})")]
    IncompleteCalibration { field_missing: bool, ball_missing: bool },
    #[error("clicks are not used while {phase:?}")]
    InvalidClickTarget { phase: PhaseKind },
    #[error("{action} is only available while {expected:?}")]
    WrongPhase { action: &'static str, expected: PhaseKind },
    #[error("no pixel to sample at ({x}, {y})")]
    NoSample { x: i32, y: i32 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("goal size must be positive, got {width}x{height}")]
    GoalSize { width: i32, height: i32 },
    #[error("score animation must last at least one tick")]
    AnimationTicks,
    #[error("contour noise floor must not be negative, got {0}")]
    NoiseFloor(f64),
}

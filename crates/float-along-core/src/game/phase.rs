use super::goal::Goal;
use super::score::ScoreState;
use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Game phase, carrying only the data that exists in that phase
#[derive(Debug, Clone, PartialEq)]
pub enum GamePhase {
    Initializing,
    AwaitingSetup,
    /// Waiting for field corners; `top_left` holds the first click
    SetupField { top_left: Option<Point> },
    SetupBall,
    Ongoing(Match),
    /// Terminal phase, only entered through an explicit finish
    GameOver { points: u32 },
}

/// A running goal chase
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub score: ScoreState,
    pub goal: Goal,
}

/// Data-less phase tag for logging, errors and rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    Initializing,
    AwaitingSetup,
    SetupField,
    SetupBall,
    Ongoing,
    GameOver,
}

impl GamePhase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            GamePhase::Initializing => PhaseKind::Initializing,
            GamePhase::AwaitingSetup => PhaseKind::AwaitingSetup,
            GamePhase::SetupField { .. } => PhaseKind::SetupField,
            GamePhase::SetupBall => PhaseKind::SetupBall,
            GamePhase::Ongoing(_) => PhaseKind::Ongoing,
            GamePhase::GameOver { .. } => PhaseKind::GameOver,
        }
    }

    /// Phases from which calibration can be (re)entered
    pub fn is_setup(&self) -> bool {
        matches!(
            self,
            GamePhase::AwaitingSetup | GamePhase::SetupField { .. } | GamePhase::SetupBall
        )
    }
}

//! Calibration and play flow

pub mod action;
pub mod calibration;
pub mod controller;
pub mod goal;
pub mod phase;
pub mod score;
pub mod snapshot;
pub mod state;

pub use action::{Action, ViewFlags};
pub use calibration::{BallReference, FieldRegion};
pub use controller::GameController;
pub use goal::Goal;
pub use phase::{GamePhase, Match, PhaseKind};
pub use score::ScoreState;
pub use snapshot::{GoalView, Snapshot};
pub use state::GameState;

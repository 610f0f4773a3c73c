//! Read-only view of the game handed to the renderer each tick

use super::action::ViewFlags;
use super::phase::{GamePhase, PhaseKind};
use super::state::GameState;
use crate::color::{Bgr, HsvRange};
use crate::geometry::{BBox, Point};
use crate::tracking::TrackedObject;
use serde::{Deserialize, Serialize};

/// Status text colour before a ball colour has been calibrated
pub const DEFAULT_STATUS_COLOR: Bgr = Bgr { b: 128, g: 255, r: 120 };

/// Goal as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalView {
    pub bbox: BBox,
    /// Share of the score animation already played, `None` when idle
    pub progress: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: PhaseKind,
    pub status: String,
    pub status_color: Bgr,
    pub tracked: Option<TrackedObject>,
    pub goal: Option<GoalView>,
    pub field: Option<BBox>,
    /// First field corner while the second one is awaited
    pub pending_corner: Option<Point>,
    pub points: u32,
    pub field_ready: bool,
    pub ball_ready: bool,
    pub ready: bool,
    pub ball_range: Option<HsvRange>,
    pub flags: ViewFlags,
}

impl Snapshot {
    pub fn capture(
        state: &GameState,
        tracked: Option<&TrackedObject>,
        flags: ViewFlags,
        animation_ticks: u32,
    ) -> Self {
        let goal = state.current_match().map(|current| GoalView {
            bbox: current.goal.bbox,
            progress: current.score.progress(animation_ticks),
        });
        let pending_corner = match state.phase() {
            GamePhase::SetupField { top_left } => *top_left,
            _ => None,
        };

        Self {
            phase: state.kind(),
            status: status_line(state),
            status_color: state
                .ball()
                .map(|ball| ball.color.sample)
                .unwrap_or(DEFAULT_STATUS_COLOR),
            tracked: tracked.cloned(),
            goal,
            field: state.field().map(|field| field.bbox()),
            pending_corner,
            points: state.points(),
            field_ready: state.is_field_ready(),
            ball_ready: state.is_ball_ready(),
            ready: state.is_ready(),
            ball_range: state.ball().map(|ball| *ball.range()),
            flags,
        }
    }
}

/// One-line player guidance for the current phase
pub fn status_line(state: &GameState) -> String {
    match state.phase() {
        GamePhase::Initializing => "INITIALIZING".to_string(),
        GamePhase::AwaitingSetup if state.is_ready() => "READY: press [enter] to start".to_string(),
        GamePhase::AwaitingSetup => {
            let mut missing = Vec::new();
            if !state.is_field_ready() {
                missing.push("field [f]");
            }
            if !state.is_ball_ready() {
                missing.push("ball [b]");
            }
            format!("SETUP: calibrate {}", missing.join(" "))
        }
        GamePhase::SetupField { top_left: None } => "FIELD: click the top-left corner".to_string(),
        GamePhase::SetupField { top_left: Some(_) } => "FIELD: click the bottom-right corner".to_string(),
        GamePhase::SetupBall => "SETUP: click on the object you want to track".to_string(),
        GamePhase::Ongoing(current) => format!("SCORE: {}", current.score.points()),
        GamePhase::GameOver { points } => format!("GAME OVER: {}", points),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_lists_missing_calibration() {
        let mut state = GameState::new();
        assert_eq!(status_line(&state), "INITIALIZING");
        state.finish_initialization().unwrap();
        assert_eq!(status_line(&state), "SETUP: calibrate field [f] ball [b]");

        state.enter_field_setup().unwrap();
        state.place_field_corner(Point::new(0, 0)).unwrap();
        assert_eq!(status_line(&state), "FIELD: click the bottom-right corner");
        state.place_field_corner(Point::new(100, 100)).unwrap();
        assert_eq!(status_line(&state), "SETUP: calibrate ball [b]");
    }

    #[test]
    fn test_snapshot_before_calibration() {
        let mut state = GameState::new();
        state.finish_initialization().unwrap();
        state.enter_field_setup().unwrap();
        state.place_field_corner(Point::new(5, 6)).unwrap();

        let snapshot = Snapshot::capture(&state, None, ViewFlags::default(), 30);
        assert_eq!(snapshot.phase, PhaseKind::SetupField);
        assert_eq!(snapshot.pending_corner, Some(Point::new(5, 6)));
        assert_eq!(snapshot.status_color, DEFAULT_STATUS_COLOR);
        assert!(snapshot.goal.is_none());
        assert!(!snapshot.ready);
    }
}

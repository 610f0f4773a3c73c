use super::calibration::{BallReference, FieldRegion};
use super::goal::Goal;
use super::phase::{GamePhase, Match, PhaseKind};
use super::score::ScoreState;
use crate::error::Rejection;
use crate::geometry::Point;
use rand::Rng;

/// Authoritative game state: the current phase plus calibration data.
///
/// Calibration outlives the setup phases so a finished field or ball
/// calibration stays in place while the other one is redone.
#[derive(Debug, Clone)]
pub struct GameState {
    phase: GamePhase,
    field: Option<FieldRegion>,
    ball: Option<BallReference>,
    ready: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Initializing,
            field: None,
            ball: None,
            ready: false,
        }
    }

    pub fn phase(&self) -> &GamePhase {
        &self.phase
    }

    pub fn kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    pub fn field(&self) -> Option<&FieldRegion> {
        self.field.as_ref()
    }

    pub fn ball(&self) -> Option<&BallReference> {
        self.ball.as_ref()
    }

    pub fn current_match(&self) -> Option<&Match> {
        match &self.phase {
            GamePhase::Ongoing(current) => Some(current),
            _ => None,
        }
    }

    pub fn current_match_mut(&mut self) -> Option<&mut Match> {
        match &mut self.phase {
            GamePhase::Ongoing(current) => Some(current),
            _ => None,
        }
    }

    pub fn is_field_ready(&self) -> bool {
        self.field.is_some()
    }

    pub fn is_ball_ready(&self) -> bool {
        self.ball.is_some()
    }

    /// Readiness as of the last setup change
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Points of the running or finished match
    pub fn points(&self) -> u32 {
        match &self.phase {
            GamePhase::Ongoing(current) => current.score.points(),
            GamePhase::GameOver { points } => *points,
            _ => 0,
        }
    }

    fn refresh_readiness(&mut self) {
        self.ready = self.is_field_ready() && self.is_ball_ready();
    }

    fn enter_awaiting_setup(&mut self) {
        self.phase = GamePhase::AwaitingSetup;
        self.refresh_readiness();
        log::debug!(
            "awaiting setup (field ready: {}, ball ready: {})",
            self.is_field_ready(),
            self.is_ball_ready()
        );
    }

    /// Initializing -> AwaitingSetup once the video source is up
    pub fn finish_initialization(&mut self) -> Result<(), Rejection> {
        if !matches!(self.phase, GamePhase::Initializing) {
            return Err(Rejection::WrongPhase {
                action: "initialization",
                expected: PhaseKind::Initializing,
            });
        }
        self.enter_awaiting_setup();
        Ok(())
    }

    /// Start (or restart) field calibration, dropping both corners
    pub fn enter_field_setup(&mut self) -> Result<(), Rejection> {
        if !self.phase.is_setup() {
            return Err(Rejection::WrongPhase {
                action: "field calibration",
                expected: PhaseKind::AwaitingSetup,
            });
        }
        self.field = None;
        self.phase = GamePhase::SetupField { top_left: None };
        self.refresh_readiness();
        log::info!("field calibration: click the top-left corner");
        Ok(())
    }

    /// Start (or restart) ball calibration, dropping colour and reference area
    pub fn enter_ball_setup(&mut self) -> Result<(), Rejection> {
        if !self.phase.is_setup() {
            return Err(Rejection::WrongPhase {
                action: "ball calibration",
                expected: PhaseKind::AwaitingSetup,
            });
        }
        self.ball = None;
        self.phase = GamePhase::SetupBall;
        self.refresh_readiness();
        log::info!("ball calibration: click the object to track");
        Ok(())
    }

    /// Record a field corner click. Returns true once the field is complete.
    pub fn place_field_corner(&mut self, at: Point) -> Result<bool, Rejection> {
        let GamePhase::SetupField { top_left } = &mut self.phase else {
            return Err(Rejection::InvalidClickTarget { phase: self.phase.kind() });
        };

        match *top_left {
            None => {
                *top_left = Some(at);
                log::debug!("field top-left set to {:?}", at);
                Ok(false)
            }
            Some(first) => {
                let field = FieldRegion::from_corners(first, at);
                log::info!("field set to {:?}", field.bbox());
                self.field = Some(field);
                self.enter_awaiting_setup();
                Ok(true)
            }
        }
    }

    /// Store the calibrated ball and return to AwaitingSetup
    pub fn set_ball(&mut self, ball: BallReference) -> Result<(), Rejection> {
        if !matches!(self.phase, GamePhase::SetupBall) {
            return Err(Rejection::InvalidClickTarget { phase: self.phase.kind() });
        }
        log::info!(
            "ball calibrated: bgr {:?}, range {:?}, reference area {:?}",
            ball.color.sample,
            ball.color.range,
            ball.reference_area
        );
        self.ball = Some(ball);
        self.enter_awaiting_setup();
        Ok(())
    }

    /// AwaitingSetup -> Ongoing with a fresh score and a first goal
    pub fn start<R: Rng + ?Sized>(&mut self, goal_size: (i32, i32), rng: &mut R) -> Result<(), Rejection> {
        if !matches!(self.phase, GamePhase::AwaitingSetup) {
            return Err(Rejection::WrongPhase {
                action: "start",
                expected: PhaseKind::AwaitingSetup,
            });
        }
        self.refresh_readiness();
        let field = match (self.ready, self.field) {
            (true, Some(field)) => field,
            _ => {
                return Err(Rejection::IncompleteCalibration {
                    field_missing: !self.is_field_ready(),
                    ball_missing: !self.is_ball_ready(),
                });
            }
        };

        let goal = Goal::spawn(&field, goal_size, rng);
        log::info!("game started, first goal at {:?}", goal.bbox);
        self.phase = GamePhase::Ongoing(Match {
            score: ScoreState::default(),
            goal,
        });
        Ok(())
    }

    /// Place the running match's goal somewhere else
    pub fn respawn_goal<R: Rng + ?Sized>(&mut self, goal_size: (i32, i32), rng: &mut R) -> Result<(), Rejection> {
        let field = self.field;
        match (self.current_match_mut(), field) {
            (Some(current), Some(field)) => {
                current.goal = Goal::spawn(&field, goal_size, rng);
                log::debug!("goal moved to {:?}", current.goal.bbox);
                Ok(())
            }
            _ => Err(Rejection::WrongPhase {
                action: "goal reshuffle",
                expected: PhaseKind::Ongoing,
            }),
        }
    }

    /// Ongoing -> GameOver, keeping the final points
    pub fn finish(&mut self) -> Result<u32, Rejection> {
        let Some(current) = self.current_match() else {
            return Err(Rejection::WrongPhase {
                action: "finish",
                expected: PhaseKind::Ongoing,
            });
        };
        let points = current.score.points();
        self.phase = GamePhase::GameOver { points };
        log::info!("game over with {} points", points);
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Bgr, CalibrationColor, Hsv, HsvMargins};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ball() -> BallReference {
        BallReference {
            color: CalibrationColor::new(Bgr::new(0, 0, 255), Hsv::new(0, 255, 255), &HsvMargins::default()),
            reference_area: Some(400.0),
        }
    }

    fn awaiting() -> GameState {
        let mut state = GameState::new();
        state.finish_initialization().unwrap();
        state
    }

    fn calibrate_field(state: &mut GameState) {
        state.enter_field_setup().unwrap();
        state.place_field_corner(Point::new(0, 0)).unwrap();
        state.place_field_corner(Point::new(400, 300)).unwrap();
    }

    #[test]
    fn test_initialization_leads_to_setup() {
        let state = awaiting();
        assert_eq!(state.kind(), PhaseKind::AwaitingSetup);
        assert!(!state.is_ready());
    }

    #[test]
    fn test_field_needs_two_clicks() {
        let mut state = awaiting();
        state.enter_field_setup().unwrap();
        assert_eq!(state.place_field_corner(Point::new(10, 20)), Ok(false));
        assert_eq!(state.kind(), PhaseKind::SetupField);
        assert!(!state.is_field_ready());
        assert_eq!(state.place_field_corner(Point::new(110, 220)), Ok(true));
        assert_eq!(state.kind(), PhaseKind::AwaitingSetup);
        let field = state.field().unwrap();
        assert_eq!(field.top_left, Point::new(10, 20));
        assert_eq!(field.bottom_right, Point::new(110, 220));
    }

    #[test]
    fn test_reentering_field_setup_clears_partial_corner() {
        let mut state = awaiting();
        state.enter_field_setup().unwrap();
        state.place_field_corner(Point::new(10, 20)).unwrap();
        state.enter_field_setup().unwrap();
        assert_eq!(state.phase(), &GamePhase::SetupField { top_left: None });
        assert!(state.field().is_none());
    }

    #[test]
    fn test_reentering_field_setup_clears_complete_field() {
        let mut state = awaiting();
        calibrate_field(&mut state);
        state.set_ball_for_test();
        assert!(state.is_ready());
        state.enter_field_setup().unwrap();
        assert!(state.field().is_none());
        assert!(!state.is_ready());
    }

    #[test]
    fn test_ball_setup_clears_previous_ball() {
        let mut state = awaiting();
        state.set_ball_for_test();
        assert!(state.is_ball_ready());
        state.enter_ball_setup().unwrap();
        assert!(state.ball().is_none());
    }

    #[test]
    fn test_confirm_without_ball_stays_in_setup() {
        let mut state = awaiting();
        calibrate_field(&mut state);
        let mut rng = StdRng::seed_from_u64(3);
        let result = state.start((50, 50), &mut rng);
        assert_eq!(
            result,
            Err(Rejection::IncompleteCalibration {
                field_missing: false,
                ball_missing: true
            })
        );
        assert_eq!(state.kind(), PhaseKind::AwaitingSetup);
        assert!(!state.is_ready());
    }

    #[test]
    fn test_start_resets_score_and_spawns_goal() {
        let mut state = awaiting();
        calibrate_field(&mut state);
        state.set_ball_for_test();
        let mut rng = StdRng::seed_from_u64(3);
        state.start((50, 50), &mut rng).unwrap();
        let current = state.current_match().unwrap();
        assert_eq!(current.score.points(), 0);
        assert!(current.goal.bbox.x <= 350 && current.goal.bbox.y <= 250);
    }

    #[test]
    fn test_clicks_ignored_outside_setup() {
        let mut state = awaiting();
        assert_eq!(
            state.place_field_corner(Point::new(1, 1)),
            Err(Rejection::InvalidClickTarget {
                phase: PhaseKind::AwaitingSetup
            })
        );
    }

    #[test]
    fn test_finish_only_from_ongoing() {
        let mut state = awaiting();
        assert!(state.finish().is_err());
        calibrate_field(&mut state);
        state.set_ball_for_test();
        state.start((50, 50), &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(state.finish(), Ok(0));
        assert_eq!(state.phase(), &GamePhase::GameOver { points: 0 });
        assert!(state.enter_field_setup().is_err());
    }

    impl GameState {
        fn set_ball_for_test(&mut self) {
            self.enter_ball_setup().unwrap();
            self.set_ball(ball()).unwrap();
        }
    }
}

//! Per-tick driver: input, tracking, scoring

use super::action::{Action, ViewFlags};
use super::calibration::BallReference;
use super::phase::PhaseKind;
use super::snapshot::Snapshot;
use super::state::GameState;
use crate::color::CalibrationColor;
use crate::config::GameConfig;
use crate::error::Rejection;
use crate::geometry::Point;
use crate::tracking::{ContourTracker, TrackedObject, TrackingHint};
use crate::traits::FrameProbe;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Owns the game state and advances it one frame at a time
pub struct GameController<R = StdRng> {
    config: GameConfig,
    state: GameState,
    tracker: ContourTracker,
    flags: ViewFlags,
    tracked: Option<TrackedObject>,
    rng: R,
}

impl GameController<StdRng> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> GameController<R> {
    /// Controller with a caller-supplied RNG, used for reproducible goal placement
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let tracker = ContourTracker::new(config.tracking.clone());
        Self {
            config,
            state: GameState::new(),
            tracker,
            flags: ViewFlags::default(),
            tracked: None,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn flags(&self) -> ViewFlags {
        self.flags
    }

    /// The ball as found on the last tick
    pub fn tracked(&self) -> Option<&TrackedObject> {
        self.tracked.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.flags.quit
    }

    /// Leave Initializing once the video source delivers frames
    pub fn initialize(&mut self) -> Result<(), Rejection> {
        self.state.finish_initialization()
    }

    /// End the running match. Nothing in the game loop calls this on its own.
    pub fn finish(&mut self) -> Result<u32, Rejection> {
        self.state.finish()
    }

    /// Apply pending actions, advance tracking and scoring, and describe the result
    pub fn tick<F, I>(&mut self, frame: &F, actions: I) -> Snapshot
    where
        F: FrameProbe + ?Sized,
        I: IntoIterator<Item = Action>,
    {
        for action in actions {
            if let Err(rejection) = self.handle_action(action, frame) {
                log::debug!("{:?} ignored: {}", action, rejection);
            }
        }
        self.advance(frame);
        self.snapshot()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(
            &self.state,
            self.tracked.as_ref(),
            self.flags,
            self.config.score_animation_ticks,
        )
    }

    /// Apply one action. Rejections leave the state untouched.
    pub fn handle_action<F: FrameProbe + ?Sized>(&mut self, action: Action, frame: &F) -> Result<(), Rejection> {
        if self.flags.apply(action) {
            return Ok(());
        }

        match action {
            Action::SetupField => self.state.enter_field_setup(),
            Action::SetupBall => self.state.enter_ball_setup(),
            Action::Confirm => self.state.start(self.config.goal_size, &mut self.rng),
            Action::ReshuffleGoal => self.state.respawn_goal(self.config.goal_size, &mut self.rng),
            Action::Click(at) => self.click(at, frame),
            Action::TogglePause | Action::ToggleMask | Action::ToggleDevOverlay | Action::Quit => Ok(()),
        }
    }

    fn click<F: FrameProbe + ?Sized>(&mut self, at: Point, frame: &F) -> Result<(), Rejection> {
        match self.state.kind() {
            PhaseKind::SetupField => self.state.place_field_corner(at).map(|_| ()),
            PhaseKind::SetupBall => {
                let ball = self.calibrate_ball(at, frame)?;
                self.state.set_ball(ball)
            }
            phase => Err(Rejection::InvalidClickTarget { phase }),
        }
    }

    /// Sample the clicked colour and remember the area of the contour under the click
    fn calibrate_ball<F: FrameProbe + ?Sized>(&self, at: Point, frame: &F) -> Result<BallReference, Rejection> {
        let no_sample = Rejection::NoSample { x: at.x, y: at.y };
        let sample = frame.color_at(at).ok_or(no_sample.clone())?;
        let hsv = frame.hsv_at(at).ok_or(no_sample)?;

        let color = CalibrationColor::new(sample, hsv, &self.config.color_margins);
        let reference_area = self
            .tracker
            .locate(frame, &color.range, Some(TrackingHint::Position(at)))
            .map(|contour| contour.area);
        if reference_area.is_none() {
            log::warn!("no contour matches the colour clicked at {:?}", at);
        }

        Ok(BallReference { color, reference_area })
    }

    /// Tracking and scoring for the current frame
    pub fn advance<F: FrameProbe + ?Sized>(&mut self, frame: &F) {
        let Some(ball) = self.state.ball().copied() else {
            self.tracked = None;
            return;
        };
        if self.state.current_match().is_none() {
            self.tracked = None;
            return;
        }

        let hint = ball.reference_area.map(TrackingHint::Area);
        self.tracked = self
            .tracker
            .locate(frame, ball.range(), hint)
            .map(TrackedObject::from);

        let animation_ticks = self.config.score_animation_ticks;
        let tracked_box = self.tracked.as_ref().map(|tracked| tracked.bbox);
        let mut relocate = false;
        if let Some(current) = self.state.current_match_mut() {
            if current.score.is_scored() {
                if current.score.countdown() {
                    log::info!("point! score is now {}", current.score.points());
                    relocate = true;
                }
            } else if tracked_box.is_some_and(|bbox| bbox.intersects(&current.goal.bbox)) {
                log::info!("goal reached at {:?}", current.goal.bbox);
                current.score.start(animation_ticks);
            }
        }

        if relocate {
            if let Err(rejection) = self.state.respawn_goal(self.config.goal_size, &mut self.rng) {
                log::warn!("could not place next goal: {}", rejection);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Bgr, Hsv, HsvRange};
    use crate::geometry::BBox;
    use crate::tracking::Contour;

    struct StillFrame {
        sample: Option<(Bgr, Hsv)>,
        blobs: Vec<Contour>,
    }

    impl FrameProbe for StillFrame {
        fn dimensions(&self) -> (i32, i32) {
            (640, 480)
        }

        fn color_at(&self, _at: Point) -> Option<Bgr> {
            self.sample.map(|(bgr, _)| bgr)
        }

        fn hsv_at(&self, _at: Point) -> Option<Hsv> {
            self.sample.map(|(_, hsv)| hsv)
        }

        fn contours_in_range(&self, range: &HsvRange) -> Vec<Contour> {
            match self.sample {
                Some((_, hsv)) if range.contains(hsv) => self.blobs.clone(),
                _ => Vec::new(),
            }
        }
    }

    fn blob(bbox: BBox) -> Contour {
        Contour::new(vec![bbox.top_left(), bbox.bottom_right()], bbox, bbox.area())
    }

    #[test]
    fn test_ball_click_records_nearest_area() {
        let frame = StillFrame {
            sample: Some((Bgr::new(10, 20, 200), Hsv::new(2, 240, 200))),
            blobs: vec![blob(BBox::new(0, 0, 10, 10)), blob(BBox::new(100, 100, 30, 30))],
        };
        let mut controller = GameController::with_rng(GameConfig::default(), StdRng::seed_from_u64(1));
        controller.initialize().unwrap();
        controller.handle_action(Action::SetupBall, &frame).unwrap();
        controller.handle_action(Action::Click(Point::new(112, 118)), &frame).unwrap();

        let ball = controller.state().ball().unwrap();
        assert_eq!(ball.reference_area, Some(900.0));
        assert_eq!(ball.color.sample, Bgr::new(10, 20, 200));
        assert_eq!(controller.state().kind(), PhaseKind::AwaitingSetup);
    }

    #[test]
    fn test_ball_click_without_sample_stays_in_setup() {
        let frame = StillFrame {
            sample: None,
            blobs: Vec::new(),
        };
        let mut controller = GameController::with_rng(GameConfig::default(), StdRng::seed_from_u64(1));
        controller.initialize().unwrap();
        controller.handle_action(Action::SetupBall, &frame).unwrap();
        let result = controller.handle_action(Action::Click(Point::new(3, 4)), &frame);
        assert_eq!(result, Err(Rejection::NoSample { x: 3, y: 4 }));
        assert_eq!(controller.state().kind(), PhaseKind::SetupBall);
    }

    #[test]
    fn test_view_toggles_do_not_touch_phase() {
        let frame = StillFrame {
            sample: None,
            blobs: Vec::new(),
        };
        let mut controller = GameController::with_rng(GameConfig::default(), StdRng::seed_from_u64(1));
        controller.initialize().unwrap();
        let snapshot = controller.tick(&frame, [Action::TogglePause, Action::ToggleDevOverlay]);
        assert!(snapshot.flags.paused);
        assert!(snapshot.flags.show_dev_overlay);
        assert_eq!(snapshot.phase, PhaseKind::AwaitingSetup);
        assert!(!controller.should_quit());
        controller.tick(&frame, [Action::Quit]);
        assert!(controller.should_quit());
    }

    #[test]
    fn test_click_while_awaiting_setup_is_ignored() {
        let frame = StillFrame {
            sample: None,
            blobs: Vec::new(),
        };
        let mut controller = GameController::with_rng(GameConfig::default(), StdRng::seed_from_u64(1));
        controller.initialize().unwrap();
        let result = controller.handle_action(Action::Click(Point::new(3, 4)), &frame);
        assert_eq!(
            result,
            Err(Rejection::InvalidClickTarget {
                phase: PhaseKind::AwaitingSetup
            })
        );
    }
}

//! Game loop wiring the capture, the controller and the window together

use crate::config::AppConfig;
use crate::input::{self, ClickLatch};
use anyhow::{Context, Result};
use float_along_core::{Action, GameController};
use float_along_cv::{CaptureSource, FrameAnalysis, Renderer, VideoFeed};
use opencv::highgui;

pub fn run(config: AppConfig, source: CaptureSource) -> Result<()> {
    let mut feed = VideoFeed::open(source, config.capture.frame_buffer_size)?;
    let renderer = Renderer::new(config.display.clone())?;
    let mut controller = GameController::new(config.game.clone());

    renderer.open_window()?;
    let clicks = ClickLatch::new();
    clicks.install(renderer.window_name())?;

    // the first frame proves the source works before leaving Initializing
    feed.get_frame(false).context("Video source delivered no frames")?;
    let (width, height) = feed.dimensions()?;
    log::info!("reading {:?} at {}x{}", feed.source(), width, height);
    controller.initialize()?;

    let poll_delay = config.display.poll_delay_ms.max(1);
    while !controller.should_quit() {
        let mut actions: Vec<Action> = clicks.drain().into_iter().map(Action::Click).collect();
        if let Some(action) = input::key_action(highgui::wait_key(poll_delay)?) {
            actions.push(action);
        }

        let frame = feed.get_frame(controller.flags().paused)?;
        let analysis = FrameAnalysis::new(frame)?;
        let snapshot = controller.tick(&analysis, actions);

        let image = renderer.compose(&analysis, &snapshot)?;
        renderer.show(&image)?;
    }

    log::info!("quitting with {} points", controller.state().points());
    renderer.close()
}

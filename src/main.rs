use anyhow::Result;
use clap::Parser;
use config::AppConfig;
use float_along_cv::CaptureSource;
use std::path::PathBuf;

mod app;
mod config;
mod input;

/// Steer a coloured object into goals on a webcam feed
#[derive(Parser, Debug)]
#[command(name = "float-along", version)]
struct Args {
    /// Video file to play instead of the camera
    #[arg(value_name = "FILE")]
    source: Option<PathBuf>,
    /// Camera index used when no file is given
    #[arg(long, default_value_t = 0)]
    camera: i32,
    /// JSON configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Image drawn in place of the goal rectangle
    #[arg(long, value_name = "PATH")]
    goal_image: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(path) = args.goal_image {
        config.display.goal_image = Some(path);
    }

    let source = match args.source {
        Some(path) => CaptureSource::File(path),
        None => CaptureSource::Camera(args.camera),
    };

    match app::run(config, source) {
        Ok(()) => Ok(()),
        Err(e) => {
            log::error!("game stopped: {:#}", e);
            Err(e)
        }
    }
}

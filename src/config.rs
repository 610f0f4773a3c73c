//! Application configuration, loaded from an optional JSON file

use anyhow::{Context, Result};
use float_along_core::GameConfig;
use float_along_cv::DisplayConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub display: DisplayConfig,
    pub capture: CaptureConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Frames kept for replay while paused
    pub frame_buffer_size: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self { frame_buffer_size: 1 }
    }
}

impl AppConfig {
    /// Defaults when `path` is `None`, otherwise the parsed and validated file
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            log::info!("no config file given, using defaults");
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path).with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config = Self::from_json(&text).with_context(|| format!("Invalid config file: {:?}", path))?;
        log::info!("loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.game.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_json(r#"{ "game": { "goal_size": [80, 60] }, "capture": { "frame_buffer_size": 4 } }"#)
            .unwrap();
        assert_eq!(config.game.goal_size, (80, 60));
        assert_eq!(config.game.score_animation_ticks, 30);
        assert_eq!(config.capture.frame_buffer_size, 4);
        assert_eq!(config.display.window_name, "FLOAT ALONG");
    }

    #[test]
    fn test_invalid_game_config_is_rejected() {
        let result = AppConfig::from_json(r#"{ "game": { "score_animation_ticks": 0 } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(AppConfig::load(Some(Path::new("/nonexistent/float-along.json"))).is_err());
        assert_eq!(AppConfig::load(None).unwrap().capture.frame_buffer_size, 1);
    }
}

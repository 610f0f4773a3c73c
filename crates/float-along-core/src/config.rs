//! Game rule configuration

use crate::color::HsvMargins;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Main game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub goal_size: (i32, i32), // (width, height)
    pub score_animation_ticks: u32,
    pub color_margins: HsvMargins,
    pub tracking: TrackingConfig,
}

/// Contour tracking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Contours with an area at or below this are treated as noise. 0 disables the filter.
    pub min_contour_area: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            goal_size: (50, 50),
            score_animation_ticks: 30,
            color_margins: HsvMargins::default(),
            tracking: TrackingConfig::default(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            min_contour_area: 10.0,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = self.goal_size;
        if width <= 0 || height <= 0 {
            return Err(ConfigError::GoalSize { width, height });
        }
        if self.score_animation_ticks == 0 {
            return Err(ConfigError::AnimationTicks);
        }
        if self.tracking.min_contour_area < 0.0 {
            return Err(ConfigError::NoiseFloor(self.tracking.min_contour_area));
        }
        Ok(())
    }
}

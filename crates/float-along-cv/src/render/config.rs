//! Display configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Window and overlay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub window_name: String,
    /// Milliseconds to wait for a key press each frame
    pub poll_delay_ms: i32,
    /// Optional themed image drawn instead of the goal rectangle
    pub goal_image: Option<PathBuf>,
    pub colors: OverlayColors,
    pub text: TextConfig,
}

/// Overlay colours, BGR order like OpenCV
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayColors {
    pub tracked_box: (u8, u8, u8),
    pub contour: (u8, u8, u8),
    pub goal: (u8, u8, u8),
    pub goal_scored: (u8, u8, u8),
    pub field: (u8, u8, u8),
    pub dev_text: (u8, u8, u8),
}

/// Status line placement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub origin: (i32, i32),
    pub scale: f64,
    pub thickness: i32,
    pub line_height: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            window_name: "FLOAT ALONG".to_string(),
            poll_delay_ms: 1,
            goal_image: None,
            colors: OverlayColors::default(),
            text: TextConfig::default(),
        }
    }
}

impl Default for OverlayColors {
    fn default() -> Self {
        Self {
            tracked_box: (0, 0, 255),
            contour: (0, 255, 0),
            goal: (150, 255, 10),
            goal_scored: (255, 255, 255),
            field: (255, 200, 0),
            dev_text: (200, 200, 200),
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            origin: (25, 35),
            scale: 1.0,
            thickness: 2,
            line_height: 22,
        }
    }
}

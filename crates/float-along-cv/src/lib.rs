//! Float Along vision layer
//!
//! OpenCV-backed collaborators of the game core: video capture, per-frame
//! colour analysis and contour extraction, and on-screen rendering.

pub mod detection;
pub mod render;
pub mod utils;
pub mod video;

// Re-export commonly used types
pub use detection::FrameAnalysis;
pub use render::{DisplayConfig, Renderer};
pub use video::{CaptureSource, VideoFeed};

// Error handling
pub type Result<T> = anyhow::Result<T>;

//! Drawing the game on top of the video

pub mod config;
pub mod overlay;

pub use config::DisplayConfig;
pub use overlay::Renderer;

//! Video acquisition

pub mod feed;

pub use feed::{CaptureSource, VideoFeed};

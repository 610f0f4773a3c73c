//! Float Along game core
//!
//! Calibration flow, ball tracking and goal scoring, independent of any
//! camera or drawing backend.

pub mod color;
pub mod config;
pub mod error;
pub mod game;
pub mod geometry;
pub mod tracking;

// Re-export commonly used types
pub use color::{Bgr, CalibrationColor, Hsv, HsvMargins, HsvRange};
pub use config::{GameConfig, TrackingConfig};
pub use error::{ConfigError, Rejection};
pub use game::{Action, GameController, GamePhase, GameState, PhaseKind, Snapshot, ViewFlags};
pub use geometry::{BBox, Point, boxes_intersect, clamp_high, clamp_low};
pub use tracking::{Contour, ContourTracker, TrackedObject, TrackingHint};

/// Core traits for the collaborators the game depends on
pub mod traits {
    use super::*;

    /// Read access to the current video frame.
    ///
    /// Implementations sample the most recent frame; the game only calls
    /// these while a frame is available.
    pub trait FrameProbe {
        /// Frame size as (width, height)
        fn dimensions(&self) -> (i32, i32);
        fn color_at(&self, at: Point) -> Option<Bgr>;
        fn hsv_at(&self, at: Point) -> Option<Hsv>;
        /// External contours of the pixels whose HSV value lies inside `range`
        fn contours_in_range(&self, range: &HsvRange) -> Vec<Contour>;
    }
}

//! Per-frame ball tracking
//!
//! The ball has no persistent identity. Every tick the contours matching the
//! calibrated colour are extracted again and the one closest to a hint (a
//! click position or the calibrated contour area) is taken as the ball.

pub mod adapter;
pub mod contour;

pub use adapter::{ContourTracker, TrackingHint, select_contour};
pub use contour::{Contour, TrackedObject};

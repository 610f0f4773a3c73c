//! Geometry primitives shared by tracking, scoring and rendering

pub mod bbox;
pub mod clamp;

pub use bbox::{BBox, Point, boxes_intersect};
pub use clamp::{clamp_high, clamp_low};

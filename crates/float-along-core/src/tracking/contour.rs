use crate::geometry::{BBox, Point};
use serde::{Deserialize, Serialize};

/// A detected contour with the measurements the tracker needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<Point>,
    pub bbox: BBox,
    pub area: f64,
}

impl Contour {
    pub fn new(points: Vec<Point>, bbox: BBox, area: f64) -> Self {
        Self { points, bbox, area }
    }
}

/// The ball as seen on the current tick. Never carried over to the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedObject {
    pub bbox: BBox,
    pub area: f64,
    pub contour: Vec<Point>,
}

impl From<Contour> for TrackedObject {
    fn from(contour: Contour) -> Self {
        Self {
            bbox: contour.bbox,
            area: contour.area,
            contour: contour.points,
        }
    }
}

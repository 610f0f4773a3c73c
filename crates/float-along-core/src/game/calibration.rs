use crate::color::{CalibrationColor, HsvRange};
use crate::geometry::{BBox, Point};
use serde::{Deserialize, Serialize};

/// Playable rectangle picked with two clicks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRegion {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl FieldRegion {
    /// Corners may be clicked in any order.
    pub fn from_corners(first: Point, second: Point) -> Self {
        let bbox = BBox::from_corners(first, second);
        Self {
            top_left: bbox.top_left(),
            bottom_right: bbox.bottom_right(),
        }
    }

    pub fn bbox(&self) -> BBox {
        BBox::from_corners(self.top_left, self.bottom_right)
    }
}

/// Calibrated ball: colour window plus the contour area seen at calibration.
///
/// The area is missing when no contour matched the clicked colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallReference {
    pub color: CalibrationColor,
    pub reference_area: Option<f64>,
}

impl BallReference {
    pub fn range(&self) -> &HsvRange {
        &self.color.range
    }
}

//! Bounding box and point types
//!
//! Boxes are axis-aligned and stored as top-left corner plus size, the same
//! layout OpenCV's `Rect` uses, so the vision crate converts them field by field.

use serde::{Deserialize, Serialize};

/// Pixel position in frame coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance to another point
    pub fn distance_sq(&self, other: &Point) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        dx * dx + dy * dy
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BBox {
    /// Create a new bounding box
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build the box spanned by two opposite corners, in any order
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    /// Calculate area of the bounding box
    pub fn area(&self) -> f64 {
        (self.width * self.height) as f64
    }

    /// Calculate center point
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if this box overlaps with another, see [`boxes_intersect`]
    pub fn intersects(&self, other: &BBox) -> bool {
        boxes_intersect(self, other)
    }
}

/// Strict-interior overlap test between two boxes.
///
/// On each axis one box must start strictly inside the other's open span.
/// Boxes that only share an edge do not intersect, and neither do two boxes
/// starting at the same coordinate on an axis.
pub fn boxes_intersect(a: &BBox, b: &BBox) -> bool {
    let (a_top, a_bot) = (a.top_left(), a.bottom_right());
    let (b_top, b_bot) = (b.top_left(), b.bottom_right());

    let x_overlap = (a_top.x < b_top.x && b_top.x < a_bot.x) || (b_top.x < a_top.x && a_top.x < b_bot.x);
    let y_overlap = (a_top.y < b_top.y && b_top.y < a_bot.y) || (b_top.y < a_top.y && a_top.y < b_bot.y);

    x_overlap && y_overlap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_boxes_intersect() {
        let a = BBox::new(0, 0, 10, 10);
        let b = BBox::new(5, 5, 10, 10);
        assert!(boxes_intersect(&a, &b));
        assert!(boxes_intersect(&b, &a));
    }

    #[test]
    fn test_edge_touching_boxes_do_not_intersect() {
        let a = BBox::new(0, 0, 10, 10);
        let b = BBox::new(10, 0, 10, 10);
        assert!(!boxes_intersect(&a, &b));
        assert!(!boxes_intersect(&b, &a));
    }

    #[test]
    fn test_contained_box_intersects() {
        let goal = BBox::new(100, 100, 50, 50);
        let ball = BBox::new(110, 110, 20, 20);
        assert!(goal.intersects(&ball));
        assert!(ball.intersects(&goal));
    }

    #[test]
    fn test_shared_start_is_not_strict_overlap() {
        let a = BBox::new(0, 0, 10, 10);
        let b = BBox::new(0, 0, 10, 10);
        assert!(!boxes_intersect(&a, &b));
    }

    #[test]
    fn test_intersection_is_symmetric() {
        let boxes = [
            BBox::new(0, 0, 10, 10),
            BBox::new(5, 5, 10, 10),
            BBox::new(10, 0, 10, 10),
            BBox::new(-4, 3, 6, 2),
            BBox::new(2, -8, 3, 30),
        ];
        for a in &boxes {
            for b in &boxes {
                assert_eq!(boxes_intersect(a, b), boxes_intersect(b, a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_from_corners_normalizes_order() {
        let bbox = BBox::from_corners(Point::new(40, 10), Point::new(10, 30));
        assert_eq!(bbox, BBox::new(10, 10, 30, 20));
        assert_eq!(bbox.bottom_right(), Point::new(40, 30));
    }

    #[test]
    fn test_distance_sq() {
        assert_eq!(Point::new(0, 0).distance_sq(&Point::new(3, 4)), 25);
    }

    #[test]
    fn test_distance_sq_across_full_range() {
        let far = Point::new(0, 0).distance_sq(&Point::new(i32::MIN, 0));
        assert_eq!(far, 1i64 << 62);
    }
}

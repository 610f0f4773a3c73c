use super::calibration::FieldRegion;
use crate::geometry::BBox;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The target rectangle the ball has to be moved into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub bbox: BBox,
}

impl Goal {
    /// Place a goal uniformly at random so that it lies fully inside the field.
    ///
    /// On an axis where the field is narrower than the goal, the goal sits at
    /// the field's top-left coordinate.
    pub fn spawn<R: Rng + ?Sized>(field: &FieldRegion, size: (i32, i32), rng: &mut R) -> Self {
        let (width, height) = size;
        let x = sample_axis(field.top_left.x, field.bottom_right.x - width, rng);
        let y = sample_axis(field.top_left.y, field.bottom_right.y - height, rng);
        Self {
            bbox: BBox::new(x, y, width, height),
        }
    }
}

fn sample_axis<R: Rng + ?Sized>(low: i32, high: i32, rng: &mut R) -> i32 {
    if high <= low {
        low
    } else {
        rng.gen_range(low..=high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_goal_stays_inside_field() {
        let field = FieldRegion::from_corners(Point::new(20, 30), Point::new(220, 130));
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let goal = Goal::spawn(&field, (50, 50), &mut rng);
            assert!(goal.bbox.x >= 20 && goal.bbox.x <= 170);
            assert!(goal.bbox.y >= 30 && goal.bbox.y <= 80);
            assert_eq!((goal.bbox.width, goal.bbox.height), (50, 50));
        }
    }

    #[test]
    fn test_narrow_field_pins_goal() {
        let field = FieldRegion::from_corners(Point::new(10, 10), Point::new(40, 300));
        let mut rng = StdRng::seed_from_u64(1);
        let goal = Goal::spawn(&field, (50, 50), &mut rng);
        assert_eq!(goal.bbox.x, 10);
    }
}

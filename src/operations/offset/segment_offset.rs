use crate::error::Result;
use crate::geometry::Segment;
use crate::math::Point2;

use super::Offsetable;

impl Offsetable for Segment {
    fn clone_with_distance(&self, distance: f64) -> Result<Self> {
        Ok(self.offset(distance))
    }

    fn is_positive_direction(&self, point: &Point2) -> bool {
        self.is_left_of(point)
    }
}

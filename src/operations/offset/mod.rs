//! Parallel copies of elements at a signed distance.
//!
//! Positive distances go to the side [`Offsetable::is_positive_direction`]
//! reports: the left of the travel direction for segments and polylines, the
//! outside for arcs.
mod arc_offset;
mod polyline_offset;
mod segment_offset;

use crate::error::Result;
use crate::geometry::Element;
use crate::math::Point2;

/// Elements that can produce an offset copy of themselves.
pub trait Offsetable: Sized {
    /// Copy of this element shifted by `distance`, on the same layer.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidParameter` if the distance collapses or
    /// inverts the geometry.
    fn clone_with_distance(&self, distance: f64) -> Result<Self>;

    /// Returns `true` if `point` lies on the side a positive distance moves to.
    fn is_positive_direction(&self, point: &Point2) -> bool;
}

impl Offsetable for Element {
    fn clone_with_distance(&self, distance: f64) -> Result<Self> {
        Ok(match self {
            Element::Segment(s) => Element::Segment(s.clone_with_distance(distance)?),
            Element::Arc(a) => Element::Arc(a.clone_with_distance(distance)?),
            Element::Polyline(p) => Element::Polyline(p.clone_with_distance(distance)?),
        })
    }

    fn is_positive_direction(&self, point: &Point2) -> bool {
        match self {
            Element::Segment(s) => s.is_positive_direction(point),
            Element::Arc(a) => a.is_positive_direction(point),
            Element::Polyline(p) => p.is_positive_direction(point),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Arc, Segment};

    #[test]
    fn element_offset_keeps_kind() {
        let seg: Element = Segment::new(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0))
            .unwrap()
            .into();
        let moved = seg.clone_with_distance(2.0).unwrap();
        assert_eq!(moved.kind(), "segment");
        assert!(seg.is_positive_direction(&Point2::new(1.0, 1.0)));

        let arc: Element = Arc::from_center(
            Point2::new(1.0, 0.0),
            Point2::new(-1.0, 0.0),
            Point2::origin(),
            true,
        )
        .unwrap()
        .into();
        assert_eq!(arc.clone_with_distance(1.0).unwrap().kind(), "arc");
        assert!(arc.is_positive_direction(&Point2::new(0.0, 3.0)));
    }
}

use crate::geometry::{Polyline, Segment, Shape};
use crate::math::distance_2d::distance;
use crate::math::orient_2d::is_collinear;
use crate::math::{points_coincide, Point2};

/// Moves one end of a polyline to a new intersection point.
///
/// When the intersection lies on the chain, the side towards `direction` is
/// kept and the rest is cut away. When it lies on the outward extension of a
/// terminal edge, that edge is stretched to reach it.
pub struct Fillet<'a> {
    polyline: &'a Polyline,
    intersection: Point2,
    direction: Point2,
}

/// Which part of the chain a fillet keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    /// From the intersection back to the first point.
    Head,
    /// From the intersection on to the last point.
    Tail,
    /// Stretch the first edge.
    ExtendFirst,
    /// Stretch the last edge.
    ExtendLast,
}

impl<'a> Fillet<'a> {
    /// Creates a new `Fillet` operation.
    #[must_use]
    pub fn new(polyline: &'a Polyline, intersection: Point2, direction: Point2) -> Self {
        Self {
            polyline,
            intersection,
            direction,
        }
    }

    /// Executes the fillet. Returns `None` when the intersection is neither
    /// on the chain nor on a forward extension of a terminal edge.
    ///
    /// The result starts at the intersection.
    #[must_use]
    pub fn execute(&self) -> Option<Polyline> {
        let points = self.polyline.points();
        let n = points.len();
        let mut new_points = vec![self.intersection];

        match self.side()? {
            (Side::Tail, index) => new_points.extend_from_slice(&points[index + 1..]),
            (Side::Head, index) => new_points.extend(points[..=index].iter().rev()),
            (Side::ExtendFirst, _) => new_points.extend_from_slice(&points[1..]),
            (Side::ExtendLast, _) => new_points.extend(points[..n - 1].iter().rev()),
        }

        Polyline::new(new_points)
            .ok()
            .map(|p| p.with_layer(self.polyline.layer()))
    }

    /// The straight piece the fillet adds or removes: from the intersection
    /// to the nearest kept vertex, or the stretch of an extended edge.
    #[must_use]
    pub fn segment(&self) -> Option<Segment> {
        let points = self.polyline.points();
        let n = points.len();
        let (side, index) = self.side()?;
        let other = match side {
            Side::Head => points[index],
            Side::Tail => points[index + 1],
            Side::ExtendFirst => points[0],
            Side::ExtendLast => points[n - 1],
        };
        if points_coincide(&other, &self.intersection) {
            return None;
        }
        Segment::new(self.intersection, other)
            .ok()
            .map(|s| s.with_layer(self.polyline.layer()))
    }

    fn side(&self) -> Option<(Side, usize)> {
        let points = self.polyline.points();
        let n = points.len();

        if let Some(index) = self.polyline.point_segment(&self.intersection) {
            let direction_segment = self.polyline.nearest_segment(&self.direction);
            let line = self.polyline.line(index)?;
            let to_tail = if index == direction_segment {
                line.direction().dot(&(self.direction - self.intersection)) > 0.0
            } else {
                index < direction_segment
            };
            let side = if to_tail { Side::Tail } else { Side::Head };
            tracing::debug!(segment = index, ?side, "fillet on chain");
            return Some((side, index));
        }

        let mut extend_first = is_collinear(&points[0], &points[1], &self.intersection);
        let mut extend_last = is_collinear(&points[n - 2], &points[n - 1], &self.intersection);
        if extend_first && extend_last {
            if distance(&self.direction, &points[0]) <= distance(&self.direction, &points[n - 1]) {
                extend_last = false;
            } else {
                extend_first = false;
            }
        }

        if extend_first && (points[0] - points[1]).dot(&(self.intersection - points[1])) > 0.0 {
            tracing::debug!("fillet extends first edge");
            return Some((Side::ExtendFirst, 0));
        }
        let last_edge = points[n - 1] - points[n - 2];
        if extend_last && last_edge.dot(&(self.intersection - points[n - 2])) > 0.0 {
            tracing::debug!("fillet extends last edge");
            return Some((Side::ExtendLast, n - 2));
        }
        tracing::debug!("fillet intersection unreachable");
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn poly(coords: &[(f64, f64)]) -> Polyline {
        Polyline::new(coords.iter().map(|&(x, y)| p(x, y)).collect()).unwrap()
    }

    fn l_shape() -> Polyline {
        poly(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)])
    }

    #[test]
    fn on_chain_direction_towards_tail() {
        let result = Fillet::new(&l_shape(), p(4.0, 0.0), p(6.0, 1.0)).execute().unwrap();
        assert_eq!(result, poly(&[(4.0, 0.0), (10.0, 0.0), (10.0, 10.0)]));
    }

    #[test]
    fn on_chain_direction_towards_head() {
        let result = Fillet::new(&l_shape(), p(4.0, 0.0), p(1.0, 1.0)).execute().unwrap();
        assert_eq!(result, poly(&[(4.0, 0.0), (0.0, 0.0)]));
    }

    #[test]
    fn later_direction_segment_keeps_tail() {
        let result = Fillet::new(&l_shape(), p(4.0, 0.0), p(11.0, 8.0)).execute().unwrap();
        assert_eq!(result, poly(&[(4.0, 0.0), (10.0, 0.0), (10.0, 10.0)]));
    }

    #[test]
    fn extends_first_edge_backwards() {
        let result = Fillet::new(&l_shape(), p(-3.0, 0.0), p(1.0, 0.0)).execute().unwrap();
        assert_eq!(result, poly(&[(-3.0, 0.0), (10.0, 0.0), (10.0, 10.0)]));
    }

    #[test]
    fn extends_last_edge_forwards() {
        let result = Fillet::new(&l_shape(), p(10.0, 14.0), p(10.0, 9.0)).execute().unwrap();
        assert_eq!(result, poly(&[(10.0, 14.0), (10.0, 0.0), (0.0, 0.0)]));
    }

    #[test]
    fn unreachable_intersection_gives_nothing() {
        assert!(Fillet::new(&l_shape(), p(5.0, 5.0), p(1.0, 0.0)).execute().is_none());
        // On the first edge's line but past its far end.
        assert!(Fillet::new(&l_shape(), p(14.0, 0.0), p(1.0, 0.0)).execute().is_none());
    }

    #[test]
    fn fillet_segment_spans_the_change() {
        let trimmed = Fillet::new(&l_shape(), p(4.0, 0.0), p(6.0, 1.0)).segment().unwrap();
        assert_eq!(trimmed, Segment::new(p(4.0, 0.0), p(10.0, 0.0)).unwrap());

        let stretched = Fillet::new(&l_shape(), p(-3.0, 0.0), p(1.0, 0.0)).segment().unwrap();
        assert_eq!(stretched, Segment::new(p(-3.0, 0.0), p(0.0, 0.0)).unwrap());

        // Intersection on the corner, keeping the head: nothing in between.
        assert!(Fillet::new(&l_shape(), p(10.0, 0.0), p(10.0, -5.0)).segment().is_none());
    }
}

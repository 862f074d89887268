use crate::context::LayerId;
use crate::error::{OperationError, Result};
use crate::math::distance_2d::{
    closest_on_segment, distance, point_to_line_dist, point_to_segment_dist,
};
use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::orient_2d::{determinant, midpoint, orthogonal, reflect_across};
use crate::math::{points_coincide, Point2, Vector2, TOLERANCE};

use super::reference::{MarkerKind, PointRef, ReferencePoint};
use super::{Aabb, Shape};

/// A straight line segment between two distinct points.
#[derive(Debug, Clone)]
pub struct Segment {
    start: Point2,
    end: Point2,
    layer: Option<LayerId>,
}

impl Segment {
    /// Creates a segment from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidArgument` if the endpoints coincide.
    pub fn new(start: Point2, end: Point2) -> Result<Self> {
        if points_coincide(&start, &end) {
            return Err(OperationError::InvalidArgument(format!(
                "segment endpoints coincide at ({}, {})",
                start.x, start.y
            ))
            .into());
        }
        Ok(Self::unchecked(start, end))
    }

    /// Builds a segment whose endpoints are already known to be distinct.
    pub(crate) fn unchecked(start: Point2, end: Point2) -> Self {
        Self {
            start,
            end,
            layer: None,
        }
    }

    /// Returns this segment tagged with `layer`.
    #[must_use]
    pub fn with_layer(mut self, layer: Option<LayerId>) -> Self {
        self.layer = layer;
        self
    }

    #[must_use]
    pub fn start(&self) -> &Point2 {
        &self.start
    }

    #[must_use]
    pub fn end(&self) -> &Point2 {
        &self.end
    }

    /// Vector from start to end (not normalized).
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        self.end - self.start
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        distance(&self.start, &self.end)
    }

    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        midpoint(&self.start, &self.end)
    }

    /// Unit normal pointing to the left of the travel direction.
    #[must_use]
    pub fn left_normal(&self) -> Vector2 {
        orthogonal(&(self.direction() / self.length()))
    }

    /// The same segment traversed from end to start.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            layer: self.layer,
        }
    }

    /// Returns `true` if `point` lies on the infinite line through this segment.
    #[must_use]
    pub fn line_contains(&self, point: &Point2) -> bool {
        point_to_line_dist(point, &self.start, &self.end) <= TOLERANCE
    }

    /// Returns `true` if both endpoints of `other` lie on this segment's line.
    #[must_use]
    pub fn is_collinear_with(&self, other: &Segment) -> bool {
        self.line_contains(&other.start) && self.line_contains(&other.end)
    }

    /// Returns `true` if `point` is on the left side of the travel direction.
    #[must_use]
    pub fn is_left_of(&self, point: &Point2) -> bool {
        determinant(&self.start, &self.end, point) > 0.0
    }

    /// Point of the segment closest to `point`.
    #[must_use]
    pub fn closest_point(&self, point: &Point2) -> Point2 {
        closest_on_segment(point, &self.start, &self.end)
    }

    /// Parallel copy shifted by `distance` along the left normal.
    #[must_use]
    pub fn offset(&self, distance: f64) -> Self {
        let shift = self.left_normal() * distance;
        Self {
            start: self.start + shift,
            end: self.end + shift,
            layer: self.layer,
        }
    }

    /// Intersection with another bounded segment, if any.
    #[must_use]
    pub fn intersection_with_segment(&self, other: &Segment) -> Option<Point2> {
        segment_segment_intersect_2d(&self.start, &self.end, &other.start, &other.end)
            .map(|(p, _, _)| p)
    }

    fn point(&self, target: PointRef) -> Option<Point2> {
        match target {
            PointRef::Start => Some(self.start),
            PointRef::End => Some(self.end),
            _ => None,
        }
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        let same =
            points_coincide(&self.start, &other.start) && points_coincide(&self.end, &other.end);
        let swapped =
            points_coincide(&self.start, &other.end) && points_coincide(&self.end, &other.start);
        same || swapped
    }
}

impl Shape for Segment {
    fn boundary(&self) -> Aabb {
        Aabb::new(self.start, self.end)
    }

    fn reference_points(&self, area: &Aabb) -> Vec<ReferencePoint> {
        [
            ReferencePoint::new(MarkerKind::Square, self.start, vec![PointRef::Start]),
            ReferencePoint::new(MarkerKind::Square, self.end, vec![PointRef::End]),
            ReferencePoint::new(
                MarkerKind::Triangle,
                self.midpoint(),
                vec![PointRef::Start, PointRef::End],
            ),
        ]
        .into_iter()
        .filter(|r| area.contains(&r.position))
        .collect()
    }

    fn contains(&self, point: &Point2) -> bool {
        point_to_segment_dist(point, &self.start, &self.end) <= TOLERANCE
    }

    /// An endpoint inside the area, or a crossing with one of its sides.
    fn intersects(&self, area: &Aabb) -> bool {
        area.contains(&self.start)
            || area.contains(&self.end)
            || area
                .edges()
                .iter()
                .any(|(a, b)| segment_segment_intersect_2d(&self.start, &self.end, a, b).is_some())
    }

    /// Foot of the perpendicular from `point`, or `None` if it falls outside
    /// the segment.
    fn projection_of(&self, point: &Point2) -> Option<Point2> {
        let d = self.direction();
        let t = (point - self.start).dot(&d) / d.norm_squared();
        if t < -TOLERANCE || t > 1.0 + TOLERANCE {
            return None;
        }
        Some(self.start + d * t.clamp(0.0, 1.0))
    }

    fn move_points(&mut self, targets: &[PointRef], vector: &Vector2) -> bool {
        if targets.iter().any(|t| self.point(*t).is_none()) {
            return false;
        }
        let start = if targets.contains(&PointRef::Start) {
            self.start + vector
        } else {
            self.start
        };
        let end = if targets.contains(&PointRef::End) {
            self.end + vector
        } else {
            self.end
        };
        if points_coincide(&start, &end) {
            tracing::debug!("segment move would collapse endpoints, reverted");
            return false;
        }
        self.start = start;
        self.end = end;
        true
    }

    fn translate(&mut self, vector: &Vector2) {
        self.start += vector;
        self.end += vector;
    }

    fn mirror(&mut self, a: &Point2, b: &Point2) -> Result<()> {
        let start = reflect_across(&self.start, a, b)?;
        let end = reflect_across(&self.end, a, b)?;
        self.start = start;
        self.end = end;
        Ok(())
    }

    fn layer(&self) -> Option<LayerId> {
        self.layer
    }

    fn set_layer(&mut self, layer: Option<LayerId>) {
        self.layer = layer;
    }
}

use crate::context::LayerId;
use crate::error::{OperationError, Result};
use crate::math::distance_2d::{distance, path_length};
use crate::math::orient_2d::reflect_across;
use crate::math::{points_coincide, Point2, Vector2};

use super::reference::{MarkerKind, PointRef, ReferencePoint};
use super::{Aabb, Segment, Shape};

/// An open or closed chain of straight segments.
///
/// Holds at least two points and never two consecutive points that coincide
/// within tolerance. The chain is closed when its first and last points are
/// exactly equal. Editing operations build new polylines instead of mutating
/// this one.
#[derive(Debug, Clone)]
pub struct Polyline {
    points: Vec<Point2>,
    layer: Option<LayerId>,
}

impl Polyline {
    /// Creates a polyline, collapsing runs of coincident consecutive points.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidArgument` if fewer than two distinct
    /// points remain.
    pub fn new(points: Vec<Point2>) -> Result<Self> {
        let mut kept: Vec<Point2> = Vec::with_capacity(points.len());
        for p in points {
            if kept.last().is_some_and(|last| points_coincide(last, &p)) {
                continue;
            }
            kept.push(p);
        }
        if kept.len() < 2 {
            return Err(OperationError::InvalidArgument(format!(
                "polyline needs at least 2 distinct points, got {}",
                kept.len()
            ))
            .into());
        }
        Ok(Self {
            points: kept,
            layer: None,
        })
    }

    /// Returns this polyline tagged with `layer`.
    #[must_use]
    pub fn with_layer(mut self, layer: Option<LayerId>) -> Self {
        self.layer = layer;
        self
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[must_use]
    pub fn first(&self) -> &Point2 {
        &self.points[0]
    }

    #[must_use]
    pub fn last(&self) -> &Point2 {
        &self.points[self.points.len() - 1]
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Consecutive-point segments, rebuilt from the current points on every call.
    #[must_use]
    pub fn lines(&self) -> Vec<Segment> {
        self.points
            .windows(2)
            .map(|w| Segment::unchecked(w[0], w[1]))
            .collect()
    }

    /// Segment `index`, built on demand.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<Segment> {
        let start = self.points.get(index)?;
        let end = self.points.get(index + 1)?;
        Some(Segment::unchecked(*start, *end))
    }

    /// Returns `true` if the first and last points are bit-for-bit equal.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.first() == self.last()
    }

    /// The same chain traversed from the last point to the first.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self {
            points,
            layer: self.layer,
        }
    }

    /// Index of the segment nearest to `point`; the first one wins on ties.
    ///
    /// A segment's distance is measured to the perpendicular foot when it
    /// falls on the segment, otherwise to the closer endpoint.
    #[must_use]
    pub fn nearest_segment(&self, point: &Point2) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, line) in self.lines().iter().enumerate() {
            let dist = match line.projection_of(point) {
                Some(projection) => distance(point, &projection),
                None => distance(point, line.start()).min(distance(point, line.end())),
            };
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        best
    }

    /// Index of the last segment containing `point`, or `None`.
    #[must_use]
    pub fn point_segment(&self, point: &Point2) -> Option<usize> {
        self.lines().iter().rposition(|line| line.contains(point))
    }

    /// The endpoint reached by the shorter walk along the chain from the
    /// point's projection onto its nearest segment. Ties go to the first point.
    #[must_use]
    pub fn nearest_extreme_point(&self, point: &Point2) -> Point2 {
        let index = self.nearest_segment(point);
        let projection = self
            .line(index)
            .map_or(*self.first(), |line| line.closest_point(point));

        let mut head: Vec<Point2> = self.points[..=index].to_vec();
        head.push(projection);
        let mut tail = vec![projection];
        tail.extend_from_slice(&self.points[index + 1..]);

        let head_len = path_length(&head).unwrap_or_else(|| distance(self.first(), &projection));
        let tail_len = path_length(&tail).unwrap_or_else(|| distance(self.last(), &projection));

        if head_len > tail_len {
            *self.last()
        } else {
            *self.first()
        }
    }

    fn vertex_ref_is_valid(&self, target: PointRef) -> bool {
        matches!(target, PointRef::Vertex(i) if i < self.points.len())
    }

    fn has_collapsed_segment(points: &[Point2]) -> bool {
        points.windows(2).any(|w| points_coincide(&w[0], &w[1]))
    }
}

/// Equal when the point sequences match in the same or in reversed order.
/// The layer does not take part.
impl PartialEq for Polyline {
    fn eq(&self, other: &Self) -> bool {
        if self.points.len() != other.points.len() {
            return false;
        }
        let forward = self
            .points
            .iter()
            .zip(&other.points)
            .all(|(a, b)| points_coincide(a, b));
        forward
            || self
                .points
                .iter()
                .rev()
                .zip(&other.points)
                .all(|(a, b)| points_coincide(a, b))
    }
}

impl Shape for Polyline {
    fn boundary(&self) -> Aabb {
        let mut aabb = Aabb::new(*self.first(), *self.first());
        for p in &self.points[1..] {
            aabb.include(p);
        }
        aabb
    }

    /// Squares at the ends, crosses at interior vertices and a triangle at
    /// every segment midpoint that drags the whole chain.
    fn reference_points(&self, area: &Aabb) -> Vec<ReferencePoint> {
        let n = self.points.len();
        let mut refs = Vec::with_capacity(2 * n);

        if self.is_closed() {
            refs.push(ReferencePoint::new(
                MarkerKind::Square,
                *self.first(),
                vec![PointRef::Vertex(0), PointRef::Vertex(n - 1)],
            ));
        } else {
            refs.push(ReferencePoint::new(
                MarkerKind::Square,
                *self.first(),
                vec![PointRef::Vertex(0)],
            ));
            refs.push(ReferencePoint::new(
                MarkerKind::Square,
                *self.last(),
                vec![PointRef::Vertex(n - 1)],
            ));
        }

        for (i, p) in self.points.iter().enumerate().take(n - 1).skip(1) {
            refs.push(ReferencePoint::new(
                MarkerKind::Cross,
                *p,
                vec![PointRef::Vertex(i)],
            ));
        }

        let all: Vec<PointRef> = (0..n).map(PointRef::Vertex).collect();
        for line in self.lines() {
            refs.push(ReferencePoint::new(
                MarkerKind::Triangle,
                line.midpoint(),
                all.clone(),
            ));
        }

        refs.retain(|r| area.contains(&r.position));
        refs
    }

    fn contains(&self, point: &Point2) -> bool {
        self.lines().iter().any(|line| line.contains(point))
    }

    fn intersects(&self, area: &Aabb) -> bool {
        self.lines().iter().any(|line| line.intersects(area))
    }

    /// Closest perpendicular foot over all segments. A closed polyline only
    /// accepts feet lying on itself; `None` when no segment projects.
    fn projection_of(&self, point: &Point2) -> Option<Point2> {
        let closed = self.is_closed();
        self.lines()
            .iter()
            .filter_map(|line| line.projection_of(point))
            .filter(|projection| !closed || self.contains(projection))
            .map(|projection| (distance(point, &projection), projection))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, projection)| projection)
    }

    fn move_points(&mut self, targets: &[PointRef], vector: &Vector2) -> bool {
        if !targets.iter().all(|t| self.vertex_ref_is_valid(*t)) {
            return false;
        }
        let mut moved = self.points.clone();
        for (i, p) in moved.iter_mut().enumerate() {
            if targets.contains(&PointRef::Vertex(i)) {
                *p += vector;
            }
        }
        if Self::has_collapsed_segment(&moved) {
            tracing::debug!("polyline move would collapse a segment, reverted");
            return false;
        }
        self.points = moved;
        true
    }

    fn translate(&mut self, vector: &Vector2) {
        for p in &mut self.points {
            *p += vector;
        }
    }

    fn mirror(&mut self, a: &Point2, b: &Point2) -> Result<()> {
        let mirrored = self
            .points
            .iter()
            .map(|p| reflect_across(p, a, b))
            .collect::<Result<Vec<_>>>()?;
        self.points = mirrored;
        Ok(())
    }

    fn layer(&self) -> Option<LayerId> {
        self.layer
    }

    fn set_layer(&mut self, layer: Option<LayerId>) {
        self.layer = layer;
    }
}

//! Total order of points along a polyline's path.
use std::cmp::Ordering;

use crate::geometry::{Polyline, Segment, Shape};
use crate::math::{points_coincide, Point2};

/// Position of a point along a polyline: segment index first, then the
/// scalar projection onto that segment's (unnormalized) direction.
#[derive(Debug, Clone, Copy)]
pub struct PathKey {
    pub segment: usize,
    pub projection: f64,
}

impl PathKey {
    /// Key of the path's own starting point.
    pub const ZERO: Self = Self {
        segment: 0,
        projection: 0.0,
    };
}

impl Ord for PathKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segment
            .cmp(&other.segment)
            .then_with(|| self.projection.total_cmp(&other.projection))
    }
}

impl PartialOrd for PathKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PathKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PathKey {}

/// Orders points along a polyline, walking forward from a reference endpoint.
///
/// When the reference is not the polyline's first point the walk runs from
/// the last point: segment indices are mirrored and directions negated.
pub struct PathOrder<'a> {
    polyline: &'a Polyline,
    reversed: bool,
}

impl<'a> PathOrder<'a> {
    #[must_use]
    pub fn new(polyline: &'a Polyline, reference: &Point2) -> Self {
        Self {
            polyline,
            reversed: !points_coincide(polyline.first(), reference),
        }
    }

    /// Walk from the polyline's first point.
    #[must_use]
    pub fn forward(polyline: &'a Polyline) -> Self {
        Self {
            polyline,
            reversed: false,
        }
    }

    /// Key of a point lying on the path or on the outward extension of a
    /// terminal edge. `None` for any other point.
    #[must_use]
    pub fn key(&self, point: &Point2) -> Option<PathKey> {
        let index = self.segment_of(point)?;
        Some(self.key_on(index, point))
    }

    /// Key of an arbitrary point, measured on its nearest segment.
    #[must_use]
    pub fn key_near(&self, point: &Point2) -> PathKey {
        let index = self.polyline.nearest_segment(point);
        self.key_on(index, point)
    }

    /// Keys of the placeable points, sorted along the walk. Points sharing a
    /// key are kept once.
    #[must_use]
    pub fn sort<I>(&self, points: I) -> Vec<(PathKey, Point2)>
    where
        I: IntoIterator<Item = Point2>,
    {
        let mut keyed: Vec<(PathKey, Point2)> = points
            .into_iter()
            .filter_map(|p| self.key(&p).map(|k| (k, p)))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        keyed.dedup_by(|a, b| a.0 == b.0);
        keyed
    }

    fn segment_of(&self, point: &Point2) -> Option<usize> {
        let lines = self.polyline.lines();
        if let Some(i) = lines.iter().position(|line| line.contains(point)) {
            return Some(i);
        }

        let first = &lines[0];
        if extends_backward(first, point) {
            return Some(0);
        }
        let last_index = lines.len() - 1;
        if extends_forward(&lines[last_index], point) {
            return Some(last_index);
        }
        None
    }

    fn key_on(&self, index: usize, point: &Point2) -> PathKey {
        let lines = self.polyline.lines();
        let line = &lines[index];
        let (start, end, segment) = if self.reversed {
            (line.end(), line.start(), lines.len() - 1 - index)
        } else {
            (line.start(), line.end(), index)
        };
        PathKey {
            segment,
            projection: (end - start).dot(&(point - start)),
        }
    }
}

/// On the line through `line`, before its start.
fn extends_backward(line: &Segment, point: &Point2) -> bool {
    line.line_contains(point) && line.direction().dot(&(point - line.start())) < 0.0
}

/// On the line through `line`, past its end.
fn extends_forward(line: &Segment, point: &Point2) -> bool {
    line.line_contains(point) && line.direction().dot(&(point - line.end())) > 0.0
}

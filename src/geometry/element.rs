use crate::context::LayerId;
use crate::error::Result;
use crate::math::{dedup_points, Point2, Vector2};

use super::reference::{PointRef, ReferencePoint};
use super::{Aabb, Arc, Polyline, Segment, Shape};

/// Any drawable element handled by the editing kernel.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Segment(Segment),
    Arc(Arc),
    Polyline(Polyline),
}

impl Element {
    /// Short name of the element kind, used in diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Segment(_) => "segment",
            Self::Arc(_) => "arc",
            Self::Polyline(_) => "polyline",
        }
    }

    /// Points where this element meets `other`, without duplicates.
    #[must_use]
    pub fn intersection(&self, other: &Element) -> Vec<Point2> {
        let points = match self {
            Self::Segment(s) => segment_hits(s, other),
            Self::Arc(a) => match other {
                Self::Segment(s) => a.intersection_with_segment(s),
                Self::Arc(b) => a.intersection_with_arc(b),
                Self::Polyline(p) => p
                    .lines()
                    .iter()
                    .flat_map(|line| a.intersection_with_segment(line))
                    .collect(),
            },
            Self::Polyline(p) => p
                .lines()
                .iter()
                .flat_map(|line| segment_hits(line, other))
                .collect(),
        };
        dedup_points(points)
    }
}

fn segment_hits(segment: &Segment, other: &Element) -> Vec<Point2> {
    match other {
        Element::Segment(s) => segment.intersection_with_segment(s).into_iter().collect(),
        Element::Arc(a) => a.intersection_with_segment(segment),
        Element::Polyline(p) => p
            .lines()
            .iter()
            .filter_map(|line| segment.intersection_with_segment(line))
            .collect(),
    }
}

impl Shape for Element {
    fn boundary(&self) -> Aabb {
        match self {
            Self::Segment(s) => s.boundary(),
            Self::Arc(a) => a.boundary(),
            Self::Polyline(p) => p.boundary(),
        }
    }

    fn reference_points(&self, area: &Aabb) -> Vec<ReferencePoint> {
        match self {
            Self::Segment(s) => s.reference_points(area),
            Self::Arc(a) => a.reference_points(area),
            Self::Polyline(p) => p.reference_points(area),
        }
    }

    fn contains(&self, point: &Point2) -> bool {
        match self {
            Self::Segment(s) => s.contains(point),
            Self::Arc(a) => a.contains(point),
            Self::Polyline(p) => p.contains(point),
        }
    }

    fn intersects(&self, area: &Aabb) -> bool {
        match self {
            Self::Segment(s) => s.intersects(area),
            Self::Arc(a) => a.intersects(area),
            Self::Polyline(p) => p.intersects(area),
        }
    }

    fn projection_of(&self, point: &Point2) -> Option<Point2> {
        match self {
            Self::Segment(s) => s.projection_of(point),
            Self::Arc(a) => a.projection_of(point),
            Self::Polyline(p) => p.projection_of(point),
        }
    }

    fn move_points(&mut self, targets: &[PointRef], vector: &Vector2) -> bool {
        match self {
            Self::Segment(s) => s.move_points(targets, vector),
            Self::Arc(a) => a.move_points(targets, vector),
            Self::Polyline(p) => p.move_points(targets, vector),
        }
    }

    fn translate(&mut self, vector: &Vector2) {
        match self {
            Self::Segment(s) => s.translate(vector),
            Self::Arc(a) => a.translate(vector),
            Self::Polyline(p) => p.translate(vector),
        }
    }

    fn mirror(&mut self, a: &Point2, b: &Point2) -> Result<()> {
        match self {
            Self::Segment(s) => s.mirror(a, b),
            Self::Arc(arc) => arc.mirror(a, b),
            Self::Polyline(p) => p.mirror(a, b),
        }
    }

    fn layer(&self) -> Option<LayerId> {
        match self {
            Self::Segment(s) => s.layer(),
            Self::Arc(a) => a.layer(),
            Self::Polyline(p) => p.layer(),
        }
    }

    fn set_layer(&mut self, layer: Option<LayerId>) {
        match self {
            Self::Segment(s) => s.set_layer(layer),
            Self::Arc(a) => a.set_layer(layer),
            Self::Polyline(p) => p.set_layer(layer),
        }
    }
}

impl From<Segment> for Element {
    fn from(segment: Segment) -> Self {
        Self::Segment(segment)
    }
}

impl From<Arc> for Element {
    fn from(arc: Arc) -> Self {
        Self::Arc(arc)
    }
}

impl From<Polyline> for Element {
    fn from(polyline: Polyline) -> Self {
        Self::Polyline(polyline)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn polyline_vertex_hit_is_reported_once() {
        let chain: Element = Polyline::new(vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)])
            .unwrap()
            .into();
        let diagonal: Element = Segment::new(p(8.0, -2.0), p(12.0, 2.0)).unwrap().into();
        let hits = chain.intersection(&diagonal);
        assert_eq!(hits.len(), 1, "hits={hits:?}");
        assert!((hits[0].x - 10.0).abs() < 1e-9);
        assert!(hits[0].y.abs() < 1e-9);
    }

    #[test]
    fn intersection_is_symmetric_across_kinds() {
        let arc: Element = Arc::from_center(p(1.0, 0.0), p(-1.0, 0.0), p(0.0, 0.0), true)
            .unwrap()
            .into();
        let chain: Element = Polyline::new(vec![p(-2.0, 0.5), p(2.0, 0.5), p(2.0, 3.0)])
            .unwrap()
            .into();
        let a = arc.intersection(&chain);
        let b = chain.intersection(&arc);
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn dispatch_reaches_variant() {
        let mut seg: Element = Segment::new(p(0.0, 0.0), p(2.0, 0.0)).unwrap().into();
        assert_eq!(seg.kind(), "segment");
        assert!(seg.contains(&p(1.0, 0.0)));
        seg.translate(&Vector2::new(0.0, 1.0));
        assert!(seg.contains(&p(1.0, 1.0)));
        assert_eq!(seg.boundary().min, p(0.0, 1.0));
    }

    #[test]
    fn window_selection_dispatches() {
        let arc: Element = Arc::from_center(p(1.0, 0.0), p(-1.0, 0.0), p(0.0, 0.0), true)
            .unwrap()
            .into();
        let chain: Element = Polyline::new(vec![p(5.0, 0.0), p(8.0, 0.0)]).unwrap().into();
        let window = Aabb::new(p(-0.5, 0.5), p(0.5, 1.5));
        assert!(arc.intersects(&window));
        assert!(!chain.intersects(&window));
        assert!(chain.intersects(&Aabb::new(p(6.0, -1.0), p(7.0, 1.0))));
    }
}

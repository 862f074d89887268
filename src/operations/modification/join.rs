use crate::geometry::{Polyline, Segment, Shape};
use crate::math::distance_2d::distance;
use crate::math::{points_coincide, Point2, TOLERANCE};

enum Other<'a> {
    Segment(&'a Segment),
    Polyline(&'a Polyline),
}

/// Joins a polyline with a segment or another polyline into one chain.
///
/// Shared endpoints are tried first. Failing that, a collinear terminal edge
/// lying wholly on the outward extension of the polyline's first or last edge
/// is merged into it. Collinear pieces overlapping the chain, or lying past
/// the edge's inner vertex, do not join.
pub struct Join<'a> {
    polyline: &'a Polyline,
    other: Other<'a>,
}

impl<'a> Join<'a> {
    /// Join a polyline with a segment.
    #[must_use]
    pub fn with_segment(polyline: &'a Polyline, segment: &'a Segment) -> Self {
        Self {
            polyline,
            other: Other::Segment(segment),
        }
    }

    /// Join two polylines.
    #[must_use]
    pub fn with_polyline(polyline: &'a Polyline, other: &'a Polyline) -> Self {
        Self {
            polyline,
            other: Other::Polyline(other),
        }
    }

    /// Executes the join. `None` means the two elements do not connect.
    ///
    /// The result keeps the first polyline's layer.
    #[must_use]
    pub fn execute(&self) -> Option<Polyline> {
        let points = match self.other {
            Other::Segment(segment) => self.join_segment(segment),
            Other::Polyline(other) => self.join_polyline(other),
        }?;
        tracing::debug!(points = points.len(), "join succeeded");
        Polyline::new(points)
            .ok()
            .map(|p| p.with_layer(self.polyline.layer()))
    }

    fn join_segment(&self, segment: &Segment) -> Option<Vec<Point2>> {
        let points = self.polyline.points();
        let first = self.polyline.first();
        let last = self.polyline.last();
        let (start, end) = (segment.start(), segment.end());

        let prepend = |p: &Point2| {
            let mut out = vec![*p];
            out.extend_from_slice(points);
            out
        };
        let append = |p: &Point2| {
            let mut out = points.to_vec();
            out.push(*p);
            out
        };

        if points_coincide(first, start) {
            return Some(prepend(end));
        }
        if points_coincide(first, end) {
            return Some(prepend(start));
        }
        if points_coincide(last, start) {
            return Some(append(end));
        }
        if points_coincide(last, end) {
            return Some(append(start));
        }

        let lines = self.polyline.lines();
        let n = points.len();
        let far_end = |anchor: &Point2| {
            if distance(anchor, start) >= distance(anchor, end) {
                *start
            } else {
                *end
            }
        };
        let outward = |inner: &Point2, anchor: &Point2| {
            let near = if distance(anchor, start) <= distance(anchor, end) {
                start
            } else {
                end
            };
            stretches(inner, anchor, near, &far_end(inner))
        };

        if lines[0].is_collinear_with(segment) && outward(&points[1], &points[0]) {
            let mut out = points.to_vec();
            out[0] = far_end(&points[1]);
            return Some(out);
        }
        let last_line = &lines[lines.len() - 1];
        if last_line.is_collinear_with(segment) && outward(&points[n - 2], &points[n - 1]) {
            let mut out = points.to_vec();
            out[n - 1] = far_end(&points[n - 2]);
            return Some(out);
        }
        tracing::debug!("segment does not touch or extend the polyline");
        None
    }

    fn join_polyline(&self, other: &Polyline) -> Option<Vec<Point2>> {
        let p = self.polyline.points();
        let o = other.points();
        let (m, n) = (p.len(), o.len());

        let chain = |a: &[Point2], b: &[Point2]| {
            let mut out = a.to_vec();
            out.extend_from_slice(b);
            out
        };
        let reversed = |s: &[Point2]| s.iter().rev().copied().collect::<Vec<_>>();

        if points_coincide(&p[0], &o[0]) {
            return Some(chain(&reversed(&o[1..]), p));
        }
        if points_coincide(&p[0], &o[n - 1]) {
            return Some(chain(&o[..n - 1], p));
        }
        if points_coincide(&p[m - 1], &o[0]) {
            return Some(chain(&p[..m - 1], o));
        }
        if points_coincide(&p[m - 1], &o[n - 1]) {
            return Some(chain(p, &reversed(&o[..n - 1])));
        }

        let mine = self.polyline.lines();
        let theirs = other.lines();
        let (my_first, my_last) = (&mine[0], &mine[mine.len() - 1]);
        let (their_first, their_last) = (&theirs[0], &theirs[theirs.len() - 1]);

        let at_head = |near: &Point2, far: &Point2| stretches(&p[1], &p[0], near, far);
        let at_tail = |near: &Point2, far: &Point2| stretches(&p[m - 2], &p[m - 1], near, far);

        if my_first.is_collinear_with(their_first) && at_head(&o[0], &o[1]) {
            return Some(chain(&reversed(&o[1..]), &p[1..]));
        }
        if my_first.is_collinear_with(their_last) && at_head(&o[n - 1], &o[n - 2]) {
            return Some(chain(&o[..n - 1], &p[1..]));
        }
        if my_last.is_collinear_with(their_first) && at_tail(&o[0], &o[1]) {
            return Some(chain(&p[..m - 1], &o[1..]));
        }
        if my_last.is_collinear_with(their_last) && at_tail(&o[n - 1], &o[n - 2]) {
            return Some(chain(&p[..m - 1], &reversed(&o[..n - 1])));
        }
        tracing::debug!("polylines do not touch or extend each other");
        None
    }
}

/// Whether the collinear piece `near`-`far` continues the edge `inner`-`anchor`
/// outward: `near` at or past `anchor`, `far` farther out still.
fn stretches(inner: &Point2, anchor: &Point2, near: &Point2, far: &Point2) -> bool {
    let outward = (anchor - inner) / distance(inner, anchor);
    let near_at = outward.dot(&(near - anchor));
    let far_at = outward.dot(&(far - anchor));
    near_at >= -TOLERANCE && far_at > near_at
}

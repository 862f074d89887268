use crate::error::{DraftError, OperationError, Result};
use crate::geometry::{Polyline, Segment, Shape};
use crate::math::intersect_2d::{line_line_intersect_2d, point_at};
use crate::math::{dedup_points, Point2, Vector2, TOLERANCE};

use super::Offsetable;

impl Offsetable for Polyline {
    /// Mitred offset: every vertex slides along its corner bisector until it
    /// meets the shifted edges.
    fn clone_with_distance(&self, distance: f64) -> Result<Self> {
        let lines = self.lines();
        if let [only] = lines.as_slice() {
            let moved = only.offset(distance);
            return Ok(Polyline::new(vec![*moved.start(), *moved.end()])?.with_layer(self.layer()));
        }

        let points = self.points();
        let count = lines.len();
        let closed = self.is_closed();
        let normals: Vec<Vector2> = lines.iter().map(|l| l.left_normal()).collect();

        let mut out: Vec<Point2> = Vec::with_capacity(points.len());
        for (k, vertex) in points.iter().enumerate() {
            let bisector = if k == 0 && !closed {
                normals[0]
            } else if k == count && !closed {
                normals[count - 1]
            } else if k == 0 || k == count {
                normals[count - 1] + normals[0]
            } else {
                normals[k - 1] + normals[k]
            };
            if bisector.norm() < TOLERANCE {
                let reason = format!("edges fold back on each other at vertex {k}");
                return Err(invalid(distance, reason));
            }

            let edge = lines[k.min(count - 1)].offset(distance);
            let (t, _) =
                line_line_intersect_2d(vertex, &bisector, edge.start(), &edge.direction())
                    .ok_or_else(|| invalid(distance, format!("no mitre at vertex {k}")))?;
            let moved = point_at(vertex, &bisector, t);

            if let Some(previous) = out.last() {
                if lines[k - 1].direction().dot(&(moved - previous)) <= 0.0 {
                    tracing::debug!(vertex = k, distance, "polyline offset inverts an edge");
                    return Err(invalid(distance, format!("edge {} would be inverted", k - 1)));
                }
            }
            out.push(moved);
        }

        if closed {
            let n = out.len();
            out[n - 1] = out[0];
        }

        Polyline::new(out)
            .map(|p| p.with_layer(self.layer()))
            .map_err(|_| invalid(distance, "offset collapses the polyline".to_owned()))
    }

    /// Majority vote over the edges: a ray from `point` to just left of an
    /// edge's midpoint that crosses the chain an even number of times means
    /// `point` sees that edge from its left.
    fn is_positive_direction(&self, point: &Point2) -> bool {
        let lines = self.lines();
        let votes = lines
            .iter()
            .filter(|line| {
                let helper = line.midpoint() + line.left_normal();
                crossings(&lines, point, &helper) % 2 == 0
            })
            .count();
        votes > lines.len() / 2
    }
}

fn crossings(lines: &[Segment], from: &Point2, to: &Point2) -> usize {
    let Ok(ray) = Segment::new(*from, *to) else {
        return 0;
    };
    let hits = lines
        .iter()
        .filter_map(|line| ray.intersection_with_segment(line))
        .collect();
    dedup_points(hits).len()
}

fn invalid(distance: f64, reason: String) -> DraftError {
    OperationError::InvalidParameter {
        parameter: "distance",
        value: distance,
        reason,
    }
    .into()
}

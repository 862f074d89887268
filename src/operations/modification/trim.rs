use crate::geometry::{Element, Polyline, Shape};
use crate::math::orient_2d::is_collinear;
use crate::math::{dedup_points, points_coincide, Point2};

use super::ordering::{PathKey, PathOrder};
use super::Split;

/// Outcome of a trim.
#[derive(Debug, Clone, PartialEq)]
pub enum TrimResult {
    /// No reference crosses the polyline; nothing to cut.
    NoChange,
    /// Every fragment contained the click; the polyline disappears.
    Removed,
    /// The polyline is replaced by these fragments.
    Replaced(Vec<Polyline>),
}

/// Removes the piece of a polyline around a clicked point, bounded by the
/// nearest crossings with a set of reference elements.
pub struct Trim<'a> {
    polyline: &'a Polyline,
    references: &'a [Element],
    click: Point2,
}

impl<'a> Trim<'a> {
    /// Creates a new `Trim` operation.
    ///
    /// `references` must not include the polyline itself.
    #[must_use]
    pub fn new(polyline: &'a Polyline, references: &'a [Element], click: Point2) -> Self {
        Self {
            polyline,
            references,
            click,
        }
    }

    /// Executes the trim.
    #[must_use]
    pub fn execute(&self) -> TrimResult {
        let order = PathOrder::forward(self.polyline);
        let crossings: Vec<(PathKey, Point2)> = order
            .sort(self.proper_intersections())
            .into_iter()
            .filter(|(key, _)| *key >= PathKey::ZERO)
            .collect();
        if crossings.is_empty() {
            tracing::debug!("trim found no crossings");
            return TrimResult::NoChange;
        }

        let click_key = order.key_near(&self.click);
        let split_at = crossings.partition_point(|(key, _)| *key < click_key);
        let (before, after) = crossings.split_at(split_at);

        let (first_cut, second_cut) = match (before, after) {
            ([], [first, .., last]) | ([first, .., last], []) => (first.1, last.1),
            ([], [only]) | ([only], []) => (only.1, only.1),
            ([.., last_before], [first_after, ..]) => (first_after.1, last_before.1),
            ([], []) => return TrimResult::NoChange,
        };
        tracing::debug!(
            first = ?first_cut,
            second = ?second_cut,
            crossings = crossings.len(),
            "trim cuts selected"
        );

        let mut kept: Vec<Polyline> = Split::new(self.polyline, first_cut, second_cut)
            .execute()
            .into_iter()
            .filter(|fragment| !fragment.contains(&self.click))
            .collect();

        if kept.len() == 2 {
            if let Some(merged) = merge_adjacent(&kept[0], &kept[1]) {
                kept = vec![merged];
            }
        }

        if kept.is_empty() {
            TrimResult::Removed
        } else {
            TrimResult::Replaced(kept)
        }
    }

    /// Crossings lying on both the polyline and a reference, other than the
    /// polyline's own endpoints.
    fn proper_intersections(&self) -> Vec<Point2> {
        let first = self.polyline.first();
        let last = self.polyline.last();
        let target = Element::Polyline(self.polyline.clone());
        let hits = self
            .references
            .iter()
            .flat_map(|reference| {
                reference
                    .intersection(&target)
                    .into_iter()
                    .filter(move |p| reference.contains(p))
            })
            .filter(|p| self.polyline.contains(p))
            .filter(|p| !points_coincide(p, first) && !points_coincide(p, last))
            .collect();
        dedup_points(hits)
    }
}

/// Joins two fragments when the first ends where the second starts. The
/// shared vertex is dropped if it is collinear with its neighbours.
fn merge_adjacent(head: &Polyline, tail: &Polyline) -> Option<Polyline> {
    let head_points = head.points();
    let tail_points = tail.points();
    let shared = tail_points[0];
    if !points_coincide(head.last(), &shared) {
        return None;
    }

    let mut points = head_points[..head_points.len() - 1].to_vec();
    let before = points.last().copied()?;
    let skip = usize::from(is_collinear(&before, &shared, &tail_points[1]));
    points.extend_from_slice(&tail_points[skip..]);

    Polyline::new(points)
        .ok()
        .map(|merged| merged.with_layer(head.layer()))
}

use crate::geometry::{Polyline, Shape};
use crate::math::distance_2d::distance;
use crate::math::Point2;

/// Cuts a polyline at two points.
///
/// Fragments come back ordered from the polyline's first point to its last.
/// Fragments that collapse to fewer than two distinct points (a cut on an
/// existing endpoint, or two equal cuts) are left out. On a closed polyline
/// the pieces before the first cut and after the second are joined through
/// the original start into one wrap-around fragment, returned first.
pub struct Split<'a> {
    polyline: &'a Polyline,
    first_cut: Point2,
    second_cut: Point2,
}

impl<'a> Split<'a> {
    /// Creates a new `Split` operation. The cuts may be given in either order.
    #[must_use]
    pub fn new(polyline: &'a Polyline, first_cut: Point2, second_cut: Point2) -> Self {
        Self {
            polyline,
            first_cut,
            second_cut,
        }
    }

    /// Executes the split.
    #[must_use]
    pub fn execute(&self) -> Vec<Polyline> {
        let points = self.polyline.points();
        let layer = self.polyline.layer();

        let mut first_cut = self.first_cut;
        let mut second_cut = self.second_cut;
        let mut first_segment = self.polyline.nearest_segment(&first_cut);
        let mut last_segment = self.polyline.nearest_segment(&second_cut);

        let out_of_order = if first_segment == last_segment {
            let anchor = &points[first_segment];
            distance(anchor, &first_cut) > distance(anchor, &second_cut)
        } else {
            first_segment > last_segment
        };
        if out_of_order {
            std::mem::swap(&mut first_cut, &mut second_cut);
            std::mem::swap(&mut first_segment, &mut last_segment);
        }

        let mut head_points = points[..=first_segment].to_vec();
        head_points.push(first_cut);

        let mut middle_points = vec![first_cut];
        middle_points.extend_from_slice(&points[first_segment + 1..=last_segment]);
        middle_points.push(second_cut);

        let mut tail_points = vec![second_cut];
        tail_points.extend_from_slice(&points[last_segment + 1..]);

        let head = Polyline::new(head_points).ok();
        let middle = Polyline::new(middle_points).ok();
        let tail = Polyline::new(tail_points).ok();

        let mut fragments = Vec::with_capacity(3);
        match (head, tail) {
            (Some(head), Some(tail)) if self.polyline.is_closed() => {
                let mut wrap = tail.points().to_vec();
                wrap.extend_from_slice(head.points());
                fragments.extend(Polyline::new(wrap).ok());
                fragments.extend(middle);
            }
            (head, tail) => {
                fragments.extend(head);
                fragments.extend(middle);
                fragments.extend(tail);
            }
        }

        tracing::trace!(fragments = fragments.len(), "polyline split");
        fragments
            .into_iter()
            .map(|fragment| fragment.with_layer(layer))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn poly(coords: &[(f64, f64)]) -> Polyline {
        Polyline::new(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()).unwrap()
    }

    fn points_of(p: &Polyline) -> Vec<(f64, f64)> {
        p.points().iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn three_fragments_rebuild_the_original() {
        let original = poly(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let parts = Split::new(&original, Point2::new(10.0, 4.0), Point2::new(3.0, 0.0)).execute();
        assert_eq!(parts.len(), 3);
        assert_eq!(points_of(&parts[0]), vec![(0.0, 0.0), (3.0, 0.0)]);
        assert_eq!(points_of(&parts[1]), vec![(3.0, 0.0), (10.0, 0.0), (10.0, 4.0)]);
        assert_eq!(points_of(&parts[2]), vec![(10.0, 4.0), (10.0, 10.0), (0.0, 10.0)]);

        // Concatenation (dropping the shared cut points) is the original with
        // both cuts inserted.
        let mut joined = parts[0].points().to_vec();
        for part in &parts[1..] {
            joined.extend_from_slice(&part.points()[1..]);
        }
        let expected = poly(&[
            (0.0, 0.0),
            (3.0, 0.0),
            (10.0, 0.0),
            (10.0, 4.0),
            (10.0, 10.0),
            (0.0, 10.0),
        ]);
        assert_eq!(Polyline::new(joined).unwrap(), expected);
    }

    #[test]
    fn same_segment_cuts_ordered_by_distance() {
        let original = poly(&[(0.0, 0.0), (10.0, 0.0)]);
        let parts = Split::new(&original, Point2::new(7.0, 0.0), Point2::new(2.0, 0.0)).execute();
        assert_eq!(parts.len(), 3);
        assert_eq!(points_of(&parts[1]), vec![(2.0, 0.0), (7.0, 0.0)]);
    }

    #[test]
    fn equal_cuts_drop_the_middle() {
        let original = poly(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let cut = Point2::new(5.0, 0.0);
        let parts = Split::new(&original, cut, cut).execute();
        assert_eq!(parts.len(), 2);
        assert_eq!(points_of(&parts[0]), vec![(0.0, 0.0), (5.0, 0.0)]);
        assert_eq!(points_of(&parts[1]), vec![(5.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    }

    #[test]
    fn cut_on_endpoint_drops_head() {
        let original = poly(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let parts = Split::new(&original, Point2::new(0.0, 0.0), Point2::new(10.0, 5.0)).execute();
        assert_eq!(parts.len(), 2);
        assert_eq!(points_of(&parts[0]), vec![(0.0, 0.0), (10.0, 0.0), (10.0, 5.0)]);
    }

    #[test]
    fn closed_polyline_wraps_around_start() {
        let square = poly(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
        let parts = Split::new(&square, Point2::new(5.0, 0.0), Point2::new(5.0, 10.0)).execute();
        assert_eq!(parts.len(), 2);
        assert_eq!(
            points_of(&parts[0]),
            vec![(5.0, 10.0), (0.0, 10.0), (0.0, 0.0), (5.0, 0.0)]
        );
        assert_eq!(
            points_of(&parts[1]),
            vec![(5.0, 0.0), (10.0, 0.0), (10.0, 10.0), (5.0, 10.0)]
        );
    }
}

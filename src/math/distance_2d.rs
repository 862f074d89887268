use super::{Point2, TOLERANCE};

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: &Point2, b: &Point2) -> f64 {
    nalgebra::distance(a, b)
}

/// Returns the point of the segment `a → b` closest to `p`.
#[must_use]
pub fn closest_on_segment(p: &Point2, a: &Point2, b: &Point2) -> Point2 {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < TOLERANCE * TOLERANCE {
        return *a;
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    a + d * t
}

/// Returns the minimum distance from `p` to the line segment `a → b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    distance(p, &closest_on_segment(p, a, b))
}

/// Distance from `p` to the infinite line through `a` and `b`.
///
/// Falls back to the distance to `a` when the two points coincide.
#[must_use]
pub fn point_to_line_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len = d.norm();
    if len < TOLERANCE {
        return distance(p, a);
    }
    (d.x * (p.y - a.y) - d.y * (p.x - a.x)).abs() / len
}

/// Length of the open path through `points`.
///
/// Returns `None` for fewer than two points, where no path exists.
#[must_use]
pub fn path_length(points: &[Point2]) -> Option<f64> {
    if points.len() < 2 {
        return None;
    }
    Some(points.windows(2).map(|w| distance(&w[0], &w[1])).sum())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn segment_dist_perpendicular_projection() {
        // Point (1, 1) to segment (0,0)→(2,0). Closest at (1,0), dist = 1.
        let d = point_to_segment_dist(
            &Point2::new(1.0, 1.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
        );
        assert_abs_diff_eq!(d, 1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn segment_dist_endpoint_closest() {
        let d = point_to_segment_dist(
            &Point2::new(-1.0, 0.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
        );
        assert_abs_diff_eq!(d, 1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn segment_dist_degenerate() {
        // Zero-length segment: distance is point-to-point.
        let d = point_to_segment_dist(
            &Point2::new(3.0, 4.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(0.0, 0.0),
        );
        assert_abs_diff_eq!(d, 5.0, epsilon = TOLERANCE);
    }

    #[test]
    fn line_dist_ignores_segment_bounds() {
        let d = point_to_line_dist(
            &Point2::new(10.0, 2.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
        );
        assert_abs_diff_eq!(d, 2.0, epsilon = TOLERANCE);
    }

    #[test]
    fn path_length_sums_legs() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(3.0, 4.0),
        ];
        assert_abs_diff_eq!(path_length(&pts).unwrap(), 7.0, epsilon = TOLERANCE);
        assert!(path_length(&pts[..1]).is_none());
    }
}

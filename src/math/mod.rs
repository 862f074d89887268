pub mod distance_2d;
pub mod intersect_2d;
pub mod orient_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Returns `true` if both coordinates of `a` and `b` agree within [`TOLERANCE`].
///
/// This is the value equality used for points everywhere except where a
/// bit-exact comparison is explicitly required (polyline closedness).
#[must_use]
pub fn points_coincide(a: &Point2, b: &Point2) -> bool {
    (a.x - b.x).abs() <= TOLERANCE && (a.y - b.y).abs() <= TOLERANCE
}

/// Removes points that coincide with an earlier point of the list.
#[must_use]
pub fn dedup_points(points: Vec<Point2>) -> Vec<Point2> {
    let mut unique: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        if !unique.iter().any(|u| points_coincide(u, &p)) {
            unique.push(p);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coincide_within_tolerance() {
        let a = Point2::new(1.0, 2.0);
        let b = Point2::new(1.0 + TOLERANCE * 0.5, 2.0);
        assert!(points_coincide(&a, &b));
        assert!(!points_coincide(&a, &Point2::new(1.0 + 1e-6, 2.0)));
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1e-12),
        ];
        let unique = dedup_points(pts);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0], Point2::new(0.0, 0.0));
    }
}

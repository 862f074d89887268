use super::{Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.x * d2.y - d1.y * d2.x;
    if cross.abs() < TOLERANCE {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    let u = (dx * d1.y - dy * d1.x) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
/// Parallel and collinear segments report no intersection.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;

    let (t, u) = line_line_intersect_2d(a0, &da, b0, &db)?;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        Some((point_at(a0, &da, t_clamped), t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Linear interpolation: `origin + dir * t`.
#[must_use]
pub fn point_at(origin: &Point2, dir: &Vector2, t: f64) -> Point2 {
    origin + dir * t
}

/// Intersection of the infinite line through `p0` and `p1` with a circle.
///
/// Returns `(point, t)` pairs where `t` is the parameter along `p0 → p1`
/// (`0` at `p0`, `1` at `p1`). A tangent line yields a single point.
#[must_use]
pub fn line_circle_intersect_2d(
    p0: &Point2,
    p1: &Point2,
    center: &Point2,
    radius: f64,
) -> Vec<(Point2, f64)> {
    let mut results = Vec::new();
    if radius < TOLERANCE {
        return results;
    }

    let d = p1 - p0;
    let a = d.norm_squared();
    if a < TOLERANCE * TOLERANCE {
        return results;
    }

    // Substitute parametric line into circle equation:
    // |p0 + t*d - c|² = r²
    let f = p0 - center;
    let b = 2.0 * f.dot(&d);
    let c = f.norm_squared() - radius * radius;
    let discriminant = b * b - 4.0 * a * c;

    if discriminant < -TOLERANCE {
        return results;
    }
    let disc_sqrt = discriminant.max(0.0).sqrt();

    if disc_sqrt < TOLERANCE * 100.0 {
        // Tangent case: single root.
        let t = -b / (2.0 * a);
        results.push((point_at(p0, &d, t), t));
    } else {
        for t in [(-b - disc_sqrt) / (2.0 * a), (-b + disc_sqrt) / (2.0 * a)] {
            results.push((point_at(p0, &d, t), t));
        }
    }

    results
}

/// Intersection points of two circles in 2D.
///
/// Concentric circles (including identical ones) report no points.
#[must_use]
pub fn circle_circle_intersect_2d(c1: &Point2, r1: f64, c2: &Point2, r2: f64) -> Vec<Point2> {
    let mut results = Vec::new();
    if r1 < TOLERANCE || r2 < TOLERANCE {
        return results;
    }

    let delta = c2 - c1;
    let dist_sq = delta.norm_squared();
    let dist = dist_sq.sqrt();

    if dist < TOLERANCE {
        return results;
    }

    // Check if circles intersect.
    let sum = r1 + r2;
    let diff = (r1 - r2).abs();
    if dist > sum + TOLERANCE || dist < diff - TOLERANCE {
        return results;
    }

    // Distance from c1 along the line c1→c2 to the radical line.
    let a = (r1 * r1 - r2 * r2 + dist_sq) / (2.0 * dist);
    let h_sq = r1 * r1 - a * a;
    if h_sq < -TOLERANCE {
        return results;
    }
    let h = h_sq.max(0.0).sqrt();

    let axis = delta / dist;
    let foot = c1 + axis * a;
    let perp = Vector2::new(-axis.y, axis.x);

    if h < TOLERANCE {
        results.push(foot);
    } else {
        results.push(foot + perp * h);
        results.push(foot - perp * h);
    }

    results
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn line_line_perpendicular() {
        let p1 = Point2::new(0.0, 0.0);
        let d1 = Vector2::new(1.0, 0.0);
        let p2 = Point2::new(0.5, -1.0);
        let d2 = Vector2::new(0.0, 1.0);
        let (t, u) = line_line_intersect_2d(&p1, &d1, &p2, &d2).unwrap();
        assert!((t - 0.5).abs() < TOLERANCE);
        assert!((u - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn line_line_parallel_returns_none() {
        let p1 = Point2::new(0.0, 0.0);
        let d1 = Vector2::new(1.0, 0.0);
        let p2 = Point2::new(0.0, 1.0);
        assert!(line_line_intersect_2d(&p1, &d1, &p2, &d1).is_none());
    }

    #[test]
    fn segment_segment_crossing() {
        let (pt, t, u) = segment_segment_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 2.0),
            &Point2::new(0.0, 2.0),
            &Point2::new(2.0, 0.0),
        )
        .unwrap();
        assert!((pt.x - 1.0).abs() < TOLERANCE);
        assert!((pt.y - 1.0).abs() < TOLERANCE);
        assert!((t - 0.5).abs() < TOLERANCE);
        assert!((u - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn segment_segment_touching_endpoint() {
        let hit = segment_segment_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(1.0, 5.0),
        );
        let (pt, t, u) = hit.unwrap();
        assert!((pt.x - 1.0).abs() < TOLERANCE);
        assert!((t - 1.0).abs() < TOLERANCE);
        assert!(u.abs() < TOLERANCE);
    }

    #[test]
    fn segment_segment_no_crossing() {
        assert!(segment_segment_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(0.0, 1.0),
            &Point2::new(1.0, 1.0),
        )
        .is_none());
    }

    #[test]
    fn line_circle_two_crossings() {
        let hits = line_circle_intersect_2d(
            &Point2::new(-2.0, 0.0),
            &Point2::new(2.0, 0.0),
            &Point2::origin(),
            1.0,
        );
        assert_eq!(hits.len(), 2, "hits={hits:?}");
        assert!((hits[0].0.x + 1.0).abs() < 1e-9);
        assert!((hits[0].1 - 0.25).abs() < 1e-9);
        assert!((hits[1].0.x - 1.0).abs() < 1e-9);
        assert!((hits[1].1 - 0.75).abs() < 1e-9);
    }

    #[test]
    fn line_circle_tangent() {
        let hits = line_circle_intersect_2d(
            &Point2::new(-1.0, 1.0),
            &Point2::new(1.0, 1.0),
            &Point2::origin(),
            1.0,
        );
        assert_eq!(hits.len(), 1, "hits={hits:?}");
        assert!(hits[0].0.x.abs() < 1e-6);
        assert!((hits[0].0.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn line_circle_miss() {
        let hits = line_circle_intersect_2d(
            &Point2::new(-1.0, 3.0),
            &Point2::new(1.0, 3.0),
            &Point2::origin(),
            1.0,
        );
        assert!(hits.is_empty());
    }

    #[test]
    fn circle_circle_two_crossings() {
        let hits = circle_circle_intersect_2d(&Point2::origin(), 1.0, &Point2::new(1.0, 0.0), 1.0);
        assert_eq!(hits.len(), 2, "hits={hits:?}");
        let sqrt3_2 = 3.0_f64.sqrt() / 2.0;
        let (mut y0, mut y1) = (hits[0].y, hits[1].y);
        if y0 > y1 {
            std::mem::swap(&mut y0, &mut y1);
        }
        assert!((y0 + sqrt3_2).abs() < 1e-9, "y0={y0}");
        assert!((y1 - sqrt3_2).abs() < 1e-9, "y1={y1}");
    }

    #[test]
    fn circle_circle_tangent() {
        let hits = circle_circle_intersect_2d(&Point2::origin(), 1.0, &Point2::new(2.0, 0.0), 1.0);
        assert_eq!(hits.len(), 1, "hits={hits:?}");
        assert!((hits[0].x - 1.0).abs() < 1e-9);
        assert!(hits[0].y.abs() < 1e-9);
    }

    #[test]
    fn circle_circle_apart_or_concentric() {
        let origin = Point2::origin();
        assert!(circle_circle_intersect_2d(&origin, 1.0, &Point2::new(5.0, 0.0), 1.0).is_empty());
        assert!(circle_circle_intersect_2d(&origin, 1.0, &origin, 2.0).is_empty());
    }
}

//! Orientation, angle and circle primitives in the XY plane.
//!
//! Angles are polar angles in `[0, 2π)`, measured counter-clockwise from the
//! positive X axis.
use std::f64::consts::TAU;

use super::{Point2, Vector2, TOLERANCE};
use crate::error::{GeometryError, Result};

/// Signed area of the parallelogram spanned by `b - a` and `c - a`.
///
/// Positive when `a → b → c` turns left (counter-clockwise), negative when it
/// turns right, and zero (within tolerance) when the points are collinear.
#[must_use]
pub fn determinant(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Returns `true` if `|determinant(a, b, c)| <= TOLERANCE`.
#[must_use]
pub fn is_collinear(a: &Point2, b: &Point2, c: &Point2) -> bool {
    determinant(a, b, c).abs() <= TOLERANCE
}

/// Center of the circle through three points.
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` if the points are collinear.
pub fn circumcenter(a: &Point2, b: &Point2, c: &Point2) -> Result<Point2> {
    if is_collinear(a, b, c) {
        return Err(GeometryError::Degenerate(format!(
            "no circumcenter for collinear points ({}, {}), ({}, {}), ({}, {})",
            a.x, a.y, b.x, b.y, c.x, c.y
        ))
        .into());
    }

    // Solve relative to `a` to keep the squared terms small.
    let ab = b - a;
    let ac = c - a;
    let d = 2.0 * (ab.x * ac.y - ab.y * ac.x);
    let ab_sq = ab.norm_squared();
    let ac_sq = ac.norm_squared();
    let ux = (ac.y * ab_sq - ab.y * ac_sq) / d;
    let uy = (ab.x * ac_sq - ac.x * ab_sq) / d;

    Ok(Point2::new(a.x + ux, a.y + uy))
}

/// Polar angle of `point` around `center`, in `[0, 2π)`.
#[must_use]
pub fn polar_angle(center: &Point2, point: &Point2) -> f64 {
    let angle = (point.y - center.y).atan2(point.x - center.x);
    let angle = if angle < 0.0 { angle + TAU } else { angle };
    if angle >= TAU {
        0.0
    } else {
        angle
    }
}

/// Counter-clockwise sweep from `from` to `to` around `center`, in `[0, 2π)`.
#[must_use]
pub fn relative_angle(center: &Point2, from: &Point2, to: &Point2) -> f64 {
    let sweep = polar_angle(center, to) - polar_angle(center, from);
    if sweep < 0.0 {
        sweep + TAU
    } else {
        sweep
    }
}

/// Rotates `point` counter-clockwise around `center` by `angle` radians.
#[must_use]
pub fn rotate_about(point: &Point2, center: &Point2, angle: f64) -> Point2 {
    let (sin, cos) = angle.sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point2::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}

/// Reflects `point` across the infinite line through `a` and `b`.
///
/// # Errors
///
/// Returns `GeometryError::ZeroVector` if `a` and `b` coincide.
pub fn reflect_across(point: &Point2, a: &Point2, b: &Point2) -> Result<Point2> {
    let axis = normalize(&(b - a))?;
    let foot = a + axis * (point - a).dot(&axis);
    Ok(Point2::from(foot.coords * 2.0 - point.coords))
}

/// Returns the unit vector pointing along `v`.
///
/// # Errors
///
/// Returns `GeometryError::ZeroVector` if `v` is shorter than the tolerance.
pub fn normalize(v: &Vector2) -> Result<Vector2> {
    let len = v.norm();
    if len < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(v / len)
}

/// Rotates `v` by 90° counter-clockwise (the left normal for a direction).
#[must_use]
pub fn orthogonal(v: &Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

/// Midpoint of `a` and `b`.
#[must_use]
pub fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    nalgebra::center(a, b)
}

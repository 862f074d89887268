use crate::context::LayerId;
use crate::error::{OperationError, Result};
use crate::math::distance_2d::{distance, point_to_line_dist};
use crate::math::intersect_2d::{circle_circle_intersect_2d, line_circle_intersect_2d};
use crate::math::orient_2d::{
    circumcenter, determinant, polar_angle, reflect_across, relative_angle, rotate_about,
};
use crate::math::{points_coincide, Point2, Vector2, TOLERANCE};

use super::reference::{MarkerKind, PointRef, ReferencePoint};
use super::{Aabb, Segment, Shape};

/// A circular arc traversed counter-clockwise from `initial` to `ending`.
///
/// `intermediate` is always the angular midpoint between the endpoints and is
/// recomputed whenever the arc is rebuilt. The radius is derived from the
/// center and the initial point.
#[derive(Debug, Clone)]
pub struct Arc {
    initial: Point2,
    ending: Point2,
    intermediate: Point2,
    center: Point2,
    layer: Option<LayerId>,
}

impl Arc {
    /// Creates the arc through three boundary points, in either traversal order.
    ///
    /// The endpoints are swapped when `initial → intermediate → ending` runs
    /// clockwise, so the stored arc is always counter-clockwise.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the points are collinear.
    pub fn through_points(initial: Point2, intermediate: Point2, ending: Point2) -> Result<Self> {
        let center = circumcenter(&initial, &intermediate, &ending)?;

        let a_init = polar_angle(&center, &initial);
        let a_mid = polar_angle(&center, &intermediate);
        let a_end = polar_angle(&center, &ending);
        let clockwise = (a_end > a_init && (a_mid < a_init || a_mid > a_end))
            || (a_init > a_end && a_end < a_mid && a_mid < a_init);

        let (initial, ending) = if clockwise {
            (ending, initial)
        } else {
            (initial, ending)
        };
        Ok(Self::from_parts(initial, ending, center))
    }

    /// Creates an arc from its endpoints and center.
    ///
    /// A clockwise arc (`counterclockwise == false`) is stored with its
    /// endpoints swapped.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidArgument` if any two of the points coincide.
    pub fn from_center(
        initial: Point2,
        ending: Point2,
        center: Point2,
        counterclockwise: bool,
    ) -> Result<Self> {
        reject_coincident(&initial, &ending, &center)?;
        let (initial, ending) = if counterclockwise {
            (initial, ending)
        } else {
            (ending, initial)
        };
        Ok(Self::from_parts(initial, ending, center))
    }

    /// Creates an arc from its endpoints and center, picking the side that
    /// sweeps through `direction`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidArgument` if any two of the defining
    /// points coincide, or if the endpoints are collinear with the center but
    /// not equidistant from it.
    pub fn with_direction(
        initial: Point2,
        ending: Point2,
        center: Point2,
        direction: Point2,
    ) -> Result<Self> {
        reject_coincident(&initial, &ending, &center)?;
        if determinant(&initial, &center, &ending).abs() <= TOLERANCE {
            let to_initial = distance(&initial, &center);
            let to_ending = distance(&ending, &center);
            if (to_initial - to_ending).abs() > TOLERANCE {
                return Err(OperationError::InvalidArgument(format!(
                    "collinear endpoints at different radii {to_initial} and {to_ending}"
                ))
                .into());
            }
        }

        let arc_angle = relative_angle(&center, &initial, &ending);
        let dir_angle = relative_angle(&center, &initial, &direction);
        let (initial, ending) = if dir_angle > arc_angle {
            (ending, initial)
        } else {
            (initial, ending)
        };
        Ok(Self::from_parts(initial, ending, center))
    }

    fn from_parts(initial: Point2, ending: Point2, center: Point2) -> Self {
        Self {
            initial,
            ending,
            intermediate: angular_midpoint(&initial, &ending, &center),
            center,
            layer: None,
        }
    }

    /// Returns this arc tagged with `layer`.
    #[must_use]
    pub fn with_layer(mut self, layer: Option<LayerId>) -> Self {
        self.layer = layer;
        self
    }

    #[must_use]
    pub fn initial(&self) -> &Point2 {
        &self.initial
    }

    #[must_use]
    pub fn ending(&self) -> &Point2 {
        &self.ending
    }

    #[must_use]
    pub fn intermediate(&self) -> &Point2 {
        &self.intermediate
    }

    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        distance(&self.center, &self.initial)
    }

    /// Counter-clockwise sweep from `initial` to `ending`, in `[0, 2π)`.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        relative_angle(&self.center, &self.initial, &self.ending)
    }

    /// Returns `true` if every defining point of `other` lies on this arc.
    #[must_use]
    pub fn contains_arc(&self, other: &Arc) -> bool {
        self.contains(&other.initial)
            && self.contains(&other.intermediate)
            && self.contains(&other.ending)
    }

    /// Points farther from the center than the radius are on the positive
    /// (outer) side.
    #[must_use]
    pub fn is_outside(&self, point: &Point2) -> bool {
        distance(&self.center, point) > self.radius()
    }

    /// Intersection points with a bounded segment.
    #[must_use]
    pub fn intersection_with_segment(&self, segment: &Segment) -> Vec<Point2> {
        line_circle_intersect_2d(segment.start(), segment.end(), &self.center, self.radius())
            .into_iter()
            .map(|(p, _)| p)
            .filter(|p| segment.contains(p) && self.contains(p))
            .collect()
    }

    /// Intersection points with another arc. Concentric arcs report none.
    #[must_use]
    pub fn intersection_with_arc(&self, other: &Arc) -> Vec<Point2> {
        circle_circle_intersect_2d(&self.center, self.radius(), &other.center, other.radius())
            .into_iter()
            .filter(|p| self.contains(p) && other.contains(p))
            .collect()
    }

    fn point_mut(&mut self, target: PointRef) -> Option<&mut Point2> {
        match target {
            PointRef::Start => Some(&mut self.initial),
            PointRef::End => Some(&mut self.ending),
            PointRef::Intermediate => Some(&mut self.intermediate),
            PointRef::Center => Some(&mut self.center),
            PointRef::Vertex(_) => None,
        }
    }

    fn all_points() -> Vec<PointRef> {
        vec![
            PointRef::Start,
            PointRef::End,
            PointRef::Intermediate,
            PointRef::Center,
        ]
    }
}

fn reject_coincident(initial: &Point2, ending: &Point2, center: &Point2) -> Result<()> {
    if points_coincide(initial, ending)
        || points_coincide(initial, center)
        || points_coincide(ending, center)
    {
        return Err(OperationError::InvalidArgument(
            "arc endpoints and center must be distinct".into(),
        )
        .into());
    }
    Ok(())
}

/// Rotates `initial` halfway along the counter-clockwise sweep to `ending`.
fn angular_midpoint(initial: &Point2, ending: &Point2, center: &Point2) -> Point2 {
    let half = relative_angle(center, initial, ending) / 2.0;
    rotate_about(initial, center, half)
}

/// Same center, same endpoint set in any order, and intermediates not on
/// opposite sides of the chord. The layer does not take part.
impl PartialEq for Arc {
    fn eq(&self, other: &Self) -> bool {
        if !points_coincide(&self.center, &other.center) {
            return false;
        }
        let matches_end =
            |p: &Point2| points_coincide(p, &other.initial) || points_coincide(p, &other.ending);
        if !matches_end(&self.initial) || !matches_end(&self.ending) {
            return false;
        }
        let own = determinant(&self.initial, &self.ending, &self.intermediate);
        let theirs = determinant(&self.initial, &self.ending, &other.intermediate);
        own * theirs >= 0.0
    }
}

impl Shape for Arc {
    /// Chord box extended to each axis extreme of the circle that lies on
    /// the arc.
    fn boundary(&self) -> Aabb {
        let mut aabb = Aabb::new(self.initial, self.ending);
        let r = self.radius();
        let c = self.center;
        for extreme in [
            Point2::new(c.x + r, c.y),
            Point2::new(c.x - r, c.y),
            Point2::new(c.x, c.y + r),
            Point2::new(c.x, c.y - r),
        ] {
            if self.contains(&extreme) {
                aabb.include(&extreme);
            }
        }
        aabb
    }

    fn reference_points(&self, area: &Aabb) -> Vec<ReferencePoint> {
        [
            ReferencePoint::new(MarkerKind::Square, self.initial, vec![PointRef::Start]),
            ReferencePoint::new(MarkerKind::Square, self.ending, vec![PointRef::End]),
            ReferencePoint::new(MarkerKind::Circle, self.center, Self::all_points()),
            ReferencePoint::new(
                MarkerKind::Triangle,
                self.intermediate,
                vec![PointRef::Intermediate],
            ),
        ]
        .into_iter()
        .filter(|r| area.contains(&r.position))
        .collect()
    }

    /// On the circle (within tolerance) and on the same side of the chord as
    /// the intermediate point.
    fn contains(&self, point: &Point2) -> bool {
        if (distance(point, &self.center) - self.radius()).abs() > TOLERANCE {
            return false;
        }
        if point_to_line_dist(point, &self.initial, &self.ending) <= TOLERANCE {
            return true;
        }
        let own = determinant(&self.initial, &self.ending, &self.intermediate);
        let side = determinant(&self.initial, &self.ending, point);
        own * side >= 0.0
    }

    /// An endpoint inside the area, or a crossing with one of its sides. An
    /// area lying wholly inside the circle, clear of the arc, is not hit.
    fn intersects(&self, area: &Aabb) -> bool {
        if area.contains(&self.initial) || area.contains(&self.ending) {
            return true;
        }
        area.edges()
            .iter()
            .filter_map(|(a, b)| Segment::new(*a, *b).ok())
            .any(|side| !self.intersection_with_segment(&side).is_empty())
    }

    /// Radial projection onto the circle, kept only if it lands on the arc.
    fn projection_of(&self, point: &Point2) -> Option<Point2> {
        let offset = point - self.center;
        let len = offset.norm();
        if len < TOLERANCE {
            return None;
        }
        let projection = self.center + offset * (self.radius() / len);
        self.contains(&projection).then_some(projection)
    }

    fn move_points(&mut self, targets: &[PointRef], vector: &Vector2) -> bool {
        let mut moved = self.clone();
        let mut seen: Vec<PointRef> = Vec::with_capacity(targets.len());
        for target in targets {
            if seen.contains(target) {
                continue;
            }
            match moved.point_mut(*target) {
                Some(p) => *p += vector,
                None => return false,
            }
            seen.push(*target);
        }

        match Self::through_points(moved.initial, moved.intermediate, moved.ending) {
            Ok(rebuilt) => {
                self.initial = rebuilt.initial;
                self.ending = rebuilt.ending;
                self.intermediate = rebuilt.intermediate;
                self.center = rebuilt.center;
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "arc move reverted");
                false
            }
        }
    }

    fn translate(&mut self, vector: &Vector2) {
        self.initial += vector;
        self.ending += vector;
        self.intermediate += vector;
        self.center += vector;
    }

    /// Reflects every point, then swaps the endpoints so the stored traversal
    /// stays counter-clockwise.
    fn mirror(&mut self, a: &Point2, b: &Point2) -> Result<()> {
        let initial = reflect_across(&self.initial, a, b)?;
        let ending = reflect_across(&self.ending, a, b)?;
        let intermediate = reflect_across(&self.intermediate, a, b)?;
        let center = reflect_across(&self.center, a, b)?;
        self.initial = ending;
        self.ending = initial;
        self.intermediate = intermediate;
        self.center = center;
        Ok(())
    }

    fn layer(&self) -> Option<LayerId> {
        self.layer
    }

    fn set_layer(&mut self, layer: Option<LayerId>) {
        self.layer = layer;
    }
}

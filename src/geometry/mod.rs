mod aabb;
pub mod arc;
pub mod element;
pub mod polyline;
pub mod reference;
pub mod segment;

pub use aabb::Aabb;
pub use arc::Arc;
pub use element::Element;
pub use polyline::Polyline;
pub use reference::{MarkerKind, PointRef, ReferencePoint};
pub use segment::Segment;

use crate::context::LayerId;
use crate::error::Result;
use crate::math::{Point2, Vector2};

/// Capability surface shared by every element kind.
pub trait Shape {
    /// Axis-aligned bounding rectangle.
    fn boundary(&self) -> Aabb;

    /// Grip markers whose position lies inside `area`.
    fn reference_points(&self, area: &Aabb) -> Vec<ReferencePoint>;

    /// Returns `true` if `point` lies on the element within tolerance.
    fn contains(&self, point: &Point2) -> bool;

    /// Returns `true` if some part of the element lies inside `area`, border
    /// included. Used for window selection.
    fn intersects(&self, area: &Aabb) -> bool;

    /// Closest point of the element to `point`, or `None` where the
    /// projection is undefined.
    fn projection_of(&self, point: &Point2) -> Option<Point2>;

    /// Moves the addressed points by `vector`.
    ///
    /// Returns `false`, leaving the element untouched, when a target does not
    /// address a point of this element or when the move would break the
    /// element's invariants.
    fn move_points(&mut self, targets: &[PointRef], vector: &Vector2) -> bool;

    /// Moves the whole element by `vector`.
    fn translate(&mut self, vector: &Vector2);

    /// Reflects the element across the line through `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if `a` and `b` coincide.
    fn mirror(&mut self, a: &Point2, b: &Point2) -> Result<()>;

    fn layer(&self) -> Option<LayerId>;

    fn set_layer(&mut self, layer: Option<LayerId>);
}

use crate::error::{OperationError, Result};
use crate::geometry::Shape;
use crate::math::{points_coincide, Point2};

/// Reflects an element across the line through two points.
pub struct Mirror {
    a: Point2,
    b: Point2,
}

impl Mirror {
    /// Creates a new `Mirror` operation.
    #[must_use]
    pub fn new(a: Point2, b: Point2) -> Self {
        Self { a, b }
    }

    /// Executes the mirror in place.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidArgument` if the two points coincide.
    pub fn execute<S: Shape + ?Sized>(&self, shape: &mut S) -> Result<()> {
        if points_coincide(&self.a, &self.b) {
            return Err(OperationError::InvalidArgument(
                "mirror axis needs two distinct points".to_owned(),
            )
            .into());
        }
        shape.mirror(&self.a, &self.b)
    }
}

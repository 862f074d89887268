use crate::geometry::{PointRef, Shape};
use crate::math::Vector2;

/// Moves an element, or only some of its points, by a displacement vector.
pub struct Translate {
    displacement: Vector2,
    points: Option<Vec<PointRef>>,
}

impl Translate {
    /// Creates a new `Translate` operation moving the whole element.
    #[must_use]
    pub fn new(displacement: Vector2) -> Self {
        Self {
            displacement,
            points: None,
        }
    }

    /// Restricts the move to the addressed points.
    #[must_use]
    pub fn with_points(mut self, points: Vec<PointRef>) -> Self {
        self.points = Some(points);
        self
    }

    /// Executes the translation in place.
    ///
    /// Returns `false`, leaving the shape as it was, when a partial move is
    /// rejected by the shape.
    pub fn execute<S: Shape + ?Sized>(&self, shape: &mut S) -> bool {
        match &self.points {
            None => {
                shape.translate(&self.displacement);
                true
            }
            Some(points) => {
                let moved = shape.move_points(points, &self.displacement);
                if !moved {
                    tracing::debug!(?points, "partial move rejected");
                }
                moved
            }
        }
    }
}

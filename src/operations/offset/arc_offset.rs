use crate::error::{OperationError, Result};
use crate::geometry::{Arc, Shape};
use crate::math::{Point2, TOLERANCE};

use super::Offsetable;

impl Offsetable for Arc {
    /// Concentric copy with radius `radius + distance`.
    fn clone_with_distance(&self, distance: f64) -> Result<Self> {
        let radius = self.radius();
        let inward = distance.abs();
        if distance < 0.0 && ((radius - inward).abs() <= TOLERANCE || inward > radius) {
            tracing::debug!(radius, distance, "arc offset collapses");
            return Err(OperationError::InvalidParameter {
                parameter: "distance",
                value: distance,
                reason: format!("inward offset must be smaller than the radius {radius}"),
            }
            .into());
        }

        let center = *self.center();
        let scale = (radius + distance) / radius;
        let scaled = |p: &Point2| center + (p - center) * scale;
        Ok(Arc::through_points(
            scaled(self.initial()),
            scaled(self.intermediate()),
            scaled(self.ending()),
        )?
        .with_layer(self.layer()))
    }

    fn is_positive_direction(&self, point: &Point2) -> bool {
        self.is_outside(point)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::DraftError;

    fn semicircle(radius: f64) -> Arc {
        Arc::from_center(
            Point2::new(radius, 0.0),
            Point2::new(-radius, 0.0),
            Point2::origin(),
            true,
        )
        .unwrap()
    }

    #[test]
    fn offset_changes_radius_only() {
        let arc = semicircle(2.0);
        for d in [1.5, -1.5, 0.0] {
            let moved = arc.clone_with_distance(d).unwrap();
            assert_abs_diff_eq!(moved.radius(), 2.0 + d, epsilon = 1e-9);
            assert_abs_diff_eq!(moved.center().x, 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(moved.center().y, 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(moved.sweep(), arc.sweep(), epsilon = 1e-9);
        }
    }

    #[test]
    fn inward_offset_past_center_is_rejected() {
        let arc = semicircle(2.0);
        for d in [-2.0, -3.0] {
            let err = arc.clone_with_distance(d).unwrap_err();
            assert!(matches!(
                err,
                DraftError::Operation(OperationError::InvalidParameter {
                    parameter: "distance",
                    ..
                })
            ));
        }
    }

    #[test]
    fn outside_is_positive() {
        let arc = semicircle(2.0);
        assert!(arc.is_positive_direction(&Point2::new(0.0, 3.0)));
        assert!(arc.is_positive_direction(&Point2::new(0.0, -3.0)));
        assert!(!arc.is_positive_direction(&Point2::new(0.0, 1.0)));
    }
}

use crate::math::Point2;

/// An axis-aligned rectangle, used for boundaries and view areas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point2,
    /// Maximum corner.
    pub max: Point2,
}

impl Aabb {
    /// Creates a rectangle from two opposite corners in any order.
    #[must_use]
    pub fn new(a: Point2, b: Point2) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Grows the rectangle to cover `point`.
    pub fn include(&mut self, point: &Point2) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// Returns `true` if `point` lies inside or on the border.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// The four sides as `(from, to)` corner pairs, counter-clockwise from
    /// the bottom edge.
    #[must_use]
    pub fn edges(&self) -> [(Point2, Point2); 4] {
        let lower_right = Point2::new(self.max.x, self.min.y);
        let upper_left = Point2::new(self.min.x, self.max.y);
        [
            (self.min, lower_right),
            (lower_right, self.max),
            (self.max, upper_left),
            (upper_left, self.min),
        ]
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

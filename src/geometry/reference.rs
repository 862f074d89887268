use crate::math::Point2;

/// Back-reference to one stored point of an element.
///
/// Markers and partial moves address points through these instead of
/// holding copies, so moving a marker always moves the element's own data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointRef {
    /// First endpoint of a segment or arc.
    Start,
    /// Second endpoint of a segment or arc.
    End,
    /// Angular midpoint of an arc.
    Intermediate,
    /// Center of an arc.
    Center,
    /// Vertex of a polyline by index.
    Vertex(usize),
}

/// Marker glyph drawn for a reference point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// Endpoint.
    Square,
    /// Center.
    Circle,
    /// Midpoint.
    Triangle,
    /// Interior polyline vertex.
    Cross,
}

/// A snap/grip marker exposed by an element.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferencePoint {
    pub kind: MarkerKind,
    pub position: Point2,
    /// Points of the owning element moved when this marker is dragged.
    pub targets: Vec<PointRef>,
}

impl ReferencePoint {
    #[must_use]
    pub fn new(kind: MarkerKind, position: Point2, targets: Vec<PointRef>) -> Self {
        Self {
            kind,
            position,
            targets,
        }
    }
}

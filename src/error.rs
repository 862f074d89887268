use thiserror::Error;

/// Top-level error type for the drafting kernel.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Context(#[from] ContextError),
}

/// Errors raised by the geometric kernel.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// Collinear or coincident points where a proper configuration is required.
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised while building or editing elements.
#[derive(Debug, Error)]
pub enum OperationError {
    /// Structurally impossible configuration.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A numeric parameter outside the range valid for this geometry.
    #[error("invalid parameter {parameter} = {value}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: String,
    },
}

/// Errors raised by [`crate::context::EditContext`] lookups.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("element not found")]
    ElementNotFound,

    #[error("layer not found")]
    LayerNotFound,

    #[error("{operation} is not supported for {kind} elements")]
    UnsupportedElement {
        operation: &'static str,
        kind: &'static str,
    },
}

/// Convenience type alias for results using [`DraftError`].
pub type Result<T> = std::result::Result<T, DraftError>;

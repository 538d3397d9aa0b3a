use thiserror::Error;

/// Top-level error type for corridor construction and queries.
#[derive(Debug, Error)]
pub enum CorridorError {
    /// Empty routes, non-finite coordinates, malformed point representations
    /// and out-of-range parameters.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("unsupported {kind} mode '{mode}'")]
    UnsupportedMode { kind: &'static str, mode: String },

    /// Topologically unusable geometry. Smoothing recovers from this locally,
    /// so it only reaches callers from operations that need a single polygon.
    #[error("degenerate geometry: {0}")]
    GeometryDegenerate(String),
}

impl CorridorError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Convenience type alias for results using [`CorridorError`].
pub type Result<T> = std::result::Result<T, CorridorError>;

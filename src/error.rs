use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NnError>;

/// Everything that can go wrong inside the engine.
///
/// Every variant is a precondition violation on the caller's side; nothing is
/// retried and no operation leaves a half-applied update behind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NnError {
    /// Two matrix operands have shapes the requested algebra cannot combine.
    #[error("dimension mismatch in {op}: {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// An input or target slice does not match the declared layer size.
    #[error("{what} has length {actual}, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A matrix or layer was requested with a zero-sized dimension.
    #[error("invalid dimension {rows}x{cols}: both must be positive")]
    InvalidDimension { rows: usize, cols: usize },

    /// The sampling loop was handed no samples to draw from.
    #[error("training set is empty")]
    EmptyTrainingSet,

    /// A run configuration could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),
}

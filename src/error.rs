//! Errors surfaced by the spanner and clustering pipeline.

/// A failure of the pipeline.
///
/// All input validation happens before any structure is built; once
/// construction begins, the only possible failure is `Internal`, which
/// indicates a bug rather than bad input. Partial outputs are never
/// exposed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpannerError {
    /// The input was not a sequence of `dim`-length rows of reals.
    #[error("invalid input shape: {0}")]
    InvalidShape(String),

    /// The stretch factor does not define a positive separation.
    #[error("stretch factor must be finite and greater than 1, got {0}")]
    InvalidStretch(f64),

    /// The input had no points or no dimensions.
    #[error("input must have at least one point and one dimension")]
    EmptyInput,

    /// A coordinate was NaN or infinite.
    #[error("coordinate {dim} of point {index} is not finite")]
    NonFinite {
        /// The index of the offending point.
        index: usize,
        /// The dimension of the offending coordinate.
        dim: usize,
    },

    /// A structural invariant was violated. This is a bug and is not
    /// recoverable.
    #[error("internal invariant violated: {0}")]
    Internal(String),
}

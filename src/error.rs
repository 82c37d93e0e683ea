//! Error kinds for the basis engine.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TateError>;

/// Errors surfaced by basis computations and the ideal operations built on
/// top of them.
///
/// Arithmetic contract violations (dividing by a zero series, taking a
/// non-divisible term quotient) are bugs in the engine itself and panic
/// instead of returning a variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TateError {
    /// An algorithm name was requested that this crate does not provide.
    #[error("Groebner algorithm `{name}` is not implemented")]
    NotImplementedAlgorithm {
        /// The requested name.
        name: String,
    },

    /// The requested precision is not a positive integer.
    #[error("precision must be a positive integer, got {requested}")]
    InvalidPrecision {
        /// The offending value.
        requested: i64,
    },

    /// Every significant digit was lost during a reduction, so no non-zero
    /// result can be certified at the working precision.
    #[error("all significant digits were lost during reduction")]
    PrecisionExhausted,

    /// The computation was aborted through its cancellation token.
    #[error("computation cancelled")]
    Cancelled,
}

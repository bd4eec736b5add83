//! Error types for block coding operations

use thiserror::Error;

/// Errors that can occur while preparing, coding or slicing blocks
///
/// An engine that declines to produce output is not an error: the
/// orchestrators report that as an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Caller-side precondition violated (empty block list, missing packet size, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The coding engine cannot operate on this matrix shape
    #[error("Unsupported matrix: k={k}, m={m}, w={w}, bitmatrix={bitmatrix}: {reason}")]
    UnsupportedMatrix {
        k: usize,
        m: usize,
        w: usize,
        bitmatrix: bool,
        reason: &'static str,
    },

    /// The coding engine returned a buffer of the wrong length.
    ///
    /// This is a defect in the engine, not something a caller can fix by
    /// retrying with different input.
    #[error("Contract violation: expected {expected} bytes from coding engine, got {actual}")]
    ContractViolation { expected: usize, actual: usize },

    /// Engine failure that is neither a decline nor a usage error
    #[error("Coding engine failure: {0}")]
    Engine(String),
}

impl CodecError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        CodecError::InvalidArgument(msg.into())
    }
}

/// Type alias for Result with CodecError
pub type Result<T> = std::result::Result<T, CodecError>;

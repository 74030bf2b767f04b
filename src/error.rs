//! Error types for the proof-of-work kernel
//!
//! This module provides the error handling system using `thiserror`
//! for automatic error trait implementations. All kernel errors are
//! local and returned synchronously to the caller.

use thiserror::Error;

/// Main error type for the proof-of-work kernel
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid hash input (wrong length, bad hex encoding)
    #[error("Invalid hash: {0}")]
    InvalidHash(String),

    /// Invalid target format
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// Invalid matrix (cell out of 4-bit range, rank-deficient)
    #[error("Invalid matrix: {0}")]
    InvalidMatrix(String),

    /// Matrix generation retry cap exhausted
    #[error("Matrix generation failed: {0}")]
    MatrixGeneration(String),
}

/// Result type alias for the proof-of-work kernel
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid hash error
    pub fn invalid_hash(msg: impl Into<String>) -> Self {
        Self::InvalidHash(msg.into())
    }

    /// Create an invalid target error
    pub fn invalid_target(msg: impl Into<String>) -> Self {
        Self::InvalidTarget(msg.into())
    }

    /// Create an invalid matrix error
    pub fn invalid_matrix(msg: impl Into<String>) -> Self {
        Self::InvalidMatrix(msg.into())
    }

    /// Create a matrix generation error
    pub fn matrix_generation(msg: impl Into<String>) -> Self {
        Self::MatrixGeneration(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_hash("expected 32 bytes, got 31");
        assert_eq!(err.to_string(), "Invalid hash: expected 32 bytes, got 31");

        let err = Error::matrix_generation("retry cap exhausted");
        assert_eq!(
            err.to_string(),
            "Matrix generation failed: retry cap exhausted"
        );
    }

    #[test]
    fn test_error_matching() {
        let err = Error::invalid_target("bad hex");
        assert!(matches!(err, Error::InvalidTarget(_)));

        let err = Error::invalid_matrix("rank 63");
        assert!(matches!(err, Error::InvalidMatrix(_)));
    }
}

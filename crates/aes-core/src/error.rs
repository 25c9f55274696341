//! Construction errors.

use thiserror::Error;

/// Raised when key material is not exactly 16 bytes long.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("AES-128 key must be 16 bytes, got {actual}")]
pub struct KeyLengthError {
    /// Length of the rejected key.
    pub actual: usize,
}

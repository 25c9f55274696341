//! Error taxonomy for the chaining layer.

use aes_core::{KeyLengthError, BLOCK_SIZE};
use thiserror::Error;

/// Result alias used across this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors surfaced by [`Cipher`](crate::Cipher).
///
/// None of these are retried internally and no partial plaintext is returned
/// alongside them.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Key material was not 16 bytes.
    #[error(transparent)]
    KeyLength(#[from] KeyLengthError),

    /// Ciphertext is empty, or a buffer is not a multiple of the block size.
    #[error("input length {actual} is not a non-zero multiple of {}", BLOCK_SIZE)]
    InvalidLength {
        /// Length of the rejected buffer.
        actual: usize,
    },

    /// The decrypted padding is malformed.
    #[error("invalid padding (trailing byte {value:#04x})")]
    InvalidPadding {
        /// Trailing byte of the decrypted message.
        value: u8,
    },

    /// CBC decryption was requested without an initialization vector.
    #[error("CBC decryption requires the initialization vector used at encryption")]
    MissingIv,
}

//! PKCS#7 padding to the AES block size.

use aes_core::BLOCK_SIZE;

use crate::error::{Error, Result};

/// Returns `data` followed by 1..=16 bytes, each equal to the pad length.
///
/// Block-aligned input gains a full block of padding.
pub fn pad(data: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_SIZE - data.len() % BLOCK_SIZE;
    let mut padded = Vec::with_capacity(data.len() + pad_len);
    padded.extend_from_slice(data);
    padded.resize(data.len() + pad_len, pad_len as u8);
    padded
}

/// Strips padding added by [`pad`], returning the original message.
pub fn unpad(data: &[u8]) -> Result<&[u8]> {
    let value = *data.last().ok_or(Error::InvalidLength { actual: 0 })?;
    let pad_len = usize::from(value);
    if pad_len == 0 || pad_len > BLOCK_SIZE || pad_len > data.len() {
        return Err(Error::InvalidPadding { value });
    }
    let (message, tail) = data.split_at(data.len() - pad_len);
    if tail.iter().any(|&b| b != value) {
        return Err(Error::InvalidPadding { value });
    }
    Ok(message)
}

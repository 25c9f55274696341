//! Key types for AES-128.

use crate::block::Block;
use crate::error::KeyLengthError;

/// Length of an AES-128 key in bytes.
pub const KEY_SIZE: usize = 16;

/// Number of round keys produced by the AES-128 schedule.
pub const ROUND_KEY_COUNT: usize = 11;

/// AES-128 key wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aes128Key(pub [u8; KEY_SIZE]);

impl From<[u8; KEY_SIZE]> for Aes128Key {
    fn from(value: [u8; KEY_SIZE]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Aes128Key {
    type Error = KeyLengthError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; KEY_SIZE] = value.try_into().map_err(|_| KeyLengthError {
            actual: value.len(),
        })?;
        Ok(Self(bytes))
    }
}

/// Expanded round keys for AES-128.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundKeys(pub [Block; ROUND_KEY_COUNT]);

impl RoundKeys {
    /// Returns the round key at the requested index (0..=10).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        &self.0[round]
    }

    /// Iterates over the round keys in schedule order.
    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_sixteen_bytes() {
        let key = Aes128Key::try_from(&b"Thats my Kung Fu"[..]).unwrap();
        assert_eq!(&key.0, b"Thats my Kung Fu");
    }

    #[test]
    fn rejects_other_lengths() {
        for len in [0usize, 15, 17, 24, 32] {
            let bytes = vec![0u8; len];
            let err = Aes128Key::try_from(bytes.as_slice()).unwrap_err();
            assert_eq!(err, KeyLengthError { actual: len });
        }
    }
}

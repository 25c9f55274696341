//! On-disk ciphertext container.

use serde::{Deserialize, Serialize};

use crate::engine::{Cipher, Encrypted};
use crate::error::Result;
use crate::mode::{Iv, Mode};

/// Current envelope format version.
pub const ENVELOPE_VERSION: u32 = 1;

/// Ciphertext together with everything needed to decrypt it except the key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Format version tag.
    pub version: u32,
    /// Chaining mode used at encryption.
    pub mode: Mode,
    /// IV for CBC envelopes.
    pub iv: Option<Iv>,
    /// Padded ciphertext.
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Wraps the output of an encryption call.
    pub fn new(mode: Mode, encrypted: Encrypted) -> Self {
        Self {
            version: ENVELOPE_VERSION,
            mode,
            iv: encrypted.iv,
            ciphertext: encrypted.ciphertext,
        }
    }

    /// Decrypts the contained ciphertext with `cipher`.
    pub fn open(&self, cipher: &Cipher) -> Result<Vec<u8>> {
        cipher.decrypt(&self.ciphertext, self.mode, self.iv.as_ref())
    }

    /// Serializes the envelope with `bincode`.
    pub fn to_bytes(&self) -> core::result::Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Deserializes an envelope with `bincode`.
    pub fn from_bytes(bytes: &[u8]) -> core::result::Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

//! Chaining modes.

use core::fmt;

use aes_core::BLOCK_SIZE;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// CBC initialization vector.
pub type Iv = [u8; BLOCK_SIZE];

/// Rejects buffers that do not split into whole blocks.
pub(crate) fn check_aligned(data: &[u8]) -> Result<()> {
    if data.len() % BLOCK_SIZE != 0 {
        return Err(Error::InvalidLength { actual: data.len() });
    }
    Ok(())
}

/// Block chaining mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Electronic codebook: every block is encrypted on its own.
    Ecb,
    /// Cipher block chaining seeded by a random IV.
    Cbc,
}

impl Mode {
    /// Whether the mode needs an initialization vector.
    pub fn uses_iv(self) -> bool {
        matches!(self, Mode::Cbc)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Ecb => f.write_str("ECB"),
            Mode::Cbc => f.write_str("CBC"),
        }
    }
}

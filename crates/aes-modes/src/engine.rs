//! The cipher engine: one expanded key schedule plus chaining and padding.

use core::fmt;
use std::sync::Arc;

use aes_core::{expand_key, Aes128Key, Direction, RoundKeys, StageObserver, BLOCK_SIZE};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::error::{Error, Result};
use crate::mode::{Iv, Mode};
use crate::padding::{pad, unpad};
use crate::{cbc, ecb};

type SharedObserver = Arc<dyn StageObserver + Send + Sync>;

/// Output of [`Cipher::encrypt`].
///
/// In CBC mode `iv` must be stored or sent with the ciphertext: decryption
/// cannot recover it from the ciphertext alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encrypted {
    /// Concatenated ciphertext blocks.
    pub ciphertext: Vec<u8>,
    /// IV used for CBC, `None` for ECB.
    pub iv: Option<Iv>,
}

/// AES-128 cipher bound to a single key.
///
/// The round-key schedule is derived once in the constructor and never
/// changes, so a `Cipher` can be shared across threads and used for any
/// number of concurrent calls.
#[derive(Clone)]
pub struct Cipher {
    round_keys: RoundKeys,
    observer: Option<SharedObserver>,
}

impl Cipher {
    /// Builds a cipher from raw key bytes, which must be exactly 16 bytes.
    pub fn new(key: &[u8]) -> Result<Self> {
        let key = Aes128Key::try_from(key)?;
        Ok(Self::from_key(&key))
    }

    /// Builds a cipher from a typed key.
    pub fn from_key(key: &Aes128Key) -> Self {
        Self {
            round_keys: expand_key(key),
            observer: None,
        }
    }

    /// Attaches an observer that sees the state after every round stage.
    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: StageObserver + Send + Sync + 'static,
    {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Returns the expanded key schedule.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }

    /// Pads and encrypts `plaintext`. CBC draws its IV from the OS RNG.
    pub fn encrypt(&self, plaintext: &[u8], mode: Mode) -> Encrypted {
        self.encrypt_with_rng(plaintext, mode, &mut OsRng)
    }

    /// Like [`encrypt`](Self::encrypt), drawing the CBC IV from `rng`.
    pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
        &self,
        plaintext: &[u8],
        mode: Mode,
        rng: &mut R,
    ) -> Encrypted {
        let iv = mode.uses_iv().then(|| {
            let mut iv = [0u8; BLOCK_SIZE];
            rng.fill_bytes(&mut iv);
            iv
        });
        self.seal(plaintext, mode, iv)
    }

    /// CBC-encrypts `plaintext` under a caller-chosen IV.
    ///
    /// Reusing an IV under the same key leaks equality of message prefixes;
    /// prefer [`encrypt`](Self::encrypt) unless the IV is managed elsewhere.
    pub fn encrypt_with_iv(&self, plaintext: &[u8], iv: &Iv) -> Encrypted {
        self.seal(plaintext, Mode::Cbc, Some(*iv))
    }

    fn seal(&self, plaintext: &[u8], mode: Mode, iv: Option<Iv>) -> Encrypted {
        let mut data = pad(plaintext);
        log::debug!(
            "encrypting {} bytes ({} blocks) in {} mode",
            plaintext.len(),
            data.len() / BLOCK_SIZE,
            mode
        );
        if let Some(iv) = &iv {
            log::debug!("CBC initialization vector {iv:02x?}");
        }
        // Padded output is always block-aligned.
        let keys = &self.round_keys;
        let dir = Direction::Encrypt;
        match (&self.observer, iv) {
            (Some(observer), Some(iv)) => cbc::chain_encrypt(&mut data, &iv, keys, &**observer),
            (None, Some(iv)) => cbc::chain_encrypt(&mut data, &iv, keys, &()),
            (Some(observer), None) => ecb::transform(&mut data, keys, dir, &**observer),
            (None, None) => ecb::transform(&mut data, keys, dir, &()),
        }
        Encrypted {
            ciphertext: data,
            iv,
        }
    }

    /// Decrypts `ciphertext` and strips its padding.
    ///
    /// CBC requires the IV returned by the matching encryption; ECB ignores
    /// `iv`.
    pub fn decrypt(&self, ciphertext: &[u8], mode: Mode, iv: Option<&Iv>) -> Result<Vec<u8>> {
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(Error::InvalidLength {
                actual: ciphertext.len(),
            });
        }
        let iv = match mode {
            Mode::Cbc => Some(iv.ok_or(Error::MissingIv)?),
            Mode::Ecb => {
                if iv.is_some() {
                    log::debug!("ignoring IV supplied for ECB decryption");
                }
                None
            }
        };
        log::debug!(
            "decrypting {} blocks in {} mode",
            ciphertext.len() / BLOCK_SIZE,
            mode
        );

        let mut data = ciphertext.to_vec();
        match (&self.observer, iv) {
            (Some(observer), Some(iv)) => {
                cbc::decrypt_blocks(&mut data, iv, &self.round_keys, &**observer)?
            }
            (None, Some(iv)) => cbc::decrypt_blocks(&mut data, iv, &self.round_keys, &())?,
            (Some(observer), None) => {
                ecb::decrypt_blocks(&mut data, &self.round_keys, &**observer)?
            }
            (None, None) => ecb::decrypt_blocks(&mut data, &self.round_keys, &())?,
        }

        let len = unpad(&data)?.len();
        data.truncate(len);
        Ok(data)
    }
}

impl fmt::Debug for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cipher")
            .field("observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

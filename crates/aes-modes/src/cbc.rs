//! Cipher block chaining over block-aligned buffers.
//!
//! Encryption is strictly sequential: every block is XORed with the previous
//! ciphertext block (the IV for block 0) before the forward cipher.

use aes_core::{
    cipher_block, xor_in_place, Block, Direction, RoundKeys, StageObserver, BLOCK_SIZE,
};

use crate::error::Result;
use crate::mode::{check_aligned, Iv};

/// Encrypts `data` in place, chaining from `iv`.
///
/// Fails with [`Error::InvalidLength`](crate::Error::InvalidLength) and leaves
/// `data` untouched unless its length is a multiple of the block size.
pub fn encrypt_blocks<O: StageObserver + ?Sized>(
    data: &mut [u8],
    iv: &Iv,
    round_keys: &RoundKeys,
    observer: &O,
) -> Result<()> {
    check_aligned(data)?;
    chain_encrypt(data, iv, round_keys, observer);
    Ok(())
}

/// Decrypts `data` in place, chaining from `iv`. Same length rule as
/// [`encrypt_blocks`].
pub fn decrypt_blocks<O: StageObserver + ?Sized>(
    data: &mut [u8],
    iv: &Iv,
    round_keys: &RoundKeys,
    observer: &O,
) -> Result<()> {
    check_aligned(data)?;
    chain_decrypt(data, iv, round_keys, observer);
    Ok(())
}

// Both chain functions expect a block-aligned buffer.
pub(crate) fn chain_encrypt<O: StageObserver + ?Sized>(
    data: &mut [u8],
    iv: &Iv,
    round_keys: &RoundKeys,
    observer: &O,
) {
    let mut prev: Block = *iv;
    for chunk in data.chunks_exact_mut(BLOCK_SIZE) {
        let mut state: Block = [0u8; BLOCK_SIZE];
        state.copy_from_slice(chunk);
        xor_in_place(&mut state, &prev);
        cipher_block(&mut state, round_keys, Direction::Encrypt, observer);
        chunk.copy_from_slice(&state);
        prev = state;
    }
}

pub(crate) fn chain_decrypt<O: StageObserver + ?Sized>(
    data: &mut [u8],
    iv: &Iv,
    round_keys: &RoundKeys,
    observer: &O,
) {
    let mut prev: Block = *iv;
    for chunk in data.chunks_exact_mut(BLOCK_SIZE) {
        let mut state: Block = [0u8; BLOCK_SIZE];
        state.copy_from_slice(chunk);
        let original = state;
        cipher_block(&mut state, round_keys, Direction::Decrypt, observer);
        xor_in_place(&mut state, &prev);
        chunk.copy_from_slice(&state);
        prev = original;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use aes_core::{expand_key, Aes128Key};

    fn hex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    // NIST SP 800-38A, F.2.1 CBC-AES128.Encrypt.
    const KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";
    const IV: &str = "000102030405060708090a0b0c0d0e0f";
    const PLAIN: &str = "6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51";
    const CIPHER: &str = "7649abac8119b246cee98e9b12e9197d5086cb9b507219ee95db113a917678b2";

    #[test]
    fn sp800_38a_vector() {
        let key: [u8; 16] = hex(KEY).try_into().unwrap();
        let iv: Iv = hex(IV).try_into().unwrap();
        let round_keys = expand_key(&Aes128Key::from(key));

        let mut data = hex(PLAIN);
        encrypt_blocks(&mut data, &iv, &round_keys, &()).unwrap();
        assert_eq!(data, hex(CIPHER));

        decrypt_blocks(&mut data, &iv, &round_keys, &()).unwrap();
        assert_eq!(data, hex(PLAIN));
    }

    #[test]
    fn identical_blocks_diverge() {
        let round_keys = expand_key(&Aes128Key::from([7u8; 16]));
        let mut data = [0x42u8; 32];
        encrypt_blocks(&mut data, &[0u8; 16], &round_keys, &()).unwrap();
        assert_ne!(&data[..16], &data[16..]);
    }

    #[test]
    fn partial_trailing_block_is_rejected() {
        let round_keys = expand_key(&Aes128Key::from(*b"Thats my Kung Fu"));
        let iv = [0x24u8; 16];
        let mut data = *b"Two One Nine TwoSECRET";
        assert_eq!(
            encrypt_blocks(&mut data, &iv, &round_keys, &()),
            Err(Error::InvalidLength { actual: 22 })
        );
        assert_eq!(&data, b"Two One Nine TwoSECRET");
        assert_eq!(
            decrypt_blocks(&mut data, &iv, &round_keys, &()),
            Err(Error::InvalidLength { actual: 22 })
        );
        assert_eq!(&data, b"Two One Nine TwoSECRET");
    }
}

//! AES-128 block transform: key schedule, round pipeline and single-block
//! encryption/decryption, following FIPS-197.
//!
//! This crate provides:
//! - Compile-time S-box tables and GF(2^8) multiplication.
//! - The AES-128 key schedule.
//! - The forward and inverse round transformations.
//! - Single-block encryption and decryption, with an optional
//!   [`StageObserver`] that sees the state after every transformation.
//!
//! The implementation aims for clarity and testability rather than constant-time
//! guarantees; it should not be treated as side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
mod gf;
mod key;
mod observer;
mod round;
mod sbox;

pub use crate::block::{state_index, to_rows, xor_in_place, Block, BLOCK_SIZE};
pub use crate::cipher::{cipher_block, decrypt_block, encrypt_block, expand_key, ROUNDS};
pub use crate::error::KeyLengthError;
pub use crate::gf::{gf_mul, xtime};
pub use crate::key::{Aes128Key, RoundKeys, KEY_SIZE, ROUND_KEY_COUNT};
pub use crate::observer::{Direction, Stage, StageObserver};
pub use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
pub use crate::sbox::{inv_sbox, sbox};

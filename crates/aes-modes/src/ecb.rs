//! Electronic codebook mode over block-aligned buffers.
//!
//! Blocks carry no data dependency on each other; with the `parallel`
//! feature they are spread across the rayon thread pool.

use aes_core::{cipher_block, Block, Direction, RoundKeys, StageObserver, BLOCK_SIZE};

use crate::error::Result;
use crate::mode::check_aligned;

fn transform_chunk<O: StageObserver + ?Sized>(
    chunk: &mut [u8],
    round_keys: &RoundKeys,
    direction: Direction,
    observer: &O,
) {
    let mut state: Block = [0u8; BLOCK_SIZE];
    state.copy_from_slice(chunk);
    cipher_block(&mut state, round_keys, direction, observer);
    chunk.copy_from_slice(&state);
}

// Callers check alignment first.
#[cfg(not(feature = "parallel"))]
pub(crate) fn transform<O: StageObserver + Sync + ?Sized>(
    data: &mut [u8],
    round_keys: &RoundKeys,
    direction: Direction,
    observer: &O,
) {
    for chunk in data.chunks_exact_mut(BLOCK_SIZE) {
        transform_chunk(chunk, round_keys, direction, observer);
    }
}

#[cfg(feature = "parallel")]
pub(crate) fn transform<O: StageObserver + Sync + ?Sized>(
    data: &mut [u8],
    round_keys: &RoundKeys,
    direction: Direction,
    observer: &O,
) {
    use rayon::prelude::*;

    data.par_chunks_exact_mut(BLOCK_SIZE)
        .for_each(|chunk| transform_chunk(chunk, round_keys, direction, observer));
}

/// Encrypts every block of `data` in place.
///
/// Fails with [`Error::InvalidLength`](crate::Error::InvalidLength) and leaves
/// `data` untouched unless its length is a multiple of the block size.
pub fn encrypt_blocks<O: StageObserver + Sync + ?Sized>(
    data: &mut [u8],
    round_keys: &RoundKeys,
    observer: &O,
) -> Result<()> {
    check_aligned(data)?;
    transform(data, round_keys, Direction::Encrypt, observer);
    Ok(())
}

/// Decrypts every block of `data` in place. Same length rule as
/// [`encrypt_blocks`].
pub fn decrypt_blocks<O: StageObserver + Sync + ?Sized>(
    data: &mut [u8],
    round_keys: &RoundKeys,
    observer: &O,
) -> Result<()> {
    check_aligned(data)?;
    transform(data, round_keys, Direction::Decrypt, observer);
    Ok(())
}

//! Hooks for watching the state evolve through a block transform.

use core::fmt;
use std::sync::Arc;

use crate::block::Block;

/// Direction a block is travelling through the cipher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Forward cipher (encryption).
    Encrypt,
    /// Inverse cipher (decryption).
    Decrypt,
}

/// One of the round transformations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Byte substitution through the S-box.
    SubBytes,
    /// Byte substitution through the inverse S-box.
    InvSubBytes,
    /// Left rotation of rows 1..=3.
    ShiftRows,
    /// Right rotation of rows 1..=3.
    InvShiftRows,
    /// Column mixing with `{2, 3, 1, 1}`.
    MixColumns,
    /// Column mixing with `{14, 11, 13, 9}`.
    InvMixColumns,
    /// XOR with the round key.
    AddRoundKey,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::SubBytes => "SubBytes",
            Stage::InvSubBytes => "InvSubBytes",
            Stage::ShiftRows => "ShiftRows",
            Stage::InvShiftRows => "InvShiftRows",
            Stage::MixColumns => "MixColumns",
            Stage::InvMixColumns => "InvMixColumns",
            Stage::AddRoundKey => "AddRoundKey",
        };
        f.write_str(name)
    }
}

/// Receives the state after every transformation of a block.
///
/// `round` is the index of the round key the surrounding round uses, so the
/// forward cipher reports `0..=10` and the inverse cipher reports `10..=0`.
pub trait StageObserver {
    /// Called after `stage` has been applied to `state`.
    fn observe(&self, direction: Direction, round: usize, stage: Stage, state: &Block);
}

/// The silent observer.
impl StageObserver for () {
    #[inline(always)]
    fn observe(&self, _: Direction, _: usize, _: Stage, _: &Block) {}
}

impl<O: StageObserver + ?Sized> StageObserver for &O {
    #[inline]
    fn observe(&self, direction: Direction, round: usize, stage: Stage, state: &Block) {
        (**self).observe(direction, round, stage, state);
    }
}

impl<O: StageObserver + ?Sized> StageObserver for Box<O> {
    #[inline]
    fn observe(&self, direction: Direction, round: usize, stage: Stage, state: &Block) {
        (**self).observe(direction, round, stage, state);
    }
}

impl<O: StageObserver + ?Sized> StageObserver for Arc<O> {
    #[inline]
    fn observe(&self, direction: Direction, round: usize, stage: Stage, state: &Block) {
        (**self).observe(direction, round, stage, state);
    }
}

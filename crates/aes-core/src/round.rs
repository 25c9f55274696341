//! AES round transformations.
//!
//! Every function mutates the state in place and has no failure modes.

use crate::block::{state_index, xor_in_place, Block};
use crate::gf::gf_mul;
use crate::sbox::{inv_sbox, sbox};

const MIX: [u8; 4] = [0x02, 0x03, 0x01, 0x01];
const INV_MIX: [u8; 4] = [0x0e, 0x0b, 0x0d, 0x09];

/// Applies SubBytes to the state in place.
#[inline]
pub fn sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub fn inv_sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = inv_sbox(*byte);
    }
}

/// Rotates row `r` left by `r` positions when `left` is set, right otherwise.
fn rotate_rows(state: &mut Block, left: bool) {
    let src = *state;
    for row in 1..4 {
        for col in 0..4 {
            let from = if left { (col + row) % 4 } else { (col + 4 - row) % 4 };
            state[state_index(row, col)] = src[state_index(row, from)];
        }
    }
}

/// Performs ShiftRows in place.
#[inline]
pub fn shift_rows(state: &mut Block) {
    rotate_rows(state, true);
}

/// Performs the inverse of ShiftRows in place.
#[inline]
pub fn inv_shift_rows(state: &mut Block) {
    rotate_rows(state, false);
}

/// Multiplies one column by the circulant matrix whose first row is `coeffs`.
fn mix_column(col: &mut [u8], coeffs: &[u8; 4]) {
    let input = [col[0], col[1], col[2], col[3]];
    for (row, out) in col.iter_mut().enumerate() {
        *out = (0..4).fold(0u8, |acc, k| acc ^ gf_mul(coeffs[(4 + k - row) % 4], input[k]));
    }
}

/// MixColumns over all four columns.
#[inline]
pub fn mix_columns(state: &mut Block) {
    for column in state.chunks_exact_mut(4) {
        mix_column(column, &MIX);
    }
}

/// Inverse MixColumns over all four columns.
#[inline]
pub fn inv_mix_columns(state: &mut Block) {
    for column in state.chunks_exact_mut(4) {
        mix_column(column, &INV_MIX);
    }
}

/// Adds (XORs) a round key into the state.
#[inline]
pub fn add_round_key(state: &mut Block, round_key: &Block) {
    xor_in_place(state, round_key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    fn hex_block(s: &str) -> Block {
        let bytes: Vec<u8> = (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect();
        bytes.try_into().unwrap()
    }

    // Round 1 intermediates from FIPS-197 Appendix B.
    const START: &str = "193de3bea0f4e22b9ac68d2ae9f84808";
    const AFTER_SUB: &str = "d42711aee0bf98f1b8b45de51e415230";
    const AFTER_SHIFT: &str = "d4bf5d30e0b452aeb84111f11e2798e5";
    const AFTER_MIX: &str = "046681e5e0cb199a48f8d37a2806264c";

    #[test]
    fn fips_197_round_one() {
        let mut state = hex_block(START);
        sub_bytes(&mut state);
        assert_eq!(state, hex_block(AFTER_SUB));
        shift_rows(&mut state);
        assert_eq!(state, hex_block(AFTER_SHIFT));
        mix_columns(&mut state);
        assert_eq!(state, hex_block(AFTER_MIX));
    }

    #[test]
    fn inverses_undo_forward_transforms() {
        let mut rng = rand::thread_rng();
        for _ in 0..64 {
            let mut original = [0u8; 16];
            rng.fill_bytes(&mut original);

            let mut state = original;
            sub_bytes(&mut state);
            inv_sub_bytes(&mut state);
            assert_eq!(state, original);

            shift_rows(&mut state);
            inv_shift_rows(&mut state);
            assert_eq!(state, original);

            mix_columns(&mut state);
            inv_mix_columns(&mut state);
            assert_eq!(state, original);

            let key = [0x3cu8; 16];
            add_round_key(&mut state, &key);
            add_round_key(&mut state, &key);
            assert_eq!(state, original);
        }
    }

    #[test]
    fn shift_rows_moves_rows_only() {
        let mut state: Block = core::array::from_fn(|i| i as u8);
        shift_rows(&mut state);
        let rows = crate::block::to_rows(&state);
        assert_eq!(rows[0], [0, 4, 8, 12]);
        assert_eq!(rows[1], [5, 9, 13, 1]);
        assert_eq!(rows[2], [10, 14, 2, 6]);
        assert_eq!(rows[3], [15, 3, 7, 11]);
    }

    #[test]
    fn mix_columns_known_column() {
        // Widely used test column: db 13 53 45 -> 8e 4d a1 bc.
        let mut state = [0u8; 16];
        state[..4].copy_from_slice(&[0xdb, 0x13, 0x53, 0x45]);
        mix_columns(&mut state);
        assert_eq!(&state[..4], &[0x8e, 0x4d, 0xa1, 0xbc]);
    }
}

//! Block and state-matrix helpers.
//!
//! A block doubles as the 4x4 AES state. Bytes are laid out column-major:
//! byte `i` sits at row `i % 4`, column `i / 4`.

/// Size of an AES block in bytes.
pub const BLOCK_SIZE: usize = 16;

/// AES block of 16 bytes.
pub type Block = [u8; BLOCK_SIZE];

/// Offset of the state element at `row`, `col`.
#[inline]
pub const fn state_index(row: usize, col: usize) -> usize {
    col * 4 + row
}

/// XORs two blocks, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

/// Returns the state as four rows, the way FIPS-197 draws it.
pub fn to_rows(state: &Block) -> [[u8; 4]; 4] {
    let mut rows = [[0u8; 4]; 4];
    for (row, out) in rows.iter_mut().enumerate() {
        for (col, byte) in out.iter_mut().enumerate() {
            *byte = state[state_index(row, col)];
        }
    }
    rows
}

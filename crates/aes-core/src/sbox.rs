//! Forward and inverse AES S-boxes.
//!
//! Both tables are built at compile time: each byte is mapped to its
//! multiplicative inverse in GF(2^8) and then through the FIPS-197 affine
//! transform with constant `0x63`.

const fn build_sbox() -> [u8; 256] {
    let mut table = [0u8; 256];
    // p walks the multiplicative group via powers of the generator 3,
    // q tracks p^-1 by dividing by 3 each step.
    let mut p: u8 = 1;
    let mut q: u8 = 1;
    loop {
        p = p ^ (p << 1) ^ if p & 0x80 != 0 { 0x1b } else { 0 };

        q ^= q << 1;
        q ^= q << 2;
        q ^= q << 4;
        if q & 0x80 != 0 {
            q ^= 0x09;
        }

        let affine =
            q ^ q.rotate_left(1) ^ q.rotate_left(2) ^ q.rotate_left(3) ^ q.rotate_left(4) ^ 0x63;
        table[p as usize] = affine;

        if p == 1 {
            break;
        }
    }
    // Zero has no inverse and maps to the affine constant.
    table[0] = 0x63;
    table
}

const fn invert(table: &[u8; 256]) -> [u8; 256] {
    let mut inv = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        inv[table[i] as usize] = i as u8;
        i += 1;
    }
    inv
}

const FORWARD: [u8; 256] = build_sbox();

static SBOX: [u8; 256] = FORWARD;
static INV_SBOX: [u8; 256] = invert(&FORWARD);

/// Substitutes a byte through the forward S-box.
#[inline]
pub fn sbox(byte: u8) -> u8 {
    SBOX[byte as usize]
}

/// Substitutes a byte through the inverse S-box.
#[inline]
pub fn inv_sbox(byte: u8) -> u8 {
    INV_SBOX[byte as usize]
}

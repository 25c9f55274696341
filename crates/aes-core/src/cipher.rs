//! AES-128 key schedule and block encryption/decryption.

use crate::block::Block;
use crate::key::{Aes128Key, RoundKeys, ROUND_KEY_COUNT};
use crate::observer::{Direction, Stage, StageObserver};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::sbox::sbox;

/// Number of rounds for a 128-bit key.
pub const ROUNDS: usize = 10;

/// Round constants for rounds 1 through 10.
const RCON: [u8; ROUNDS] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36];

type Word = [u8; 4];

fn rot_word([a, b, c, d]: Word) -> Word {
    [b, c, d, a]
}

fn sub_word(word: Word) -> Word {
    word.map(sbox)
}

/// Expands a 128-bit key into 11 round keys.
pub fn expand_key(key: &Aes128Key) -> RoundKeys {
    let mut w: [Word; 4 * ROUND_KEY_COUNT] = [[0u8; 4]; 4 * ROUND_KEY_COUNT];
    for (word, chunk) in w.iter_mut().zip(key.0.chunks_exact(4)) {
        word.copy_from_slice(chunk);
    }

    for i in 4..w.len() {
        let mut temp = w[i - 1];
        if i % 4 == 0 {
            temp = sub_word(rot_word(temp));
            temp[0] ^= RCON[i / 4 - 1];
        }
        for (j, byte) in temp.iter().enumerate() {
            w[i][j] = w[i - 4][j] ^ byte;
        }
    }

    let mut round_keys = [[0u8; 16]; ROUND_KEY_COUNT];
    for (round_key, words) in round_keys.iter_mut().zip(w.chunks_exact(4)) {
        for (dst, word) in round_key.chunks_exact_mut(4).zip(words) {
            dst.copy_from_slice(word);
        }
    }

    RoundKeys(round_keys)
}

fn step<O: StageObserver + ?Sized>(
    state: &mut Block,
    observer: &O,
    direction: Direction,
    round: usize,
    stage: Stage,
    transform: impl FnOnce(&mut Block),
) {
    transform(state);
    observer.observe(direction, round, stage, state);
}

fn forward<O: StageObserver + ?Sized>(state: &mut Block, round_keys: &RoundKeys, observer: &O) {
    let dir = Direction::Encrypt;
    step(state, observer, dir, 0, Stage::AddRoundKey, |s| {
        add_round_key(s, round_keys.get(0))
    });

    for round in 1..ROUNDS {
        step(state, observer, dir, round, Stage::SubBytes, sub_bytes);
        step(state, observer, dir, round, Stage::ShiftRows, shift_rows);
        step(state, observer, dir, round, Stage::MixColumns, mix_columns);
        step(state, observer, dir, round, Stage::AddRoundKey, |s| {
            add_round_key(s, round_keys.get(round))
        });
    }

    step(state, observer, dir, ROUNDS, Stage::SubBytes, sub_bytes);
    step(state, observer, dir, ROUNDS, Stage::ShiftRows, shift_rows);
    step(state, observer, dir, ROUNDS, Stage::AddRoundKey, |s| {
        add_round_key(s, round_keys.get(ROUNDS))
    });
}

fn inverse<O: StageObserver + ?Sized>(state: &mut Block, round_keys: &RoundKeys, observer: &O) {
    let dir = Direction::Decrypt;
    step(state, observer, dir, ROUNDS, Stage::AddRoundKey, |s| {
        add_round_key(s, round_keys.get(ROUNDS))
    });

    for round in (1..ROUNDS).rev() {
        step(state, observer, dir, round, Stage::InvShiftRows, inv_shift_rows);
        step(state, observer, dir, round, Stage::InvSubBytes, inv_sub_bytes);
        step(state, observer, dir, round, Stage::AddRoundKey, |s| {
            add_round_key(s, round_keys.get(round))
        });
        step(state, observer, dir, round, Stage::InvMixColumns, inv_mix_columns);
    }

    step(state, observer, dir, 0, Stage::InvShiftRows, inv_shift_rows);
    step(state, observer, dir, 0, Stage::InvSubBytes, inv_sub_bytes);
    step(state, observer, dir, 0, Stage::AddRoundKey, |s| {
        add_round_key(s, round_keys.get(0))
    });
}

/// Runs the full forward or inverse cipher over `state` in place, reporting
/// every stage to `observer`.
pub fn cipher_block<O: StageObserver + ?Sized>(
    state: &mut Block,
    round_keys: &RoundKeys,
    direction: Direction,
    observer: &O,
) {
    match direction {
        Direction::Encrypt => forward(state, round_keys, observer),
        Direction::Decrypt => inverse(state, round_keys, observer),
    }
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let mut state = *block;
    cipher_block(&mut state, round_keys, Direction::Encrypt, &());
    state
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let mut state = *block;
    cipher_block(&mut state, round_keys, Direction::Decrypt, &());
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Aes128Key;
    use rand::RngCore;
    use std::cell::RefCell;

    const NIST_KEY: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];
    const NIST_PLAIN: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];
    const NIST_CIPHER: [u8; 16] = [
        0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5,
        0x5a,
    ];

    const KUNG_FU_CIPHER: [u8; 16] = [
        0x29, 0xc3, 0x50, 0x5f, 0x57, 0x14, 0x20, 0xf6, 0x40, 0x22, 0x99, 0xb3, 0x1a, 0x02, 0xd7,
        0x3a,
    ];

    #[derive(Default)]
    struct Recorder(RefCell<Vec<(Direction, usize, Stage)>>);

    impl StageObserver for Recorder {
        fn observe(&self, direction: Direction, round: usize, stage: Stage, _: &Block) {
            self.0.borrow_mut().push((direction, round, stage));
        }
    }

    #[test]
    fn encrypt_matches_nist_vector() {
        let key = Aes128Key::from(NIST_KEY);
        let round_keys = expand_key(&key);
        let ct = encrypt_block(&NIST_PLAIN, &round_keys);
        assert_eq!(ct, NIST_CIPHER);
    }

    #[test]
    fn decrypt_matches_nist_vector() {
        let key = Aes128Key::from(NIST_KEY);
        let round_keys = expand_key(&key);
        let pt = decrypt_block(&NIST_CIPHER, &round_keys);
        assert_eq!(pt, NIST_PLAIN);
    }

    #[test]
    fn kung_fu_known_answer() {
        let round_keys = expand_key(&Aes128Key::from(*b"Thats my Kung Fu"));
        assert_eq!(encrypt_block(b"Two One Nine Two", &round_keys), KUNG_FU_CIPHER);
        assert_eq!(&decrypt_block(&KUNG_FU_CIPHER, &round_keys), b"Two One Nine Two");
    }

    #[test]
    fn key_schedule_matches_fips_197_appendix_a() {
        let key = Aes128Key::from([
            0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf,
            0x4f, 0x3c,
        ]);
        let round_keys = expand_key(&key);
        assert_eq!(round_keys.get(0), &key.0);
        assert_eq!(&round_keys.get(1)[..4], &[0xa0, 0xfa, 0xfe, 0x17]);
        assert_eq!(
            round_keys.get(10),
            &[
                0xd0, 0x14, 0xf9, 0xa8, 0xc9, 0xee, 0x25, 0x89, 0xe1, 0x3f, 0x0c, 0xc8, 0xb6,
                0x63, 0x0c, 0xa6
            ]
        );
    }

    #[test]
    fn key_schedule_is_deterministic() {
        let key = Aes128Key::from(*b"Thats my Kung Fu");
        let a = expand_key(&key);
        let b = expand_key(&key);
        assert_eq!(a, b);
        assert_eq!(a.get(0), &key.0);
        assert_eq!(a.iter().count(), ROUND_KEY_COUNT);
    }

    #[test]
    fn forward_pipeline_sequence() {
        let round_keys = expand_key(&Aes128Key::from(NIST_KEY));
        let recorder = Recorder::default();
        let mut state = NIST_PLAIN;
        cipher_block(&mut state, &round_keys, Direction::Encrypt, &recorder);
        assert_eq!(state, NIST_CIPHER);

        let events = recorder.0.into_inner();
        // 1 initial key addition, 9 full rounds of 4 stages, 3-stage final round.
        assert_eq!(events.len(), 1 + 9 * 4 + 3);
        assert_eq!(events[0], (Direction::Encrypt, 0, Stage::AddRoundKey));
        assert!(events
            .iter()
            .filter(|(_, round, _)| *round == ROUNDS)
            .all(|(_, _, stage)| *stage != Stage::MixColumns));
        assert_eq!(
            events.iter().filter(|(_, _, s)| *s == Stage::AddRoundKey).count(),
            ROUND_KEY_COUNT
        );
        assert_eq!(*events.last().unwrap(), (Direction::Encrypt, ROUNDS, Stage::AddRoundKey));
    }

    #[test]
    fn inverse_pipeline_sequence() {
        let round_keys = expand_key(&Aes128Key::from(NIST_KEY));
        let recorder = Recorder::default();
        let mut state = NIST_CIPHER;
        cipher_block(&mut state, &round_keys, Direction::Decrypt, &recorder);
        assert_eq!(state, NIST_PLAIN);

        let events = recorder.0.into_inner();
        assert_eq!(events.len(), 1 + 9 * 4 + 3);
        assert_eq!(events[0], (Direction::Decrypt, ROUNDS, Stage::AddRoundKey));
        assert_eq!(events[4], (Direction::Decrypt, 9, Stage::InvMixColumns));
        assert_eq!(*events.last().unwrap(), (Direction::Decrypt, 0, Stage::AddRoundKey));
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let mut key_bytes = [0u8; 16];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key_bytes);
            rng.fill_bytes(&mut block);
            let key = Aes128Key::from(key_bytes);
            let rks = expand_key(&key);
            let ct = encrypt_block(&block, &rks);
            let pt = decrypt_block(&ct, &rks);
            assert_eq!(pt, block);
        }
    }
}

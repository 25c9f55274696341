//! Encrypts a message in both modes and decrypts it back.

use aes_modes::{Cipher, Mode};

fn main() {
    let cipher = Cipher::new(b"Thats my Kung Fu").expect("16-byte key");
    let message = b"Two One Nine Two";

    let ecb = cipher.encrypt(message, Mode::Ecb);
    let plain = cipher
        .decrypt(&ecb.ciphertext, Mode::Ecb, None)
        .expect("ECB decrypt");
    assert_eq!(plain, message);

    let cbc = cipher.encrypt(message, Mode::Cbc);
    let plain = cipher
        .decrypt(&cbc.ciphertext, Mode::Cbc, cbc.iv.as_ref())
        .expect("CBC decrypt");
    assert_eq!(plain, message);

    println!("example succeeded; both modes round-trip");
}

//! ECB and CBC chaining with PKCS#7 padding over the `aes-core` block cipher.
//!
//! [`Cipher`] owns one expanded key schedule and exposes single-shot
//! [`encrypt`](Cipher::encrypt) / [`decrypt`](Cipher::decrypt). CBC
//! encryption returns the IV it drew; the same IV must be handed back to
//! decryption. [`Envelope`] bundles mode, IV and ciphertext for storage.
//!
//! ```
//! use aes_modes::{Cipher, Mode};
//!
//! let cipher = Cipher::new(b"Thats my Kung Fu").unwrap();
//! let sealed = cipher.encrypt(b"Two One Nine Two", Mode::Cbc);
//! let plain = cipher
//!     .decrypt(&sealed.ciphertext, Mode::Cbc, sealed.iv.as_ref())
//!     .unwrap();
//! assert_eq!(plain, b"Two One Nine Two");
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cbc;
pub mod ecb;
mod engine;
mod envelope;
mod error;
mod mode;
mod padding;
mod trace;

pub use crate::engine::{Cipher, Encrypted};
pub use crate::envelope::{Envelope, ENVELOPE_VERSION};
pub use crate::error::{Error, Result};
pub use crate::mode::{Iv, Mode};
pub use crate::padding::{pad, unpad};
pub use crate::trace::LogObserver;

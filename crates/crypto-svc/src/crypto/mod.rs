//! Cryptographic primitives behind the [`CryptoService`](crate::CryptoService).
//!
//! This module is intentionally free of configuration loading and telemetry
//! setup. It provides the building blocks the service composes.
//!
//! # Ciphertext format
//!
//! ```text
//! <16-byte IV><AES-CTR ciphertext, same length as the plaintext>
//! ```
//!
//! No length prefix, version tag or authentication tag. Existing data in this
//! format must keep decrypting, so the framing is fixed.

pub mod cipher;
pub mod digest;
pub mod engine;
pub mod kdf;
pub mod keys;
pub mod random;

pub use cipher::Envelope;
pub use engine::{AesCtrEngine, CipherEngine, DigestEngine, OsRandom, RandomSource, RustCryptoDigest};
pub use kdf::{Credential, DerivedKey};
pub use keys::KeyPair;

/// Byte length of the counter-mode IV that prefixes every ciphertext.
pub const IV_LEN: usize = 16;

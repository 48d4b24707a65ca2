//! Common types and errors shared across `crypto-svc` crates.

pub mod error;
pub mod kinds;

pub use error::{CryptoError, CryptoResult};
pub use kinds::{CipherKind, DigestKind, KeyPairAlgorithm, OutputEncoding, TextEncoding};

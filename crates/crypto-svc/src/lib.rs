//! Crypto Service: one configured-once facade over symmetric encryption,
//! password-based key derivation, digests, HMAC and asymmetric signatures,
//! and random data.
//!
//! ```no_run
//! # async fn demo() -> crypto_svc::CryptoResult<()> {
//! use crypto_svc::{Configuration, Credential, CryptoService};
//!
//! let svc = CryptoService::new(Configuration::default())?;
//! let _sealed = svc
//!     .encrypt_text(Some("hello world"), Credential::Password("correct horse"), None)
//!     .await?;
//! # Ok(()) }
//! ```

pub mod config;
pub mod crypto;
pub mod encoding;
pub mod service;
pub mod telemetry;

pub use common::{
    CipherKind, CryptoError, CryptoResult, DigestKind, KeyPairAlgorithm, OutputEncoding,
    TextEncoding,
};
pub use config::{Configuration, ServiceConfig};
pub use crypto::{Credential, DerivedKey, Envelope, KeyPair};
pub use service::{CryptoService, Engines};

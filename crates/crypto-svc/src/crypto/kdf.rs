//! PBKDF2 key derivation and the credential forms encryption accepts.
//!
//! Derivation is CPU-bound and runs on Tokio's blocking pool so that many
//! derivations can proceed without starving the async workers. The join handle
//! is the only completion channel: it resolves exactly once, with either the
//! key or the failure.

use std::sync::Arc;

use common::{CryptoError, CryptoResult, DigestKind};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::engine::DigestEngine;
use crate::config::Configuration;

/// A symmetric key produced by PBKDF2, together with the salt bytes used.
///
/// Both buffers are zeroized when the key is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    data: Vec<u8>,
    salt: Vec<u8>,
}

impl DerivedKey {
    /// Wrap key bytes a caller already holds.
    pub fn new(data: Vec<u8>, salt: Vec<u8>) -> Self {
        Self { data, salt }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.debug_struct("DerivedKey")
            .field("data", &format_args!("[REDACTED; {} bytes]", self.data.len()))
            .field("salt_len", &self.salt.len())
            .finish()
    }
}

/// What a caller hands to encrypt/decrypt: a password still to be stretched,
/// or a key that has already been derived.
#[derive(Debug, Clone, Copy)]
pub enum Credential<'a> {
    Password(&'a str),
    Derived(&'a DerivedKey),
}

impl<'a> From<&'a str> for Credential<'a> {
    fn from(password: &'a str) -> Self {
        Credential::Password(password)
    }
}

impl<'a> From<&'a String> for Credential<'a> {
    fn from(password: &'a String) -> Self {
        Credential::Password(password.as_str())
    }
}

impl<'a> From<&'a DerivedKey> for Credential<'a> {
    fn from(key: &'a DerivedKey) -> Self {
        Credential::Derived(key)
    }
}

/// PBKDF2 parameters taken from a [`Configuration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    pub digest: DigestKind,
    pub iterations: u32,
    pub key_len: usize,
}

impl From<&Configuration> for KdfParams {
    fn from(cfg: &Configuration) -> Self {
        Self {
            digest: cfg.digest(),
            iterations: cfg.kdf_iterations(),
            key_len: cfg.key_len(),
        }
    }
}

/// Stretch `password` with `salt` into a key of `params.key_len` bytes.
///
/// The password is taken as UTF-8 bytes. Must be called from within a Tokio
/// runtime.
///
/// # Errors
///
/// Returns [`CryptoError::KeyDerivationFailed`] wrapping the cause if the
/// engine rejects the parameters or the blocking worker does not complete.
pub async fn derive_key(
    engine: Arc<dyn DigestEngine>,
    params: KdfParams,
    password: &str,
    salt: Vec<u8>,
) -> CryptoResult<DerivedKey> {
    let password = Zeroizing::new(password.as_bytes().to_vec());
    debug!(
        digest = %params.digest,
        iterations = params.iterations,
        key_len = params.key_len,
        "deriving key"
    );

    let worker = tokio::task::spawn_blocking(move || {
        let mut data = Zeroizing::new(vec![0u8; params.key_len]);
        let result = engine.pbkdf2(
            params.digest,
            &password,
            &salt,
            params.iterations,
            &mut data,
        );
        result.map(|()| DerivedKey::new(data.to_vec(), salt))
    });

    match worker.await {
        Ok(Ok(key)) => Ok(key),
        Ok(Err(e)) => Err(CryptoError::key_derivation(e)),
        Err(join) => Err(CryptoError::key_derivation(join)),
    }
}

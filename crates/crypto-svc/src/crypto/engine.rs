//! Backend seams: the traits the service calls through, and their default
//! RustCrypto / OS implementations.
//!
//! Keeping the primitives behind [`RandomSource`], [`CipherEngine`] and
//! [`DigestEngine`] lets failure paths (RNG exhaustion, a KDF worker dying) be
//! exercised with mocks.

use aes::{Aes128, Aes192, Aes256};
use common::{CipherKind, CryptoError, CryptoResult, DigestKind};
use ctr::cipher::{KeyIvInit, StreamCipher};
use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use ripemd::Ripemd160;
use sha2::digest::DynDigest;
use sha2::{Sha256, Sha384, Sha512};

use super::IV_LEN;

/// Source of cryptographically secure random bytes.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    /// Fill `buf` entirely with random bytes.
    fn fill(&self, buf: &mut [u8]) -> CryptoResult<()>;
}

/// [`RandomSource`] backed by the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, buf: &mut [u8]) -> CryptoResult<()> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| CryptoError::RandomUnavailable(e.to_string()))
    }
}

/// Counter-mode keystream application. Encryption and decryption are the same
/// operation.
#[cfg_attr(test, mockall::automock)]
pub trait CipherEngine: Send + Sync {
    /// XOR `data` in place with the keystream for `key` and `iv`.
    fn apply_keystream(
        &self,
        cipher: CipherKind,
        key: &[u8],
        iv: &[u8; IV_LEN],
        data: &mut [u8],
    ) -> CryptoResult<()>;
}

/// AES-CTR with a 128-bit big-endian counter spanning the whole IV block.
#[derive(Debug, Clone, Copy, Default)]
pub struct AesCtrEngine;

impl CipherEngine for AesCtrEngine {
    fn apply_keystream(
        &self,
        cipher: CipherKind,
        key: &[u8],
        iv: &[u8; IV_LEN],
        data: &mut [u8],
    ) -> CryptoResult<()> {
        match cipher {
            CipherKind::Aes128Ctr => xor_keystream::<ctr::Ctr128BE<Aes128>>(cipher, key, iv, data),
            CipherKind::Aes192Ctr => xor_keystream::<ctr::Ctr128BE<Aes192>>(cipher, key, iv, data),
            CipherKind::Aes256Ctr => xor_keystream::<ctr::Ctr128BE<Aes256>>(cipher, key, iv, data),
        }
    }
}

fn xor_keystream<C>(kind: CipherKind, key: &[u8], iv: &[u8], data: &mut [u8]) -> CryptoResult<()>
where
    C: KeyIvInit + StreamCipher,
{
    let mut c = C::new_from_slices(key, iv).map_err(|_| {
        CryptoError::InvalidKey(format!(
            "{kind} requires a {}-byte key, got {} bytes",
            kind.key_len(),
            key.len()
        ))
    })?;
    c.try_apply_keystream(data)
        .map_err(|_| CryptoError::InvalidArgument("payload exceeds the counter space".into()))
}

/// Hashing, HMAC and PBKDF2 for every whitelisted [`DigestKind`].
#[cfg_attr(test, mockall::automock)]
pub trait DigestEngine: Send + Sync {
    /// Create a fresh streaming hasher.
    fn hasher(&self, digest: DigestKind) -> Box<dyn DynDigest + Send>;

    /// Compute `HMAC-<digest>(key, data)`.
    fn hmac(&self, digest: DigestKind, key: &[u8], data: &[u8]) -> CryptoResult<Vec<u8>>;

    /// Fill `out` with `PBKDF2-HMAC-<digest>(password, salt, rounds)`.
    fn pbkdf2(
        &self,
        digest: DigestKind,
        password: &[u8],
        salt: &[u8],
        rounds: u32,
        out: &mut [u8],
    ) -> CryptoResult<()>;
}

/// [`DigestEngine`] built on the RustCrypto hash crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoDigest;

macro_rules! hmac_with {
    ($hash:ty, $key:expr, $data:expr) => {{
        let mut mac = <Hmac<$hash> as Mac>::new_from_slice($key)
            .map_err(|_| CryptoError::InvalidKey("unusable HMAC key".into()))?;
        Mac::update(&mut mac, $data);
        Ok(mac.finalize().into_bytes().to_vec())
    }};
}

impl DigestEngine for RustCryptoDigest {
    fn hasher(&self, digest: DigestKind) -> Box<dyn DynDigest + Send> {
        match digest {
            DigestKind::Ripemd160 => Box::new(Ripemd160::default()),
            DigestKind::Sha256 => Box::new(Sha256::default()),
            DigestKind::Sha384 => Box::new(Sha384::default()),
            DigestKind::Sha512 => Box::new(Sha512::default()),
        }
    }

    fn hmac(&self, digest: DigestKind, key: &[u8], data: &[u8]) -> CryptoResult<Vec<u8>> {
        match digest {
            DigestKind::Ripemd160 => hmac_with!(Ripemd160, key, data),
            DigestKind::Sha256 => hmac_with!(Sha256, key, data),
            DigestKind::Sha384 => hmac_with!(Sha384, key, data),
            DigestKind::Sha512 => hmac_with!(Sha512, key, data),
        }
    }

    fn pbkdf2(
        &self,
        digest: DigestKind,
        password: &[u8],
        salt: &[u8],
        rounds: u32,
        out: &mut [u8],
    ) -> CryptoResult<()> {
        if rounds == 0 {
            return Err(CryptoError::InvalidConfiguration {
                field: "kdf_iterations",
                value: rounds.to_string(),
            });
        }
        match digest {
            DigestKind::Ripemd160 => pbkdf2::pbkdf2_hmac::<Ripemd160>(password, salt, rounds, out),
            DigestKind::Sha256 => pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, rounds, out),
            DigestKind::Sha384 => pbkdf2::pbkdf2_hmac::<Sha384>(password, salt, rounds, out),
            DigestKind::Sha512 => pbkdf2::pbkdf2_hmac::<Sha512>(password, salt, rounds, out),
        }
        Ok(())
    }
}

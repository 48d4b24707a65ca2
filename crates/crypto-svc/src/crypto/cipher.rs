//! AES-CTR encryption and decryption of byte buffers.
//!
//! **Mode choice:** counter mode gives confidentiality only. There is no
//! authentication tag, so a flipped ciphertext bit silently flips the same
//! plaintext bit on decryption. Decrypting with the wrong key yields garbage,
//! not an error.
//!
//! **Never reuse an IV under the same key.** Every call to [`seal`] draws a
//! fresh random IV from the [`RandomSource`].

use common::{CipherKind, CryptoError, CryptoResult};

use super::engine::{CipherEngine, RandomSource};
use super::IV_LEN;

/// A parsed ciphertext: the IV and the raw counter-mode output.
///
/// The byte representation is `IV ‖ ciphertext` with nothing in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Raw IV bytes.
    pub iv: [u8; IV_LEN],
    /// Raw ciphertext bytes, same length as the plaintext.
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Encode to the canonical `IV ‖ ciphertext` framing.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(IV_LEN + self.ciphertext.len());
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Split a buffer into IV and ciphertext.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidArgument`] if `data` is shorter than
    /// [`IV_LEN`] bytes.
    pub fn from_bytes(data: &[u8]) -> CryptoResult<Self> {
        if data.len() < IV_LEN {
            return Err(CryptoError::InvalidArgument(format!(
                "ciphertext must be at least {IV_LEN} bytes, got {}",
                data.len()
            )));
        }
        let (iv_bytes, ciphertext) = data.split_at(IV_LEN);
        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(iv_bytes);
        Ok(Self {
            iv,
            ciphertext: ciphertext.to_vec(),
        })
    }
}

/// Encrypt `plaintext` under `key` with a fresh random IV.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKey`] if `key` is not `cipher.key_len()` bytes,
/// or [`CryptoError::RandomUnavailable`] if no IV could be drawn.
pub fn seal(
    engine: &dyn CipherEngine,
    rng: &dyn RandomSource,
    cipher: CipherKind,
    key: &[u8],
    plaintext: &[u8],
) -> CryptoResult<Envelope> {
    check_key_len(cipher, key)?;

    let mut iv = [0u8; IV_LEN];
    rng.fill(&mut iv)?;

    let mut ciphertext = plaintext.to_vec();
    engine.apply_keystream(cipher, key, &iv, &mut ciphertext)?;
    Ok(Envelope { iv, ciphertext })
}

/// Decrypt an [`Envelope`] back to plaintext bytes.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKey`] if `key` is not `cipher.key_len()` bytes.
pub fn open(
    engine: &dyn CipherEngine,
    cipher: CipherKind,
    key: &[u8],
    envelope: &Envelope,
) -> CryptoResult<Vec<u8>> {
    check_key_len(cipher, key)?;

    let mut plaintext = envelope.ciphertext.clone();
    engine.apply_keystream(cipher, key, &envelope.iv, &mut plaintext)?;
    Ok(plaintext)
}

fn check_key_len(cipher: CipherKind, key: &[u8]) -> CryptoResult<()> {
    if key.len() != cipher.key_len() {
        return Err(CryptoError::InvalidKey(format!(
            "{cipher} requires a {}-byte key, got {} bytes",
            cipher.key_len(),
            key.len()
        )));
    }
    Ok(())
}

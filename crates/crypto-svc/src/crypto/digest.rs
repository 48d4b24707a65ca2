//! Message digests and HMAC signatures.

use std::path::Path;

use common::{CryptoResult, DigestKind};
use subtle::ConstantTimeEq;
use tokio::io::AsyncReadExt;

use super::engine::DigestEngine;

/// Read size for streamed file digests.
pub const FILE_CHUNK_LEN: usize = 64 * 1024;

/// Hash `buffer ‖ salt` with `kind`.
pub fn digest(engine: &dyn DigestEngine, kind: DigestKind, buffer: &[u8], salt: &[u8]) -> Vec<u8> {
    let mut hasher = engine.hasher(kind);
    hasher.update(buffer);
    hasher.update(salt);
    hasher.finalize().into_vec()
}

/// Stream the file at `path` through `kind`, then append `salt`.
///
/// Memory use is bounded by [`FILE_CHUNK_LEN`] regardless of file size.
///
/// # Errors
///
/// Returns [`CryptoError::Io`](common::CryptoError::Io) if the file cannot be
/// opened or a read fails part way through.
pub async fn digest_file(
    engine: &dyn DigestEngine,
    kind: DigestKind,
    path: &Path,
    salt: &[u8],
) -> CryptoResult<Vec<u8>> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut hasher = engine.hasher(kind);
    let mut chunk = vec![0u8; FILE_CHUNK_LEN];
    loop {
        let n = file.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        hasher.update(&chunk[..n]);
    }
    hasher.update(salt);
    Ok(hasher.finalize().into_vec())
}

/// Compute the HMAC of `buffer` keyed with `secret`.
pub fn hmac_sign(
    engine: &dyn DigestEngine,
    kind: DigestKind,
    secret: &[u8],
    buffer: &[u8],
) -> CryptoResult<Vec<u8>> {
    engine.hmac(kind, secret, buffer)
}

/// Recompute the HMAC and compare it with `signature` in constant time.
///
/// A signature of the wrong length is rejected before any byte is compared.
/// Internal failures are reported as a mismatch.
pub fn hmac_verify(
    engine: &dyn DigestEngine,
    kind: DigestKind,
    secret: &[u8],
    buffer: &[u8],
    signature: &[u8],
) -> bool {
    let expected = match engine.hmac(kind, secret, buffer) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    if expected.len() != signature.len() {
        return false;
    }
    expected.ct_eq(signature).into()
}

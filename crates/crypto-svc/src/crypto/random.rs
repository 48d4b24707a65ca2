//! Random buffers and printable random strings of bounded length.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::{CryptoError, CryptoResult};
use rand::Rng;

use super::engine::RandomSource;

fn pick_len(min: usize, max: usize) -> CryptoResult<usize> {
    if min > max {
        return Err(CryptoError::InvalidArgument(format!(
            "min length {min} exceeds max length {max}"
        )));
    }
    Ok(rand::thread_rng().gen_range(min..=max))
}

/// A buffer of random bytes whose length is uniform in `[min, max]`.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidArgument`] if `min > max`, or the source's
/// error if it cannot produce bytes.
pub fn random_bytes(rng: &dyn RandomSource, min: usize, max: usize) -> CryptoResult<Vec<u8>> {
    let len = pick_len(min, max)?;
    let mut buf = vec![0u8; len];
    rng.fill(&mut buf)?;
    Ok(buf)
}

/// A base64 string whose length is uniform in `[min, max]`.
///
/// `max` random bytes are base64-encoded and the encoded text is truncated, so
/// the final characters are not uniform over the alphabet.
pub fn random_text(rng: &dyn RandomSource, min: usize, max: usize) -> CryptoResult<String> {
    let len = pick_len(min, max)?;
    let mut buf = vec![0u8; max];
    rng.fill(&mut buf)?;
    let mut text = STANDARD.encode(&buf);
    text.truncate(len);
    Ok(text)
}

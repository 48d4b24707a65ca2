//! Conversions between text and bytes under the configured encodings.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::{CryptoError, CryptoResult, OutputEncoding, TextEncoding};

/// Turn input text into bytes.
///
/// ASCII keeps the low 8 bits of each UTF-16 code unit, matching the legacy
/// byte mapping that existing ciphertext and digests were produced with.
/// Characters outside the BMP therefore yield two bytes, one per surrogate.
pub fn text_to_bytes(text: &str, encoding: TextEncoding) -> Vec<u8> {
    match encoding {
        TextEncoding::Utf8 => text.as_bytes().to_vec(),
        TextEncoding::Ascii => text.encode_utf16().map(|unit| (unit & 0xFF) as u8).collect(),
    }
}

/// Turn plaintext bytes back into text.
///
/// Invalid UTF-8 is replaced rather than rejected; ASCII clears the high bit.
pub fn bytes_to_text(bytes: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        TextEncoding::Ascii => bytes.iter().map(|b| char::from(b & 0x7F)).collect(),
    }
}

/// Render output bytes as text.
pub fn encode_output(bytes: &[u8], encoding: OutputEncoding) -> String {
    match encoding {
        OutputEncoding::Base64 => STANDARD.encode(bytes),
        OutputEncoding::Hex => hex::encode(bytes),
    }
}

/// Parse text produced by [`encode_output`] back into bytes.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidArgument`] if `text` is not valid for `encoding`.
pub fn decode_output(text: &str, encoding: OutputEncoding) -> CryptoResult<Vec<u8>> {
    match encoding {
        OutputEncoding::Base64 => STANDARD
            .decode(text.trim())
            .map_err(|e| CryptoError::InvalidArgument(format!("malformed base64 input: {e}"))),
        OutputEncoding::Hex => hex::decode(text.trim())
            .map_err(|e| CryptoError::InvalidArgument(format!("malformed hex input: {e}"))),
    }
}

//! Closed algorithm and encoding enums.
//!
//! Every enum parses from its canonical lowercase name (case-insensitive, with
//! a few common spellings accepted) and prints back the canonical name. Serde
//! deserialisation goes through the same `FromStr`, so both accept exactly the
//! same spellings; serialisation always writes the canonical name. Values
//! outside the whitelist fail with [`CryptoError::InvalidConfiguration`] naming
//! the field, or [`CryptoError::UnsupportedAlgorithm`] for key-pair algorithms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CryptoError;

// ---------------------------------------------------------------------------
// Cipher
// ---------------------------------------------------------------------------

/// Whitelisted symmetric ciphers. All are AES in counter mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum CipherKind {
    #[serde(rename = "aes-128-ctr")]
    Aes128Ctr,
    #[serde(rename = "aes-192-ctr")]
    Aes192Ctr,
    #[default]
    #[serde(rename = "aes-256-ctr")]
    Aes256Ctr,
}

impl CipherKind {
    /// Required key length in bytes.
    pub fn key_len(self) -> usize {
        match self {
            CipherKind::Aes128Ctr => 16,
            CipherKind::Aes192Ctr => 24,
            CipherKind::Aes256Ctr => 32,
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            CipherKind::Aes128Ctr => "aes-128-ctr",
            CipherKind::Aes192Ctr => "aes-192-ctr",
            CipherKind::Aes256Ctr => "aes-256-ctr",
        }
    }
}

impl FromStr for CipherKind {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aes-128-ctr" => Ok(CipherKind::Aes128Ctr),
            "aes-192-ctr" => Ok(CipherKind::Aes192Ctr),
            "aes-256-ctr" => Ok(CipherKind::Aes256Ctr),
            _ => Err(invalid("cipher", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// Digest
// ---------------------------------------------------------------------------

/// Whitelisted message digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum DigestKind {
    #[serde(rename = "ripemd160")]
    Ripemd160,
    #[default]
    #[serde(rename = "sha256")]
    Sha256,
    #[serde(rename = "sha384")]
    Sha384,
    #[serde(rename = "sha512")]
    Sha512,
}

impl DigestKind {
    /// Digest output length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            DigestKind::Ripemd160 => 20,
            DigestKind::Sha256 => 32,
            DigestKind::Sha384 => 48,
            DigestKind::Sha512 => 64,
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            DigestKind::Ripemd160 => "ripemd160",
            DigestKind::Sha256 => "sha256",
            DigestKind::Sha384 => "sha384",
            DigestKind::Sha512 => "sha512",
        }
    }
}

impl FromStr for DigestKind {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ripemd160" | "ripemd-160" => Ok(DigestKind::Ripemd160),
            "sha256" | "sha-256" => Ok(DigestKind::Sha256),
            "sha384" | "sha-384" => Ok(DigestKind::Sha384),
            "sha512" | "sha-512" => Ok(DigestKind::Sha512),
            _ => Err(invalid("digest", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// Encodings
// ---------------------------------------------------------------------------

/// How input text is turned into bytes (and plaintext bytes back into text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum TextEncoding {
    #[default]
    #[serde(rename = "utf8")]
    Utf8,
    #[serde(rename = "ascii")]
    Ascii,
}

impl TextEncoding {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf8",
            TextEncoding::Ascii => "ascii",
        }
    }
}

impl FromStr for TextEncoding {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(TextEncoding::Utf8),
            "ascii" => Ok(TextEncoding::Ascii),
            _ => Err(invalid("text_encoding", s)),
        }
    }
}

/// How output bytes (ciphertext, digests, signatures) are rendered as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum OutputEncoding {
    #[default]
    #[serde(rename = "base64")]
    Base64,
    #[serde(rename = "hex")]
    Hex,
}

impl OutputEncoding {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputEncoding::Base64 => "base64",
            OutputEncoding::Hex => "hex",
        }
    }
}

impl FromStr for OutputEncoding {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base64" => Ok(OutputEncoding::Base64),
            "hex" => Ok(OutputEncoding::Hex),
            _ => Err(invalid("output_encoding", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// Key pairs
// ---------------------------------------------------------------------------

/// Asymmetric key-pair families recognised by name.
///
/// Recognising a name does not imply a generation backend exists for it; see
/// `crypto_svc::crypto::keys` for the families that can actually be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum KeyPairAlgorithm {
    Rsa,
    Dsa,
    Ec,
    Ed25519,
    Ed448,
    X25519,
    X448,
    Dh,
}

impl KeyPairAlgorithm {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            KeyPairAlgorithm::Rsa => "rsa",
            KeyPairAlgorithm::Dsa => "dsa",
            KeyPairAlgorithm::Ec => "ec",
            KeyPairAlgorithm::Ed25519 => "ed25519",
            KeyPairAlgorithm::Ed448 => "ed448",
            KeyPairAlgorithm::X25519 => "x25519",
            KeyPairAlgorithm::X448 => "x448",
            KeyPairAlgorithm::Dh => "dh",
        }
    }
}

impl FromStr for KeyPairAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rsa" => Ok(KeyPairAlgorithm::Rsa),
            "dsa" => Ok(KeyPairAlgorithm::Dsa),
            "ec" => Ok(KeyPairAlgorithm::Ec),
            "ed25519" => Ok(KeyPairAlgorithm::Ed25519),
            "ed448" => Ok(KeyPairAlgorithm::Ed448),
            "x25519" => Ok(KeyPairAlgorithm::X25519),
            "x448" => Ok(KeyPairAlgorithm::X448),
            "dh" => Ok(KeyPairAlgorithm::Dh),
            _ => Err(CryptoError::UnsupportedAlgorithm(s.to_owned())),
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

display_as_str!(CipherKind, DigestKind, TextEncoding, OutputEncoding, KeyPairAlgorithm);

macro_rules! try_from_string {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl TryFrom<String> for $ty {
                type Error = CryptoError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    value.parse()
                }
            }
        )+
    };
}

try_from_string!(CipherKind, DigestKind, TextEncoding, OutputEncoding, KeyPairAlgorithm);

fn invalid(field: &'static str, value: &str) -> CryptoError {
    CryptoError::InvalidConfiguration {
        field,
        value: value.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cipher_key_lengths() {
        assert_eq!(CipherKind::Aes128Ctr.key_len(), 16);
        assert_eq!(CipherKind::Aes192Ctr.key_len(), 24);
        assert_eq!(CipherKind::Aes256Ctr.key_len(), 32);
    }

    #[test]
    fn defaults_match_documented_values() {
        assert_eq!(CipherKind::default(), CipherKind::Aes256Ctr);
        assert_eq!(DigestKind::default(), DigestKind::Sha256);
        assert_eq!(TextEncoding::default(), TextEncoding::Utf8);
        assert_eq!(OutputEncoding::default(), OutputEncoding::Base64);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("AES-128-CTR".parse::<CipherKind>().unwrap(), CipherKind::Aes128Ctr);
        assert_eq!("SHA-512".parse::<DigestKind>().unwrap(), DigestKind::Sha512);
        assert_eq!("UTF-8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
        assert_eq!("Hex".parse::<OutputEncoding>().unwrap(), OutputEncoding::Hex);
    }

    #[test]
    fn out_of_whitelist_names_field() {
        match "aes-256-cbc".parse::<CipherKind>() {
            Err(CryptoError::InvalidConfiguration { field, value }) => {
                assert_eq!(field, "cipher");
                assert_eq!(value, "aes-256-cbc");
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            "md5".parse::<DigestKind>(),
            Err(CryptoError::InvalidConfiguration { field: "digest", .. })
        ));
        assert!(matches!(
            "latin1".parse::<TextEncoding>(),
            Err(CryptoError::InvalidConfiguration { field: "text_encoding", .. })
        ));
        assert!(matches!(
            "base32".parse::<OutputEncoding>(),
            Err(CryptoError::InvalidConfiguration { field: "output_encoding", .. })
        ));
    }

    #[test]
    fn key_pair_algorithm_names() {
        for name in ["rsa", "dsa", "ec", "ed25519", "ed448", "x25519", "x448", "dh"] {
            let alg: KeyPairAlgorithm = name.parse().unwrap();
            assert_eq!(alg.to_string(), name);
        }
        assert!(matches!(
            "elgamal".parse::<KeyPairAlgorithm>(),
            Err(CryptoError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for kind in [CipherKind::Aes128Ctr, CipherKind::Aes192Ctr, CipherKind::Aes256Ctr] {
            assert_eq!(kind.to_string().parse::<CipherKind>().unwrap(), kind);
        }
        for kind in [
            DigestKind::Ripemd160,
            DigestKind::Sha256,
            DigestKind::Sha384,
            DigestKind::Sha512,
        ] {
            assert_eq!(kind.to_string().parse::<DigestKind>().unwrap(), kind);
        }
    }

    #[test]
    fn serde_uses_canonical_names() {
        let json = serde_json::to_string(&CipherKind::Aes192Ctr).unwrap();
        assert_eq!(json, "\"aes-192-ctr\"");
        let decoded: DigestKind = serde_json::from_str("\"sha-384\"").unwrap();
        assert_eq!(decoded, DigestKind::Sha384);
        let alg: KeyPairAlgorithm = serde_json::from_str("\"ed25519\"").unwrap();
        assert_eq!(alg, KeyPairAlgorithm::Ed25519);
    }

    #[test]
    fn serde_accepts_every_parse_spelling() {
        let decoded: DigestKind = serde_json::from_str("\"ripemd-160\"").unwrap();
        assert_eq!(decoded, DigestKind::Ripemd160);
        let decoded: DigestKind = serde_json::from_str("\"SHA256\"").unwrap();
        assert_eq!(decoded, DigestKind::Sha256);
        let decoded: CipherKind = serde_json::from_str("\"AES-128-CTR\"").unwrap();
        assert_eq!(decoded, CipherKind::Aes128Ctr);
        let decoded: TextEncoding = serde_json::from_str("\"UTF-8\"").unwrap();
        assert_eq!(decoded, TextEncoding::Utf8);
        let decoded: KeyPairAlgorithm = serde_json::from_str("\"X25519\"").unwrap();
        assert_eq!(decoded, KeyPairAlgorithm::X25519);

        let err = serde_json::from_str::<OutputEncoding>("\"base32\"").unwrap_err();
        assert!(err.to_string().contains("output_encoding"));
        assert_eq!(
            serde_json::to_string(&DigestKind::Ripemd160).unwrap(),
            "\"ripemd160\""
        );
    }
}

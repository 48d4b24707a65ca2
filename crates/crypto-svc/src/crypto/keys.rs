//! Asymmetric key pairs and signatures.
//!
//! Keys travel as PEM text: SPKI (`PUBLIC KEY`) for public halves and PKCS#8
//! (`PRIVATE KEY`) for private halves. The signing family is detected from the
//! key itself and fixes the hash:
//!
//! | family    | signature                      |
//! |-----------|--------------------------------|
//! | `rsa`     | RSASSA-PKCS1-v1_5 with SHA-256 |
//! | `dsa`     | DSA (2048/256) with SHA-256, DER |
//! | `ec`      | ECDSA P-256 with SHA-256, DER  |
//! | `ed25519` | Ed25519 (64 bytes)             |
//!
//! `x25519` pairs are generated for key agreement and cannot sign. `ed448`,
//! `x448` and `dh` are recognised names with no backend.

use common::{CryptoError, CryptoResult, KeyPairAlgorithm};
use dsa::signature::{DigestSigner as _, DigestVerifier as _};
use ed25519_dalek::{Signer as _, Verifier as _};
use pkcs8::der::asn1::{BitStringRef, OctetStringRef};
use pkcs8::der::{Document, Encode as _, SecretDocument};
use pkcs8::spki::{AlgorithmIdentifierRef, SubjectPublicKeyInfoRef};
use pkcs8::{
    DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding,
    ObjectIdentifier, PrivateKeyInfo,
};
use rand::rngs::OsRng;
use rsa::signature::SignatureEncoding;
use sha2::{Digest as _, Sha256};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// RSA modulus size for generated keys.
pub const RSA_MODULUS_BITS: usize = 2048;

/// A freshly generated key pair.
///
/// The private half is zeroized when dropped and is never printed by `Debug`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyPair {
    /// Family the pair belongs to.
    #[zeroize(skip)]
    pub algorithm: KeyPairAlgorithm,
    /// SPKI PEM public key.
    #[zeroize(skip)]
    pub public_key: String,
    private_key: String,
}

impl KeyPair {
    /// PKCS#8 PEM private key.
    pub fn private_key(&self) -> &str {
        &self.private_key
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("algorithm", &self.algorithm)
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// RFC 8410 object identifier for X25519 keys.
pub const X25519_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.110");

type PemPair = (String, Zeroizing<String>);

/// Generate a key pair for `algorithm`.
///
/// # Errors
///
/// Returns [`CryptoError::UnsupportedAlgorithm`] for recognised families with
/// no backend (`ed448`, `x448`, `dh`), and [`CryptoError::InvalidKey`] if key
/// generation or PEM encoding fails.
pub fn generate(algorithm: KeyPairAlgorithm) -> CryptoResult<KeyPair> {
    debug!(algorithm = %algorithm, "generating key pair");
    let (public_key, private_key) = match algorithm {
        KeyPairAlgorithm::Rsa => {
            let private = rsa::RsaPrivateKey::new(&mut OsRng, RSA_MODULUS_BITS)
                .map_err(|e| CryptoError::InvalidKey(format!("rsa key generation failed: {e}")))?;
            let public = rsa::RsaPublicKey::from(&private);
            standard_pem(&public, &private)?
        }
        KeyPairAlgorithm::Dsa => {
            let components = dsa::Components::generate(&mut OsRng, dsa::KeySize::DSA_2048_256);
            let private = dsa::SigningKey::generate(&mut OsRng, components);
            standard_pem(private.verifying_key(), &private)?
        }
        KeyPairAlgorithm::Ec => {
            let private = p256::SecretKey::random(&mut OsRng);
            standard_pem(&private.public_key(), &private)?
        }
        KeyPairAlgorithm::Ed25519 => {
            let private = ed25519_dalek::SigningKey::generate(&mut OsRng);
            standard_pem(&private.verifying_key(), &private)?
        }
        KeyPairAlgorithm::X25519 => x25519_pem(&crypto_box::SecretKey::generate(&mut OsRng))?,
        other @ (KeyPairAlgorithm::Ed448 | KeyPairAlgorithm::X448 | KeyPairAlgorithm::Dh) => {
            return Err(CryptoError::UnsupportedAlgorithm(format!(
                "{other} key generation has no backend"
            )))
        }
    };

    Ok(KeyPair {
        algorithm,
        public_key,
        private_key: private_key.as_str().to_owned(),
    })
}

fn standard_pem<P, S>(public: &P, private: &S) -> CryptoResult<PemPair>
where
    P: EncodePublicKey + ?Sized,
    S: EncodePrivateKey + ?Sized,
{
    let public = public
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| pem_error("public", e))?;
    let private = private
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| pem_error("private", e))?;
    Ok((public, private))
}

fn x25519_algorithm() -> AlgorithmIdentifierRef<'static> {
    AlgorithmIdentifierRef {
        oid: X25519_OID,
        parameters: None,
    }
}

/// RFC 8410 encoding: the PKCS#8 `privateKey` field holds a DER
/// `CurvePrivateKey` OCTET STRING.
fn x25519_pem(secret: &crypto_box::SecretKey) -> CryptoResult<PemPair> {
    let secret_bytes = Zeroizing::new(secret.to_bytes());
    let curve_key = OctetStringRef::new(secret_bytes.as_slice())
        .and_then(|octets| octets.to_der())
        .map(Zeroizing::new)
        .map_err(|e| pem_error("private", e))?;
    let info = PrivateKeyInfo::new(x25519_algorithm(), &curve_key);
    let private = SecretDocument::encode_msg(&info)
        .and_then(|doc| doc.to_pem("PRIVATE KEY", LineEnding::LF))
        .map_err(|e| pem_error("private", e))?;

    let public_key = secret.public_key();
    let public = BitStringRef::from_bytes(public_key.as_bytes())
        .and_then(|bits| {
            Document::encode_msg(&SubjectPublicKeyInfoRef {
                algorithm: x25519_algorithm(),
                subject_public_key: bits,
            })
        })
        .and_then(|doc| doc.to_pem("PUBLIC KEY", LineEnding::LF))
        .map_err(|e| pem_error("public", e))?;
    Ok((public, private))
}

fn pem_error(half: &str, e: impl std::fmt::Display) -> CryptoError {
    CryptoError::InvalidKey(format!("failed to encode {half} key as PEM: {e}"))
}

/// A parsed private key of a signing family.
enum PrivateKey {
    Rsa(rsa::pkcs1v15::SigningKey<Sha256>),
    Dsa(dsa::SigningKey),
    Ec(p256::ecdsa::SigningKey),
    Ed25519(ed25519_dalek::SigningKey),
}

impl PrivateKey {
    fn from_pem(pem: &str) -> CryptoResult<Self> {
        if let Ok(key) = ed25519_dalek::SigningKey::from_pkcs8_pem(pem) {
            return Ok(PrivateKey::Ed25519(key));
        }
        if let Ok(key) = p256::SecretKey::from_pkcs8_pem(pem) {
            return Ok(PrivateKey::Ec(p256::ecdsa::SigningKey::from(&key)));
        }
        if let Ok(key) = rsa::RsaPrivateKey::from_pkcs8_pem(pem) {
            return Ok(PrivateKey::Rsa(rsa::pkcs1v15::SigningKey::<Sha256>::new(key)));
        }
        if let Ok(key) = dsa::SigningKey::from_pkcs8_pem(pem) {
            return Ok(PrivateKey::Dsa(key));
        }
        Err(CryptoError::InvalidKey(
            "private key is not a PKCS#8 rsa, dsa, ec (P-256) or ed25519 key".into(),
        ))
    }

    fn family(&self) -> KeyPairAlgorithm {
        match self {
            PrivateKey::Rsa(_) => KeyPairAlgorithm::Rsa,
            PrivateKey::Dsa(_) => KeyPairAlgorithm::Dsa,
            PrivateKey::Ec(_) => KeyPairAlgorithm::Ec,
            PrivateKey::Ed25519(_) => KeyPairAlgorithm::Ed25519,
        }
    }

    fn sign(&self, message: &[u8]) -> CryptoResult<Vec<u8>> {
        match self {
            PrivateKey::Rsa(key) => key
                .try_sign(message)
                .map(|sig| sig.to_vec())
                .map_err(|e| CryptoError::InvalidKey(format!("rsa signing failed: {e}"))),
            PrivateKey::Dsa(key) => key
                .try_sign_digest(Sha256::new_with_prefix(message))
                .map(|sig: dsa::Signature| sig.to_vec())
                .map_err(|e| CryptoError::InvalidKey(format!("dsa signing failed: {e}"))),
            PrivateKey::Ec(key) => {
                let sig: p256::ecdsa::Signature = key.sign(message);
                Ok(sig.to_der().as_bytes().to_vec())
            }
            PrivateKey::Ed25519(key) => Ok(key.sign(message).to_bytes().to_vec()),
        }
    }
}

/// A parsed public key of a signing family.
enum PublicKey {
    Rsa(rsa::pkcs1v15::VerifyingKey<Sha256>),
    Dsa(dsa::VerifyingKey),
    Ec(p256::ecdsa::VerifyingKey),
    Ed25519(ed25519_dalek::VerifyingKey),
}

impl PublicKey {
    fn from_pem(pem: &str) -> CryptoResult<Self> {
        if let Ok(key) = ed25519_dalek::VerifyingKey::from_public_key_pem(pem) {
            return Ok(PublicKey::Ed25519(key));
        }
        if let Ok(key) = p256::PublicKey::from_public_key_pem(pem) {
            return Ok(PublicKey::Ec(p256::ecdsa::VerifyingKey::from(&key)));
        }
        if let Ok(key) = rsa::RsaPublicKey::from_public_key_pem(pem) {
            return Ok(PublicKey::Rsa(rsa::pkcs1v15::VerifyingKey::<Sha256>::new(key)));
        }
        if let Ok(key) = dsa::VerifyingKey::from_public_key_pem(pem) {
            return Ok(PublicKey::Dsa(key));
        }
        Err(CryptoError::InvalidKey(
            "public key is not an SPKI rsa, dsa, ec (P-256) or ed25519 key".into(),
        ))
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> CryptoResult<()> {
        let bad = |e: ed25519_dalek::SignatureError| CryptoError::InvalidArgument(e.to_string());
        match self {
            PublicKey::Rsa(key) => {
                let sig = rsa::pkcs1v15::Signature::try_from(signature).map_err(bad)?;
                key.verify(message, &sig).map_err(bad)
            }
            PublicKey::Dsa(key) => {
                let sig = dsa::Signature::try_from(signature).map_err(bad)?;
                key.verify_digest(Sha256::new_with_prefix(message), &sig)
                    .map_err(bad)
            }
            PublicKey::Ec(key) => {
                let sig = p256::ecdsa::Signature::from_der(signature).map_err(bad)?;
                key.verify(message, &sig).map_err(bad)
            }
            PublicKey::Ed25519(key) => {
                let sig = ed25519_dalek::Signature::from_slice(signature).map_err(bad)?;
                key.verify(message, &sig).map_err(bad)
            }
        }
    }
}

/// Sign `message` with a PKCS#8 PEM private key.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKey`] if the key cannot be parsed as one of
/// the signing families or signing fails.
pub fn sign(private_key_pem: &[u8], message: &[u8]) -> CryptoResult<Vec<u8>> {
    let pem = std::str::from_utf8(private_key_pem)
        .map_err(|_| CryptoError::InvalidKey("private key is not PEM text".into()))?;
    let key = PrivateKey::from_pem(pem)?;
    debug!(algorithm = %key.family(), "signing with private key");
    key.sign(message)
}

/// Verify `signature` over `message` with an SPKI PEM public key.
///
/// Every failure (unparseable key, malformed signature, wrong family, plain
/// mismatch) collapses to `false`.
pub fn verify(public_key_pem: &[u8], message: &[u8], signature: &[u8]) -> bool {
    let outcome = std::str::from_utf8(public_key_pem)
        .map_err(|_| CryptoError::InvalidKey("public key is not PEM text".into()))
        .and_then(PublicKey::from_pem)
        .and_then(|key| key.verify(message, signature));
    match outcome {
        Ok(()) => true,
        Err(e) => {
            debug!(error_kind = e.kind(), "asymmetric verification rejected");
            false
        }
    }
}

//! Service configuration: the immutable [`Configuration`] every operation reads,
//! and [`ServiceConfig`], its environment-loaded form.
//!
//! Environment variables use the `CRYPTO_` prefix. Every variable is optional;
//! unset values fall back to `aes-256-ctr`, `sha256`, `utf8`, `base64`, 100 PBKDF2
//! iterations and the `info` log level.

use anyhow::{Context, Result};
use common::{CipherKind, CryptoError, CryptoResult, DigestKind, OutputEncoding, TextEncoding};
use serde::Deserialize;

/// PBKDF2 iteration count used unless overridden.
///
/// Far below current recommendations; kept so previously produced ciphertext
/// still decrypts. Raising it changes every derived key.
pub const DEFAULT_KDF_ITERATIONS: u32 = 100;

/// Environment variable prefix for [`ServiceConfig::from_env`].
pub const ENV_PREFIX: &str = "CRYPTO";

/// Validated, immutable algorithm selection shared by all operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    cipher: CipherKind,
    digest: DigestKind,
    text_encoding: TextEncoding,
    output_encoding: OutputEncoding,
    kdf_iterations: u32,
}

impl Configuration {
    /// Build a configuration from already-typed values.
    pub fn new(
        cipher: CipherKind,
        digest: DigestKind,
        text_encoding: TextEncoding,
        output_encoding: OutputEncoding,
    ) -> Self {
        Self {
            cipher,
            digest,
            text_encoding,
            output_encoding,
            kdf_iterations: DEFAULT_KDF_ITERATIONS,
        }
    }

    /// Build a configuration from algorithm names.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidConfiguration`] naming the first field whose
    /// value is outside its whitelist.
    pub fn parse(
        cipher: &str,
        digest: &str,
        text_encoding: &str,
        output_encoding: &str,
    ) -> CryptoResult<Self> {
        Ok(Self::new(
            cipher.parse()?,
            digest.parse()?,
            text_encoding.parse()?,
            output_encoding.parse()?,
        ))
    }

    /// Return a copy using `iterations` PBKDF2 rounds.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidConfiguration`] if `iterations` is zero.
    pub fn with_kdf_iterations(self, iterations: u32) -> CryptoResult<Self> {
        let cfg = Self {
            kdf_iterations: iterations,
            ..self
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn cipher(&self) -> CipherKind {
        self.cipher
    }

    pub fn digest(&self) -> DigestKind {
        self.digest
    }

    pub fn text_encoding(&self) -> TextEncoding {
        self.text_encoding
    }

    pub fn output_encoding(&self) -> OutputEncoding {
        self.output_encoding
    }

    pub fn kdf_iterations(&self) -> u32 {
        self.kdf_iterations
    }

    /// Key length in bytes required by the configured cipher.
    pub fn key_len(&self) -> usize {
        self.cipher.key_len()
    }

    /// Re-check every invariant. Called at the start of every operation.
    ///
    /// The enum fields are whitelisted by construction; the iteration count is
    /// the only value that can still be out of range.
    pub fn validate(&self) -> CryptoResult<()> {
        if self.kdf_iterations == 0 {
            return Err(CryptoError::InvalidConfiguration {
                field: "kdf_iterations",
                value: self.kdf_iterations.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new(
            CipherKind::default(),
            DigestKind::default(),
            TextEncoding::default(),
            OutputEncoding::default(),
        )
    }
}

/// Raw service settings as read from the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Cipher name, e.g. `"aes-256-ctr"`.
    #[serde(default = "default_cipher")]
    pub cipher: String,

    /// Digest name, e.g. `"sha256"`.
    #[serde(default = "default_digest")]
    pub digest: String,

    /// Text encoding name, `"utf8"` or `"ascii"`.
    #[serde(default = "default_text_encoding")]
    pub text_encoding: String,

    /// Output encoding name, `"base64"` or `"hex"`.
    #[serde(default = "default_output_encoding")]
    pub output_encoding: String,

    /// PBKDF2 iteration count.
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_cipher() -> String {
    CipherKind::default().to_string()
}
fn default_digest() -> String {
    DigestKind::default().to_string()
}
fn default_text_encoding() -> String {
    TextEncoding::default().to_string()
}
fn default_output_encoding() -> String {
    OutputEncoding::default().to_string()
}
fn default_kdf_iterations() -> u32 {
    DEFAULT_KDF_ITERATIONS
}
fn default_log_level() -> String {
    "info".into()
}

impl ServiceConfig {
    /// Load and validate settings from `CRYPTO_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or names a value outside
    /// its whitelist.
    pub fn from_env() -> Result<Self> {
        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Load and validate settings from an explicit environment source.
    pub fn from_environment(env: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(env.try_parsing(true))
            .build()
            .context("failed to build crypto-svc configuration")?;

        let c: ServiceConfig = cfg
            .try_deserialize()
            .context("failed to deserialise crypto-svc configuration")?;

        c.configuration()
            .context("crypto-svc configuration rejected")?;
        Ok(c)
    }

    /// Convert to a validated [`Configuration`].
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidConfiguration`] naming the offending field.
    pub fn configuration(&self) -> CryptoResult<Configuration> {
        Configuration::parse(
            &self.cipher,
            &self.digest,
            &self.text_encoding,
            &self.output_encoding,
        )?
        .with_kdf_iterations(self.kdf_iterations)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cipher: default_cipher(),
            digest: default_digest(),
            text_encoding: default_text_encoding(),
            output_encoding: default_output_encoding(),
            kdf_iterations: default_kdf_iterations(),
            log_level: default_log_level(),
        }
    }
}

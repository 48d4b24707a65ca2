//! Error taxonomy shared by every crypto-svc operation.

use thiserror::Error;

/// Top-level error type returned by the Crypto Service.
///
/// Variants map to stable machine-readable codes via [`CryptoError::kind`]:
/// - [`CryptoError::InvalidConfiguration`] → `"invalid_configuration"`
/// - [`CryptoError::InvalidArgument`] → `"invalid_argument"`
/// - [`CryptoError::ConflictingArguments`] → `"conflicting_arguments"`
/// - [`CryptoError::KeyDerivationFailed`] → `"key_derivation_failed"`
/// - [`CryptoError::Io`] → `"io_error"`
/// - [`CryptoError::UnsupportedAlgorithm`] → `"unsupported_algorithm"`
/// - [`CryptoError::InvalidKey`] → `"invalid_key"`
/// - [`CryptoError::RandomUnavailable`] → `"random_unavailable"`
#[derive(Debug, Error)]
pub enum CryptoError {
    /// A configuration field holds a value outside its whitelist.
    #[error("invalid configuration: unsupported {field} value \"{value}\"")]
    InvalidConfiguration {
        /// Name of the offending field (e.g. `"cipher"`).
        field: &'static str,
        /// The rejected value, as supplied.
        value: String,
    },

    /// An argument has the wrong shape (short buffer, malformed encoding, bad range).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Two arguments were supplied together that cannot be combined.
    #[error("conflicting arguments: {0}")]
    ConflictingArguments(String),

    /// PBKDF2 key derivation did not complete.
    #[error("key derivation failed: {source}")]
    KeyDerivationFailed {
        /// The underlying cause.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Reading a file for digesting failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The requested key-pair algorithm is unknown or has no backend.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Key material is malformed or unusable for the requested operation.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The OS random number generator could not produce output.
    #[error("random source unavailable: {0}")]
    RandomUnavailable(String),
}

impl CryptoError {
    /// Wrap an arbitrary cause as [`CryptoError::KeyDerivationFailed`].
    pub fn key_derivation<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        CryptoError::KeyDerivationFailed {
            source: source.into(),
        }
    }

    /// Returns the short machine-readable code for this error class.
    pub fn kind(&self) -> &'static str {
        match self {
            CryptoError::InvalidConfiguration { .. } => "invalid_configuration",
            CryptoError::InvalidArgument(_) => "invalid_argument",
            CryptoError::ConflictingArguments(_) => "conflicting_arguments",
            CryptoError::KeyDerivationFailed { .. } => "key_derivation_failed",
            CryptoError::Io(_) => "io_error",
            CryptoError::UnsupportedAlgorithm(_) => "unsupported_algorithm",
            CryptoError::InvalidKey(_) => "invalid_key",
            CryptoError::RandomUnavailable(_) => "random_unavailable",
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type CryptoResult<T> = Result<T, CryptoError>;

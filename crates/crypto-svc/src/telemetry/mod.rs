//! Structured logging for processes embedding the crypto service.
//!
//! # Telemetry invariants
//!
//! - **No key material** appears in any log field: passwords, derived keys,
//!   private keys, plaintext and signatures are never logged. Events carry
//!   algorithm names, lengths and error kinds only.
//! - The level comes from `RUST_LOG` when set, otherwise from the configured
//!   `log_level` (default: `info`).

pub mod init;

pub use init::init;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Install a JSON `fmt` subscriber filtered at `log_level`.
///
/// A library never calls this itself; the embedding binary does, once.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been set.
pub fn init(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise crypto-svc tracing subscriber: {e}"))
}

//! Logging setup for the CLI
//!
//! Log lines go to stderr so they never mix with diff output on stdout.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset
#[must_use]
pub const fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else if cfg!(debug_assertions) {
        "info,micro_gen=debug"
    } else {
        "info"
    }
}

/// Initialize the tracing subscriber
///
/// # Example
///
/// ```rust,no_run
/// use micro_gen_cli::observability;
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init(false)?;
/// tracing::info!("Generator started");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_filter() {
        assert_eq!(default_filter(true), "debug");
        assert!(default_filter(false).starts_with("info"));
    }
}

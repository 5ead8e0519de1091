//! Tracing subscriber setup for hosts embedding the pipeline
//!
//! The library only emits `tracing` events. Installing a subscriber is left
//! to the host; [`setup_tracing`] is a ready-made one.

use anyhow::{anyhow, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Install a global subscriber writing to stdout
///
/// `format` is `"json"` for machine-readable lines; anything else gives
/// pretty, human-readable output. `RUST_LOG` overrides the default filter
/// when set.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose));

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = match format {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
    };

    installed.map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

/// Install a subscriber from the logging section of the configuration
pub fn setup_from_config(config: &LoggingConfig) -> Result<()> {
    let verbose = matches!(config.level.as_str(), "debug" | "trace");
    setup_tracing(&config.format, verbose)
}

fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("shoplens=debug,info")
    } else {
        EnvFilter::new("shoplens=info,warn")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_levels() {
        use tracing_subscriber::filter::LevelFilter;

        assert_eq!(default_filter(true).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(default_filter(false).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_second_install_fails() {
        // the first call may lose to another test in the same binary
        let _ = setup_tracing("text", false);
        assert!(setup_tracing("json", true).is_err());
    }
}

//! Logging setup shared by hook tools

use crate::hook_settings::LoggingSettings;
use anyhow::{Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` takes precedence over the configured level. Calling this again
/// after a subscriber is installed leaves the existing one in place.
pub fn init_tracing(settings: &LoggingSettings) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .with_context(|| format!("Invalid log level '{}'", settings.level))?;

    let installed = if settings.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };

    if installed.is_err() {
        debug!("tracing subscriber already installed, keeping it");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_repeatable() {
        let settings = LoggingSettings::default();
        assert!(init_tracing(&settings).is_ok());
        assert!(init_tracing(&LoggingSettings {
            level: "debug".to_string(),
            json: true,
        })
        .is_ok());
    }
}

//! Logging bootstrap

use crate::config::LoggingConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Build the log filter. `RUST_LOG` wins over the configured level.
pub fn build_filter(config: &LoggingConfig) -> crate::Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(&config.level)
        .map_err(|e| crate::Error::Config(format!("Invalid log level {:?}: {}", config.level, e)))
}

/// Install the global tracing subscriber.
///
/// Fails if the level cannot be parsed or a subscriber is already installed.
pub fn init(config: &LoggingConfig) -> crate::Result<()> {
    let filter = build_filter(config)?;

    let (json, text) = if config.format == "json" {
        (Some(fmt::layer().json().with_target(true)), None)
    } else {
        (None, Some(fmt::layer().with_target(true).with_level(true)))
    };

    tracing_subscriber::registry()
        .with(json)
        .with(text)
        .with(filter)
        .try_init()
        .map_err(|e| crate::Error::Internal(format!("Failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_directives() {
        let config = LoggingConfig {
            level: "info,mailtrust_core=debug".to_string(),
            format: "text".to_string(),
        };
        assert!(build_filter(&config).is_ok());
    }

    #[test]
    fn test_invalid_level_is_config_error() {
        // RUST_LOG takes precedence over the configured level.
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig {
            level: "mailtrust=verbose".to_string(),
            format: "text".to_string(),
        };

        let err = init(&config).unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    // The only test in this crate that installs the global subscriber.
    #[test]
    fn test_init_installs_subscriber_once() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: "json".to_string(),
        };

        assert!(init(&config).is_ok());

        let err = init(&config).unwrap_err();
        assert!(matches!(err, crate::Error::Internal(_)));
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }
}

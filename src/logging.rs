//! Logging setup helper for embedding applications.

use crate::config::LogConfig;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub struct LoggingGuard {
    // We need to keep this guard alive for logs to be flushed
    _guards: Vec<WorkerGuard>,
}

/// Install a global tracing subscriber per `config`.
///
/// Fails if a global subscriber is already set, in which case the embedding
/// application's subscriber simply keeps receiving this crate's events.
pub fn init(config: &LogConfig) -> Result<LoggingGuard, TryInitError> {
    let mut guards = Vec::new();

    let level_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::from_str(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = if config.console_logging_enabled {
        Some(fmt::layer().with_writer(std::io::stdout))
    } else {
        None
    };

    let file_layer = if config.file_logging_enabled {
        let file_appender =
            tracing_appender::rolling::daily(&config.log_dir, &config.file_name_prefix);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        guards.push(guard);
        // File logs shouldn't have ANSI colors
        Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(level_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    tracing::debug!("logging initialized");
    Ok(LoggingGuard { _guards: guards })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_installs_subscriber_once() {
        let config = LogConfig {
            console_logging_enabled: false,
            ..LogConfig::default()
        };
        // First call wins; a second call must report the conflict rather
        // than panic.
        let first = init(&config);
        let second = init(&config);
        assert!(first.is_ok());
        assert!(second.is_err());
    }
}

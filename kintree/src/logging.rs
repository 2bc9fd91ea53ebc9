//! Structured logging setup based on the tracing crate

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::{LogLevel, LoggingConfig};

/// Error type for logging operations
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Error in subscriber setup (usually: a subscriber is already set)
    #[error("Failed to set tracing subscriber: {0}")]
    Subscriber(String),
}

/// Initialize the global tracing subscriber from the logging configuration.
///
/// `RUST_LOG` overrides the configured level. Fails if a subscriber is
/// already installed; callers that share a process with other subscribers
/// should ignore that error.
pub fn init(config: &LoggingConfig) -> Result<(), LogError> {
    let level = match config.level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kintree={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| LogError::Subscriber(e.to_string()))
}

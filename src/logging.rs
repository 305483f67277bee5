//! Logging configuration for chatmbti

use std::path::Path;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{
    self,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

use crate::Result;

const LOGS_DIR: &str = "logs";
const LOG_FILE_PREFIX: &str = "chatmbti.log";

/// Initialize logging system with file output
pub fn init_logging() -> Result<()> {
    init_logging_with_config(None)
}

/// Initialize logging with configuration
pub fn init_logging_with_config(config: Option<&crate::config::AppConfig>) -> Result<()> {
    // RUST_LOG wins over the configured level
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match config {
        Some(config) => {
            let level = &config.logging.level;
            EnvFilter::new(format!("info,chatmbti={level}"))
        }
        None => EnvFilter::new("info,chatmbti=debug"),
    });

    let level = config.map_or("info", |c| c.logging.level.as_str());
    install(env_filter, level)
}

/// Initialize logging with custom log level
pub fn init_logging_with_level(level: &str) -> Result<()> {
    install(EnvFilter::new(format!("{level},chatmbti={level}")), level)
}

fn install(env_filter: EnvFilter, level: &str) -> Result<()> {
    let logs_dir = Path::new(LOGS_DIR);
    if !logs_dir.exists() {
        std::fs::create_dir_all(logs_dir)?;
    }

    let file_appender = tracing_appender::rolling::daily(LOGS_DIR, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking)
        .with_ansi(false); // No colors in file

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| crate::ChatMbtiError::ConfigError(format!("logging already set up: {e}")))?;

    tracing::info!("Logging initialized with level: {level} - console and file output enabled");
    tracing::info!("Log files will be saved to: {LOGS_DIR}/{LOG_FILE_PREFIX}.YYYY-MM-DD");

    // The writer thread must outlive main
    std::mem::forget(guard);

    Ok(())
}

/// Initialize simple logging for testing
pub fn init_simple_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_max_level(tracing::Level::INFO)
        .try_init()
        .map_err(|e| crate::ChatMbtiError::ConfigError(format!("logging already set up: {e}")))?;

    tracing::info!("Simple logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_logging_initialization() {
        // A second call must report an error instead of panicking
        let _ = init_simple_logging();
        assert!(init_simple_logging().is_err());
    }
}

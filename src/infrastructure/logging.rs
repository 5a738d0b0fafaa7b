//! Structured logging using the tracing crate.
//!
//! Configures a rolling file logger that writes to daily-rotated log
//! files under the XDG state directory. Does not output to the terminal,
//! which is reserved for feedback lines.

use std::path::PathBuf;
use std::sync::OnceLock;

use thiserror::Error;
use tracing_appender::rolling;
use tracing_subscriber::prelude::*;

/// Global non-blocking guard holder to keep the appender alive for the
/// program lifetime.
static APPENDER_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Logging initialization errors
#[derive(Debug, Clone, Error)]
pub enum LoggingError {
    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("Failed to create log directory: {0}")]
    CreateDirFailed(String),

    #[error("Logging already initialized")]
    AlreadyInitialized,
}

/// Initializes the logging system with file-based output.
///
/// Log level is controlled by the RUST_LOG environment variable
/// (defaults to "info").
pub fn init_logging() -> Result<(), LoggingError> {
    let log_dir = get_log_dir()?;

    let file_appender = rolling::daily(&log_dir, "voice-remote.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    APPENDER_GUARD
        .set(guard)
        .map_err(|_| LoggingError::AlreadyInitialized)?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_level(true)
                .with_ansi(false),
        )
        .init();

    tracing::debug!("Logging initialized. Log dir: {}", log_dir.display());
    Ok(())
}

/// Determines the log directory, following the XDG Base Directory
/// Specification: XDG_STATE_HOME if set, otherwise ~/.local/state.
fn get_log_dir() -> Result<PathBuf, LoggingError> {
    let log_dir = if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
        PathBuf::from(xdg_state).join("voice-remote")
    } else {
        let home = dirs::home_dir().ok_or(LoggingError::NoHomeDir)?;
        home.join(".local/state/voice-remote")
    };

    std::fs::create_dir_all(&log_dir)
        .map_err(|e| LoggingError::CreateDirFailed(e.to_string()))?;

    Ok(log_dir)
}

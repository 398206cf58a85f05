//! Tracing setup for the engine.
//!
//! Three subscriber layers: a pretty console layer, a daily-rotating
//! `insightbox.log` carrying everything the `RUST_LOG` filter admits, and a
//! second rotating file restricted to `warn` and above. Log files live under
//! the platform data directory.
//!
//! ```no_run
//! insightbox::logging::init().expect("Failed to initialize logging");
//! tracing::info!("Engine ready");
//! ```

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Gets the log directory path based on platform conventions
///
/// Returns:
/// - Windows: `%APPDATA%/insightbox/logs`
/// - macOS: `~/Library/Application Support/insightbox/logs`
/// - Linux: `~/.local/share/insightbox/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;

    let log_dir = base_dir.join("insightbox").join("logs");

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    Ok(log_dir)
}

/// Initializes the logging system with console and file output
///
/// Creates two log files, both rotating daily with 10 old files kept:
/// - `insightbox.log`: all log levels
/// - `error.log`: warnings and errors only
///
/// The default level is INFO; override with `RUST_LOG`.
///
/// # Errors
///
/// Returns error if the log directory cannot be created or file appenders fail
pub fn init() -> Result<()> {
    let log_dir = get_log_dir()?;

    let all_logs_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix("insightbox")
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create all-logs file appender")?;

    let error_logs_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix("error")
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create error-logs file appender")?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let stdout_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .pretty();

    let all_logs_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(all_logs_appender);

    let error_logs_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(error_logs_appender)
        .with_filter(EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(all_logs_layer)
        .with(error_logs_layer)
        .init();

    tracing::info!("Logging initialized, log directory: {:?}", log_dir);

    Ok(())
}

/// Gets the path to the current log file
pub fn get_current_log_path() -> Result<PathBuf> {
    let log_dir = get_log_dir()?;
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    Ok(log_dir.join(format!("insightbox.{today}.log")))
}

/// Gets the path to the current error log file
pub fn get_current_error_log_path() -> Result<PathBuf> {
    let log_dir = get_log_dir()?;
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    Ok(log_dir.join(format!("error.{today}.log")))
}

//! Logging Infrastructure
//!
//! `RUST_LOG` wins over the configured level when set.

use std::path::Path;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::EnvFilter;

/// Initialize the logger with optional JSON formatting and daily rolling file output
pub fn init_logger_with_file(log_level: &str, json: bool, log_dir: Option<&str>) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let file_appender = log_dir.and_then(file_writer);

    let result = match (json, file_appender) {
        (true, Some(writer)) => builder.json().with_writer(writer).try_init(),
        (true, None) => builder.json().try_init(),
        (false, Some(writer)) => builder.with_ansi(false).with_writer(writer).try_init(),
        (false, None) => builder.try_init(),
    };

    if let Err(e) = result {
        eprintln!("Logger already initialized: {e}");
    }
}

/// Daily rolling file in `dir`, creating the directory when missing.
/// Falls back to stdout (returns `None`) if it cannot be created.
fn file_writer(dir: &str) -> Option<RollingFileAppender> {
    if let Err(e) = std::fs::create_dir_all(Path::new(dir)) {
        eprintln!("Cannot create log directory {dir}: {e}; logging to stdout only");
        return None;
    }
    Some(tracing_appender::rolling::daily(dir, "hr-server"))
}

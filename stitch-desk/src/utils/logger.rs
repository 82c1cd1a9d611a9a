//! Logging Infrastructure
//!
//! Logs go to stderr (stdout carries the report) or, when a log directory is
//! configured, to a daily rolling file.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger with stderr output at `info`
pub fn init_logger() {
    init_logger_with_file(None, false, None);
}

/// Initialize the logger with optional JSON format and file output
///
/// Calling it again after a subscriber is installed has no effect.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        match std::fs::create_dir_all(log_path) {
            Ok(()) => {
                let file_appender = tracing_appender::rolling::daily(log_path, "stitch-desk");
                let builder = builder.with_ansi(false).with_writer(file_appender);
                let _ = if json {
                    builder.json().try_init()
                } else {
                    builder.try_init()
                };
                return;
            }
            Err(e) => eprintln!("log directory {} unusable ({}), logging to stderr", dir, e),
        }
    }

    let builder = builder.with_writer(std::io::stderr);
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_logger_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        init_logger_with_file(Some("debug"), true, log_dir.to_str());
        assert!(log_dir.is_dir());

        // Second call is a no-op
        init_logger();
    }
}

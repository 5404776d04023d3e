//! Logging Infrastructure
//!
//! Console output goes to stderr so command output on stdout stays clean.
//! With a log directory, a daily rotating file is written as well.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when neither `RUST_LOG` nor a level is given
pub const DEFAULT_FILTER: &str = "valet_console=info,valet_client=info";

/// File name prefix of the rotating log
pub const LOG_FILE_PREFIX: &str = "valet-console";

/// `RUST_LOG` wins, then `level`, then [`DEFAULT_FILTER`]
pub fn env_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match level {
        Some(level) => EnvFilter::new(format!("valet_console={level},valet_client={level}")),
        None => EnvFilter::new(DEFAULT_FILTER),
    })
}

/// Initialize the logging system
///
/// * `level` - Log level for the console crates (e.g. "info", "debug")
/// * `log_dir` - Optional directory for the daily rotating file
pub fn init_logger(level: Option<&str>, log_dir: Option<&Path>) -> std::io::Result<()> {
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(console_layer);

    if let Some(dir) = log_dir {
        fs::create_dir_all(dir)?;
        let file_log = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
        let file_layer = fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(Mutex::new(file_log));
        registry.with(file_layer).init();
        tracing::debug!(path = %dir.display(), "File logging enabled");
    } else {
        registry.init();
    }

    Ok(())
}

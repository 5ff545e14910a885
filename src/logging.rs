//! File-based logging.
//!
//! The terminal UI owns stdout, so log output only goes to
//! `bosswatch.log` in the data directory. Set `DEBUG_LOGGING=1` for debug
//! output from bosswatch itself, or `RUST_LOG` for a custom filter.

use crate::core::constants::LOG_FILE_NAME;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn filter() -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let directive = if std::env::var("DEBUG_LOGGING").is_ok() {
        "info,bosswatch=debug"
    } else {
        "info"
    };
    EnvFilter::new(directive)
}

/// Initialize logging into `dir`.
///
/// Returns a `WorkerGuard` that MUST be held for the application lifetime so
/// buffered lines are flushed on exit. Returns `None` (and logs nothing) if
/// the log file or the subscriber could not be set up.
pub fn init(dir: &Path) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let file_appender = match RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(dir)
    {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Failed to create log file in {:?}: {}", dir, e);
            return None;
        }
    };
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    if let Err(e) = tracing_subscriber::registry()
        .with(file_layer)
        .with(filter())
        .try_init()
    {
        eprintln!("Failed to initialize logging: {}", e);
        return None;
    }

    tracing::info!(log_file = ?dir.join(LOG_FILE_NAME), "bosswatch logging initialized");
    Some(guard)
}

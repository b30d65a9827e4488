//! Log file setup for dirview.
//!
//! The screen belongs to the browser, so tracing output goes to a file through
//! a non-blocking appender. Keep the returned [WorkerGuard] alive until exit or
//! buffered lines are lost.

use crate::config::InternalGeneral;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding an EnvFilter directive; wins over `general.log_level`.
pub const LOG_ENV: &str = "DIRVIEW_LOG";

const FALLBACK_DIRECTIVE: &str = "warn";

/// Installs the global subscriber writing to the configured log file.
///
/// Returns None, and logs nowhere, when the log file cannot be set up.
pub fn init(general: &InternalGeneral) -> Option<WorkerGuard> {
    let path = log_path(general)?;
    let dir = path.parent()?;
    let file_name = path.file_name()?.to_string_lossy().into_owned();
    fs::create_dir_all(dir).ok()?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .ok()?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let directive = filter_directive(std::env::var(LOG_ENV).ok(), general.log_level());
    let filter =
        EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(FALLBACK_DIRECTIVE));

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_filter(filter);

    // A subscriber that is already installed keeps receiving events.
    let _ = tracing_subscriber::registry().with(file_layer).try_init();
    tracing::info!(path = %path.display(), %directive, "logging started");
    Some(guard)
}

/// `general.log_file`, or `dirview/dirview.log` in the platform state or cache directory.
pub fn log_path(general: &InternalGeneral) -> Option<PathBuf> {
    if let Some(path) = general.log_file() {
        return Some(path.to_path_buf());
    }
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .map(|base| default_log_file(&base))
}

fn default_log_file(base: &Path) -> PathBuf {
    base.join("dirview").join("dirview.log")
}

/// Picks the filter directive: a non-empty environment value first, then the
/// configured level, then `warn`.
pub fn filter_directive(env: Option<String>, configured: &str) -> String {
    match env {
        Some(value) if !value.trim().is_empty() => value,
        _ if !configured.trim().is_empty() => configured.to_string(),
        _ => FALLBACK_DIRECTIVE.to_string(),
    }
}

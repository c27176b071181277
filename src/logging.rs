//! `tracing` subscriber setup for embedders.

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use crate::settings::Settings;
use crate::util::paths;

/// Timestamp format: `YYYY-MM-DD-T HH:MM:SS` (UTC).
struct MealscopeTimer;

impl tracing_subscriber::fmt::time::FormatTime for MealscopeTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Utc::now().format("%Y-%m-%d-T %H:%M:%S");
        write!(w, "{ts}")
    }
}

/// Keeps the non-blocking writer flushing for the life of the process.
static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Install the global `tracing` subscriber.
///
/// Inputs:
/// - `settings`: Supplies the default filter (`log_level`) used when `RUST_LOG` is unset
///
/// Output:
/// - Logs go to `<config_dir>/logs/mealscope.log`; falls back to stderr when the file
///   cannot be opened.
///
/// Details:
/// - Safe to call more than once: later calls leave the first subscriber in place.
pub fn init(settings: &Settings) {
    init_in(&paths::logs_dir(), settings);
}

/// Same as [`init`] but logging into `dir`.
pub fn init_in(dir: &Path, settings: &Settings) {
    let _ = std::fs::create_dir_all(dir);
    let log_path = dir.join("mealscope.log");
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level))
    };
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let installed = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(MealscopeTimer)
                .try_init()
                .is_ok();
            if installed {
                let _ = LOG_GUARD.set(guard);
                tracing::info!(path = %log_path.display(), "[Logging] Initialized");
            }
        }
        Err(e) => {
            let installed = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_timer(MealscopeTimer)
                .try_init()
                .is_ok();
            if installed {
                tracing::warn!(error = %e, "[Logging] Failed to open log file; using stderr");
            }
        }
    }
}

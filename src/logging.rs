use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_ENV: &str = "MPICK_LOG";
const DEFAULT_FILTER: &str = "mpick=debug";

pub fn default_log_dir() -> PathBuf {
    let mut path = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    path.push(".mpick");
    path.push("logs");
    path
}

/// Install a daily-rolling file logger when `MPICK_LOG` is set or a log
/// directory is given. The terminal belongs to the UI, so nothing is ever
/// logged to stdout or stderr. Keep the guard alive until exit.
pub fn init(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = std::env::var(LOG_ENV).ok();
    if env_filter.is_none() && log_dir.is_none() {
        return None;
    }

    let dir = log_dir.map(Path::to_path_buf).unwrap_or_else(default_log_dir);
    if std::fs::create_dir_all(&dir).is_err() {
        return None;
    }
    let filter = env_filter
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string());

    let file_appender = tracing_appender::rolling::daily(&dir, "mpick.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let installed = tracing_subscriber::registry()
        .with(EnvFilter::new(&filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer),
        )
        .try_init();
    if installed.is_err() {
        return None;
    }

    tracing::info!(dir = %dir.display(), filter = %filter, "logging started");
    Some(guard)
}

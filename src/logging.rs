//! Logging setup shared by the desktop app and the CLI.
//!
//! Installs a global tracing subscriber with a console layer and a per-launch
//! file under `.carbonflo/logs`. Only the newest files are kept.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::OnceLock,
    time::SystemTime,
};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs;

/// Maximum number of log files to retain.
const MAX_LOG_FILES: usize = 10;
const LOG_FILE_PREFIX: &str = "carbonflo";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Where console output goes.
///
/// The CLI prints results on stdout, so its diagnostics must stay on stderr.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleTarget {
    Stdout,
    Stderr,
}

/// Reasons logging could not be set up.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error(transparent)]
    Dirs(#[from] app_dirs::AppDirError),
    #[error("Log file error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to format log file name: {0}")]
    FormatTime(#[from] time::error::Format),
    #[error("A global tracing subscriber is already installed: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

impl LoggingError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Install the console and file layers.
///
/// Repeat calls do nothing. On error the caller keeps running without logs.
pub fn init(console: ConsoleTarget) -> Result<(), LoggingError> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    let log_dir = app_dirs::logs_dir()?;
    let file_name = format_log_file_name(now_local_or_utc())?;
    let log_path = log_dir.join(&file_name);
    ensure_file_exists(&log_path)?;
    prune_old_logs(&log_dir, MAX_LOG_FILES)?;

    let (file_writer, guard) = tracing_appender::non_blocking(rolling::never(&log_dir, file_name));
    let timer = local_timer();
    let console_layer = match console {
        ConsoleTarget::Stdout => fmt::layer()
            .with_timer(timer.clone())
            .with_writer(std::io::stdout)
            .boxed(),
        ConsoleTarget::Stderr => fmt::layer()
            .with_timer(timer.clone())
            .with_writer(std::io::stderr)
            .boxed(),
    };
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_timer(timer)
        .with_writer(file_writer);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        Registry::default()
            .with(filter)
            .with(console_layer)
            .with(file_layer),
    )?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!(log_file = %log_path.display(), "Logging initialized");
    Ok(())
}

fn ensure_file_exists(path: &Path) -> Result<(), LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(LoggingError::io(path))?;
    Ok(())
}

/// Keep the `max_files` most recently modified `.log` files in `dir`.
fn prune_old_logs(dir: &Path, max_files: usize) -> Result<(), LoggingError> {
    let mut logs = Vec::new();
    for entry in fs::read_dir(dir).map_err(LoggingError::io(dir))?.flatten() {
        let path = entry.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != "log") {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|meta| meta.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        logs.push((modified, path));
    }

    logs.sort_by(|a, b| b.cmp(a));
    for (_, path) in logs.into_iter().skip(max_files) {
        fs::remove_file(&path).map_err(LoggingError::io(&path))?;
    }
    Ok(())
}

fn format_log_file_name(now: OffsetDateTime) -> Result<String, LoggingError> {
    const NAME_FORMAT: &[FormatItem<'_>] =
        format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    Ok(format!("{LOG_FILE_PREFIX}_{}.log", now.format(NAME_FORMAT)?))
}

/// Local wall-clock timestamps, UTC when the offset cannot be determined.
fn local_timer() -> fmt::time::OffsetTime<time::format_description::BorrowedFormatItem<'static>> {
    const DISPLAY_FORMAT: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, DISPLAY_FORMAT.into())
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{thread, time::Duration};
    use tempfile::tempdir;

    fn count_logs(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "log"))
            .count()
    }

    #[test]
    fn log_filename_has_timestamp_and_prefix() {
        let fixed = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let name = format_log_file_name(fixed).unwrap();
        assert_eq!(name, "carbonflo_2023-11-14_22-13-20.log");
    }

    #[test]
    fn prune_keeps_newest_files() {
        let dir = tempdir().unwrap();
        for idx in 0..12 {
            ensure_file_exists(&dir.path().join(format!("carbonflo_{idx}.log"))).unwrap();
            thread::sleep(Duration::from_millis(10));
        }

        prune_old_logs(dir.path(), 10).unwrap();
        assert_eq!(count_logs(dir.path()), 10);
        assert!(!dir.path().join("carbonflo_0.log").exists());
        assert!(dir.path().join("carbonflo_11.log").exists());
    }

    #[test]
    fn prune_ignores_non_log_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "").unwrap();
        ensure_file_exists(&dir.path().join("carbonflo_a.log")).unwrap();
        prune_old_logs(dir.path(), 0).unwrap();
        assert_eq!(count_logs(dir.path()), 0);
        assert!(dir.path().join("config.toml").exists());
    }
}

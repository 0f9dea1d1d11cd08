use std::{fs, path::Path};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::infra::{config::LogConfig, error::AppError};

pub const LOG_FILE_NAME: &str = "rtchat.log";

/// Installs the global subscriber writing to a log file.
///
/// The terminal belongs to the TUI, so nothing is written to stdout. `RUST_LOG`
/// takes precedence over the configured level. Keep the returned guard alive
/// until exit or buffered lines are lost.
pub fn init(config: &LogConfig, default_dir: &Path) -> Result<WorkerGuard, AppError> {
    let dir = config
        .dir
        .clone()
        .unwrap_or_else(|| default_dir.to_path_buf());
    fs::create_dir_all(&dir).map_err(|source| AppError::StorageDirCreate {
        path: dir.clone(),
        source,
    })?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&dir, LOG_FILE_NAME));

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level)),
        )
        .with_target(true)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(AppError::LoggingInit)?;

    Ok(guard)
}

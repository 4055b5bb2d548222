use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::infra::{config::LogConfig, error::AppError, storage_layout::StorageLayout};

/// Installs the global subscriber writing to a log file. The TUI owns the
/// terminal, so nothing is ever logged to stdout or stderr.
///
/// The returned guard flushes buffered lines on drop and must live until the
/// process exits.
pub fn init(config: &LogConfig, layout: &StorageLayout) -> Result<WorkerGuard, AppError> {
    let log_path = resolve_log_path(config, layout);
    let (dir, file_name) = split_log_path(&log_path)?;

    fs::create_dir_all(&dir).map_err(|source| AppError::LogDirCreate {
        path: dir.clone(),
        source,
    })?;

    let appender = tracing_appender::rolling::never(&dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level)),
        )
        .with_target(true)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(AppError::LoggingInit)?;

    tracing::debug!(path = %log_path.display(), "logging initialized");

    Ok(guard)
}

fn resolve_log_path(config: &LogConfig, layout: &StorageLayout) -> PathBuf {
    config.file.clone().unwrap_or_else(|| layout.log_file())
}

fn split_log_path(path: &Path) -> Result<(PathBuf, PathBuf), AppError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| AppError::StoragePathResolution {
            details: format!("log path {} has no file name", path.display()),
        })?;

    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok((dir, PathBuf::from(file_name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> StorageLayout {
        StorageLayout {
            log_dir: PathBuf::from("/state/tgids"),
        }
    }

    #[test]
    fn defaults_to_layout_log_file() {
        let path = resolve_log_path(&LogConfig::default(), &layout());

        assert_eq!(path, PathBuf::from("/state/tgids/tgids.log"));
    }

    #[test]
    fn configured_file_overrides_layout() {
        let config = LogConfig {
            file: Some(PathBuf::from("/tmp/custom.log")),
            ..LogConfig::default()
        };

        assert_eq!(
            resolve_log_path(&config, &layout()),
            PathBuf::from("/tmp/custom.log")
        );
    }

    #[test]
    fn bare_file_name_is_relative_to_working_dir() {
        let (dir, file) = split_log_path(Path::new("tgids.log")).expect("path should split");

        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(file, PathBuf::from("tgids.log"));
    }

    #[test]
    fn path_without_file_name_is_rejected() {
        let error = split_log_path(Path::new("/")).expect_err("must fail");

        assert!(matches!(error, AppError::StoragePathResolution { .. }));
    }
}

use std::path::PathBuf;

use crate::infra::error::AppError;

const APP_DIR_NAME: &str = "tgids";
const LOG_FILE_NAME: &str = "tgids.log";

/// Where tgids keeps files it writes on its own. The bot token is never
/// persisted, so logs are the only thing here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub log_dir: PathBuf,
}

impl StorageLayout {
    /// Resolves the platform state dir (falling back to the cache dir where
    /// there is no such concept, e.g. macOS and Windows).
    pub fn resolve() -> Result<Self, AppError> {
        let base = dirs::state_dir()
            .or_else(dirs::cache_dir)
            .ok_or_else(|| AppError::StoragePathResolution {
                details: "unable to resolve state or cache directory".into(),
            })?;

        Ok(Self {
            log_dir: base.join(APP_DIR_NAME),
        })
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_lives_under_app_dir() {
        let layout = StorageLayout {
            log_dir: PathBuf::from("/var/lib/example/tgids"),
        };

        assert_eq!(
            layout.log_file(),
            PathBuf::from("/var/lib/example/tgids/tgids.log")
        );
    }

    #[test]
    fn resolved_layout_is_namespaced() {
        if let Ok(layout) = StorageLayout::resolve() {
            assert!(layout.log_dir.ends_with(APP_DIR_NAME));
        }
    }
}

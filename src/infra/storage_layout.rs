use std::path::PathBuf;

use crate::infra::error::AppError;

const APP_DIR_NAME: &str = "rtchat";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl StorageLayout {
    pub fn resolve() -> Result<Self, AppError> {
        let base = dirs::data_local_dir().ok_or_else(|| AppError::StoragePathResolution {
            details: "unable to resolve local data directory (XDG_DATA_HOME/HOME)".into(),
        })?;

        Ok(Self::under(base))
    }

    pub fn under(base: PathBuf) -> Self {
        let data_dir = base.join(APP_DIR_NAME);
        let log_dir = data_dir.join("logs");

        Self { data_dir, log_dir }
    }
}

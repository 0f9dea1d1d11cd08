use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::infra::{
    config::{load, AppConfig},
    contracts::ConfigAdapter,
};

/// Loads TOML configuration from an explicit path or `./config.toml`.
#[derive(Debug, Clone, Default)]
pub struct FileConfigAdapter {
    path: Option<PathBuf>,
}

impl FileConfigAdapter {
    pub fn new(path: Option<&Path>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
        }
    }
}

impl ConfigAdapter for FileConfigAdapter {
    fn load(&self) -> Result<AppConfig> {
        let config = load(self.path.as_deref())?;
        tracing::debug!(
            path = ?self.path,
            endpoint = %config.relay.endpoint_url,
            "configuration loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_explicit_file_falls_back_to_defaults() {
        let adapter = FileConfigAdapter::new(Some(Path::new("./no-such-rtchat.toml")));

        let config = adapter.load().expect("defaults must load");

        assert_eq!(config, AppConfig::default());
    }
}

use std::path::PathBuf;

use serde::Deserialize;

use crate::infra::config::{AppConfig, IdentityConfig, LogConfig, RelayConfig};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub relay: Option<FileRelayConfig>,
    pub identity: Option<FileIdentityConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(relay) = self.relay {
            relay.merge_into(&mut config.relay);
        }

        if let Some(identity) = self.identity {
            identity.merge_into(&mut config.identity);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
    pub dir: Option<PathBuf>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }

        if let Some(dir) = self.dir {
            config.dir = Some(dir);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileRelayConfig {
    pub endpoint_url: Option<String>,
    pub reconnect_delay_ms: Option<u64>,
    pub reconnect_delay_max_ms: Option<u64>,
    pub connect_timeout_ms: Option<u64>,
}

impl FileRelayConfig {
    fn merge_into(self, config: &mut RelayConfig) {
        if let Some(endpoint_url) = self.endpoint_url {
            config.endpoint_url = endpoint_url;
        }

        if let Some(delay_ms) = self.reconnect_delay_ms {
            config.reconnect_delay_ms = delay_ms;
        }

        if let Some(delay_max_ms) = self.reconnect_delay_max_ms {
            config.reconnect_delay_max_ms = delay_max_ms;
        }

        if let Some(timeout_ms) = self.connect_timeout_ms {
            config.connect_timeout_ms = timeout_ms;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileIdentityConfig {
    pub display_name: Option<String>,
}

impl FileIdentityConfig {
    fn merge_into(self, config: &mut IdentityConfig) {
        if let Some(display_name) = self.display_name {
            config.display_name = display_name;
        }
    }
}

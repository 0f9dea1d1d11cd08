use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::identity::FALLBACK_DISPLAY_NAME;

/// Relay the original web client talked to.
pub const DEFAULT_RELAY_ENDPOINT: &str = "https://study-realtime-chatapp-server.vercel.app";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub relay: RelayConfig,
    pub identity: IdentityConfig,
}

impl AppConfig {
    /// Applies command-line overrides on top of file and default values.
    pub fn apply_overrides(&mut self, endpoint: Option<&str>, display_name: Option<&str>) {
        if let Some(endpoint) = endpoint {
            self.relay.endpoint_url = endpoint.to_owned();
        }

        if let Some(display_name) = display_name {
            self.identity.display_name = display_name.to_owned();
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    /// Log directory; the per-user data directory when unset.
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelayConfig {
    pub endpoint_url: String,
    pub reconnect_delay_ms: u64,
    pub reconnect_delay_max_ms: u64,
    pub connect_timeout_ms: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_RELAY_ENDPOINT.to_owned(),
            reconnect_delay_ms: 1_000,
            reconnect_delay_max_ms: 5_000,
            connect_timeout_ms: 20_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Initial content of the name field.
    pub display_name: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            display_name: FALLBACK_DISPLAY_NAME.to_owned(),
        }
    }
}

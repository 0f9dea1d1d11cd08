use std::path::PathBuf;

use thiserror::Error;

use crate::relay::RelayError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to initialize logging: {0}")]
    LoggingInit(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("failed to resolve storage path: {details}")]
    StoragePathResolution { details: String },
    #[error("failed to create directory {path}: {source}")]
    StorageDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to build async runtime: {0}")]
    RuntimeBuild(#[source] std::io::Error),
    #[error("failed to start relay session: {0}")]
    Relay(#[from] RelayError),
    #[error("chat shell was already composed for this session")]
    ShellAlreadyComposed,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

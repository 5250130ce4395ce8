use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading, validating or writing configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("configuration field 'endpoint' must not be empty")]
    MissingEndpoint,

    #[error("configuration field 'model' must not be empty")]
    MissingModel,

    #[error("configuration file already exists at {path:?}")]
    AlreadyExists { path: PathBuf },

    #[error("failed to write config to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

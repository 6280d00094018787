//! Typed errors for configuration and the LCD device

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: &'static str },
}

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("LCD device not found at {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write to LCD device {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

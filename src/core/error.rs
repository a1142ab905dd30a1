//! Error types for sloeval.

use crate::plugin::PluginError;
use thiserror::Error;

/// Result type alias for sloeval operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading configuration or running an evaluation.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid SLO window '{0}'")]
    InvalidWindow(String),

    // Plugin errors are passed through untouched
    #[error(transparent)]
    Plugin(#[from] PluginError),

    // Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            Error::DeserializationError(err.to_string())
        } else {
            Error::SerializationError(err.to_string())
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::DeserializationError(err.to_string())
    }
}

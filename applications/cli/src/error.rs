/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Usage: {0}")]
    Usage(String),

    #[error(transparent)]
    Groove(#[from] groove_core::GrooveError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }
}

impl From<groove_storage::StorageError> for CliError {
    fn from(err: groove_storage::StorageError) -> Self {
        CliError::Groove(err.into())
    }
}

impl From<groove_metadata::MetadataError> for CliError {
    fn from(err: groove_metadata::MetadataError) -> Self {
        CliError::Groove(err.into())
    }
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

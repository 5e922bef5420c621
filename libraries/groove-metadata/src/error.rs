/// Metadata-specific errors
use thiserror::Error;

/// Result type alias using `MetadataError`
pub type Result<T> = std::result::Result<T, MetadataError>;

#[derive(Error, Debug)]
pub enum MetadataError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Embedded cover art over the size limit
    #[error("Cover art too large: {size} bytes (max {max})")]
    CoverTooLarge { size: usize, max: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),
}

impl From<MetadataError> for groove_core::GrooveError {
    fn from(err: MetadataError) -> Self {
        groove_core::GrooveError::metadata(err.to_string())
    }
}

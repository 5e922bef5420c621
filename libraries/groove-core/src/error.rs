/// Core error types for Groove Player
use thiserror::Error;
use crate::types::{PlaylistId, SongId};

/// Result type alias using `GrooveError`
pub type Result<T> = std::result::Result<T, GrooveError>;

/// Core error type for Groove Player
///
/// All failures are local to the running session. Extraction and persistence
/// failures are swallowed at their boundary; only playback-source failures
/// reach the user.
#[derive(Error, Debug)]
pub enum GrooveError {
    /// Tag extraction failed or returned partial data
    #[error("Metadata extraction degraded: {0}")]
    ImportDegraded(String),

    /// The song's playable source is gone (its producing session ended)
    #[error("Source for song {0} is no longer available, re-import the file")]
    SourceInvalidated(SongId),

    /// Advance/play requested on an empty queue
    #[error("Queue is empty")]
    QueueEmpty,

    /// Durable store write or read failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Attempt to delete a protected playlist
    #[error("Playlist {0} cannot be deleted")]
    GuardedDeletion(PlaylistId),

    /// Playlist not found
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// Song not found
    #[error("Song not found: {0}")]
    SongNotFound(SongId),

    /// Index out of bounds
    #[error("Index out of bounds: {index} (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The audio engine refused to start playback
    #[error("Playback rejected: {0}")]
    PlaybackRejected(String),

    /// Metadata parsing errors
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl GrooveError {
    /// Create a persistence error
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Create a metadata error
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }

    /// Create a playback rejected error
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::PlaybackRejected(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether this failure should be shown to the user
    ///
    /// Only playback-source failures are surfaced; everything else is logged.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::SourceInvalidated(_) | Self::PlaybackRejected(_))
    }
}

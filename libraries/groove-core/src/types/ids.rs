/// ID types for Groove Player entities
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Reserved identifier of the default favorites playlist
pub const FAVORITES_PLAYLIST_ID: &str = "fav";

/// Song identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(String);

impl SongId {
    /// Create a song ID from an existing value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random song ID
    pub fn generate() -> Self {
        Self(format!("song_{}", Uuid::new_v4().simple()))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SongId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Playlist identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistId(String);

impl PlaylistId {
    /// Create a playlist ID from an existing value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random playlist ID
    ///
    /// Generated IDs carry a `pl_` prefix and can never collide with the
    /// reserved favorites ID.
    pub fn generate() -> Self {
        Self(format!("pl_{}", Uuid::new_v4().simple()))
    }

    /// The reserved ID of the default favorites playlist
    pub fn favorites() -> Self {
        Self(FAVORITES_PLAYLIST_ID.to_string())
    }

    /// Whether this is the reserved favorites ID
    pub fn is_favorites(&self) -> bool {
        self.0 == FAVORITES_PLAYLIST_ID
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlaylistId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

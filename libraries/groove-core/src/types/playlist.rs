/// Playlist domain types
use crate::types::{PlaylistId, SongId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display name of the default playlist
pub const FAVORITES_PLAYLIST_NAME: &str = "Favorites";

/// A named, ordered collection of song references
///
/// `song_ids` may hold stale references (songs deleted from the library in
/// an earlier session); readers filter them out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Song references in play order
    #[serde(default)]
    pub song_ids: Vec<SongId>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Playlist {
    /// Create a new, empty user playlist
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PlaylistId::generate(),
            name: name.into(),
            song_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// The default favorites playlist
    pub fn favorites() -> Self {
        Self {
            id: PlaylistId::favorites(),
            name: FAVORITES_PLAYLIST_NAME.to_string(),
            song_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Whether this is the non-deletable default playlist
    pub fn is_default(&self) -> bool {
        self.id.is_favorites()
    }

    pub fn contains(&self, id: &SongId) -> bool {
        self.song_ids.contains(id)
    }
}

/// Browsing views
use crate::types::PlaylistId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named source of songs the user can browse
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum View {
    /// Every imported song, in import order
    #[default]
    Library,

    /// Recently played songs, most recent first
    History,

    /// A specific playlist, in its custom order
    Playlist(PlaylistId),
}

impl View {
    /// Playlist ID if this is a playlist view
    pub fn playlist_id(&self) -> Option<&PlaylistId> {
        match self {
            Self::Playlist(id) => Some(id),
            Self::Library | Self::History => None,
        }
    }

    /// Whether rows in this view can be reordered by dragging
    pub fn is_reorderable(&self) -> bool {
        matches!(self, Self::Playlist(_))
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Library => write!(f, "library"),
            Self::History => write!(f, "history"),
            Self::Playlist(id) => write!(f, "playlist:{}", id),
        }
    }
}

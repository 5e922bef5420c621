//! View queries
//!
//! Derives the song list for the active view: the whole library, recent
//! history, or one playlist, narrowed by an optional search term.

use crate::{library::Library, playlists::PlaylistManager};
use groove_core::types::{Song, SongId, View};

/// Everything a view query reads
#[derive(Debug, Clone, Copy)]
pub struct ViewSources<'a> {
    pub library: &'a Library,
    pub playlists: &'a PlaylistManager,
    /// Recently played IDs, most recent first
    pub history: &'a [SongId],
}

impl<'a> ViewSources<'a> {
    /// Songs visible in `view`, filtered by `term`
    ///
    /// Matching is a case-insensitive substring test on title or artist. An
    /// empty term matches everything. Order follows the view's own order:
    /// import order for the library, most recent first for history, stored
    /// order for playlists. References to songs that no longer exist are
    /// skipped. An unknown playlist yields an empty list.
    pub fn songs(&self, view: &View, term: &str) -> Vec<Song> {
        let needle = term.trim().to_lowercase();

        let songs = match view {
            View::Library => self.library.songs().to_vec(),
            View::History => self.library.resolve(self.history),
            View::Playlist(id) => self
                .playlists
                .get(id)
                .map(|p| self.library.resolve(&p.song_ids))
                .unwrap_or_default(),
        };

        if needle.is_empty() {
            songs
        } else {
            songs
                .into_iter()
                .filter(|s| s.matches_lowercase(&needle))
                .collect()
        }
    }
}

//! Playlist manager
//!
//! Named, ordered collections of song references, including the
//! non-deletable favorites playlist.

use groove_core::{
    error::{GrooveError, Result},
    reorder::move_item,
    types::{Playlist, PlaylistId, SongId},
};
use std::collections::HashSet;
use tracing::debug;

/// Owns every playlist, default first
#[derive(Debug, Clone)]
pub struct PlaylistManager {
    playlists: Vec<Playlist>,
}

impl PlaylistManager {
    /// Create a manager holding only the favorites playlist
    pub fn new() -> Self {
        Self {
            playlists: vec![Playlist::favorites()],
        }
    }

    /// Rebuild from a stored snapshot
    ///
    /// Duplicate IDs keep the first entry. The favorites playlist is put back
    /// at the front if the snapshot lacks it.
    pub fn restore(snapshot: Vec<Playlist>) -> Self {
        let mut seen = HashSet::new();
        let mut playlists: Vec<Playlist> = snapshot
            .into_iter()
            .filter(|p| seen.insert(p.id.clone()))
            .collect();

        if !playlists.iter().any(Playlist::is_default) {
            playlists.insert(0, Playlist::favorites());
        }

        Self { playlists }
    }

    /// Create an empty playlist with a fresh ID
    pub fn create(&mut self, name: &str) -> Result<PlaylistId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GrooveError::invalid_input("playlist name cannot be empty"));
        }

        let playlist = Playlist::new(name);
        let id = playlist.id.clone();
        debug!(playlist = %id, name, "Created playlist");
        self.playlists.push(playlist);
        Ok(id)
    }

    /// Delete a playlist
    ///
    /// The favorites playlist is guarded and rejected before any mutation.
    /// If the deleted playlist was the active view, the caller switches the
    /// view back to the library.
    pub fn delete(&mut self, id: &PlaylistId) -> Result<Playlist> {
        if id.is_favorites() {
            return Err(GrooveError::GuardedDeletion(id.clone()));
        }

        let pos = self.position(id)?;
        let removed = self.playlists.remove(pos);
        debug!(playlist = %id, "Deleted playlist");
        Ok(removed)
    }

    /// Rename a playlist
    pub fn rename(&mut self, id: &PlaylistId, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GrooveError::invalid_input("playlist name cannot be empty"));
        }
        self.get_mut(id)?.name = name.to_string();
        Ok(())
    }

    /// Append songs not already present
    ///
    /// Returns how many were actually added.
    pub fn add_songs(&mut self, id: &PlaylistId, song_ids: &[SongId]) -> Result<usize> {
        let playlist = self.get_mut(id)?;
        let mut present: HashSet<SongId> = playlist.song_ids.iter().cloned().collect();

        let before = playlist.song_ids.len();
        for song_id in song_ids {
            if present.insert(song_id.clone()) {
                playlist.song_ids.push(song_id.clone());
            }
        }

        Ok(playlist.song_ids.len() - before)
    }

    /// Remove every occurrence of a song from one playlist
    pub fn remove_song(&mut self, id: &PlaylistId, song_id: &SongId) -> Result<usize> {
        let playlist = self.get_mut(id)?;
        let before = playlist.song_ids.len();
        playlist.song_ids.retain(|s| s != song_id);
        Ok(before - playlist.song_ids.len())
    }

    /// Remove a song from every playlist (deletion cascade)
    ///
    /// Returns `true` if any playlist changed.
    pub fn remove_song_everywhere(&mut self, song_id: &SongId) -> bool {
        let mut changed = false;
        for playlist in &mut self.playlists {
            let before = playlist.song_ids.len();
            playlist.song_ids.retain(|s| s != song_id);
            changed |= playlist.song_ids.len() != before;
        }
        changed
    }

    /// Move a song within a playlist's custom order
    pub fn reorder(&mut self, id: &PlaylistId, from: usize, to: usize) -> Result<()> {
        move_item(&mut self.get_mut(id)?.song_ids, from, to)
    }

    pub fn get(&self, id: &PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &PlaylistId) -> bool {
        self.get(id).is_some()
    }

    /// All playlists, favorites first
    pub fn all(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    fn position(&self, id: &PlaylistId) -> Result<usize> {
        self.playlists
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| GrooveError::PlaylistNotFound(id.clone()))
    }

    fn get_mut(&mut self, id: &PlaylistId) -> Result<&mut Playlist> {
        let pos = self.position(id)?;
        Ok(&mut self.playlists[pos])
    }
}

impl Default for PlaylistManager {
    fn default() -> Self {
        Self::new()
    }
}

//! In-memory durable store
//!
//! Used for `--in-memory` sessions and tests. Records go through the same
//! JSON encoding as the redb store, so session-only fields (source handles)
//! are dropped exactly as they would be on disk.
//!
//! Clones share the same data, which lets a test keep a handle after
//! boxing the store into a playback manager.

use crate::error::Result;
use groove_core::{
    traits::DurableStore,
    types::{Playlist, Song, SongId},
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Inner {
    /// (id, encoded song) in insertion order
    songs: Vec<(SongId, Vec<u8>)>,
    playlists: Option<Vec<u8>>,
}

/// Shared in-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored songs
    pub fn song_count(&self) -> usize {
        self.lock().songs.len()
    }

    pub fn contains(&self, id: &SongId) -> bool {
        self.lock().songs.iter().any(|(stored, _)| stored == id)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn decode_all(&self) -> Result<Vec<Song>> {
        let inner = self.lock();
        let mut songs = Vec::with_capacity(inner.songs.len());
        for (_, bytes) in &inner.songs {
            songs.push(serde_json::from_slice(bytes)?);
        }
        Ok(songs)
    }

    fn decode_playlists(&self) -> Result<Option<Vec<Playlist>>> {
        let inner = self.lock();
        let playlists = match &inner.playlists {
            Some(bytes) => Some(serde_json::from_slice(bytes)?),
            None => None,
        };
        Ok(playlists)
    }
}

impl DurableStore for MemoryStore {
    fn upsert(&mut self, song: &Song) -> groove_core::Result<()> {
        let bytes = serde_json::to_vec(song)?;
        let mut inner = self.lock();
        match inner.songs.iter_mut().find(|(id, _)| id == &song.id) {
            Some((_, existing)) => *existing = bytes,
            None => inner.songs.push((song.id.clone(), bytes)),
        }
        Ok(())
    }

    fn read_all(&self) -> groove_core::Result<Vec<Song>> {
        Ok(self.decode_all()?)
    }

    fn delete_by_id(&mut self, id: &SongId) -> groove_core::Result<()> {
        self.lock().songs.retain(|(stored, _)| stored != id);
        Ok(())
    }

    fn clear(&mut self) -> groove_core::Result<()> {
        self.lock().songs.clear();
        Ok(())
    }

    fn save_playlists(&mut self, playlists: &[Playlist]) -> groove_core::Result<()> {
        let bytes = serde_json::to_vec(playlists)?;
        self.lock().playlists = Some(bytes);
        Ok(())
    }

    fn load_playlists(&self) -> groove_core::Result<Option<Vec<Playlist>>> {
        Ok(self.decode_playlists()?)
    }
}

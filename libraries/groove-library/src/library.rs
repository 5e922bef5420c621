//! Library store
//!
//! The authoritative in-memory set of imported songs, keyed by ID and kept
//! in import order.

use groove_core::types::{Song, SongId};
use std::collections::HashMap;

/// In-memory song library
///
/// This is the source of truth for the running session. The durable store
/// mirrors it but may lag behind after a failed write.
#[derive(Debug, Clone, Default)]
pub struct Library {
    /// Songs in import order
    songs: Vec<Song>,

    /// ID -> position in `songs`
    positions: HashMap<SongId, usize>,
}

impl Library {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a library from stored records
    ///
    /// Duplicate IDs keep the first record.
    pub fn from_songs(songs: impl IntoIterator<Item = Song>) -> Self {
        let mut library = Self::new();
        for song in songs {
            if !library.contains(&song.id) {
                library.insert(song);
            }
        }
        library
    }

    /// Insert a song, replacing any record with the same ID in place
    ///
    /// Returns `true` if the song is new.
    pub fn insert(&mut self, song: Song) -> bool {
        if let Some(&pos) = self.positions.get(&song.id) {
            self.songs[pos] = song;
            false
        } else {
            self.positions.insert(song.id.clone(), self.songs.len());
            self.songs.push(song);
            true
        }
    }

    /// Remove a song by ID
    pub fn remove(&mut self, id: &SongId) -> Option<Song> {
        let pos = self.positions.remove(id)?;
        let song = self.songs.remove(pos);

        // Everything after the gap shifted down by one
        for later in &self.songs[pos..] {
            if let Some(p) = self.positions.get_mut(&later.id) {
                *p -= 1;
            }
        }

        Some(song)
    }

    pub fn get(&self, id: &SongId) -> Option<&Song> {
        self.positions.get(id).map(|&pos| &self.songs[pos])
    }

    pub fn get_mut(&mut self, id: &SongId) -> Option<&mut Song> {
        self.positions.get(id).map(|&pos| &mut self.songs[pos])
    }

    pub fn contains(&self, id: &SongId) -> bool {
        self.positions.contains_key(id)
    }

    /// All songs in import order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// First song in import order
    pub fn first(&self) -> Option<&Song> {
        self.songs.first()
    }

    /// Resolve references to songs, silently skipping stale IDs
    pub fn resolve<'a>(&self, ids: impl IntoIterator<Item = &'a SongId>) -> Vec<Song> {
        ids.into_iter()
            .filter_map(|id| self.get(id))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

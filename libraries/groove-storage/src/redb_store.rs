//! redb-backed durable store
//!
//! Songs live in one table keyed by song ID. The playlist snapshot is a
//! single JSON value under a reserved key in a separate table.

use crate::error::Result;
use groove_core::{
    traits::DurableStore,
    types::{Playlist, Song, SongId},
};
use redb::{Database, ReadableTable, TableDefinition};
use std::fs;
use std::path::Path;
use tracing::debug;

const SONGS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("songs");
const META_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("meta");

/// Reserved key holding the serialized playlist list
pub const PLAYLISTS_KEY: &str = "groove_playlists";

/// Durable store on a single redb file
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open the database at `path`, creating it (and parent directories)
    /// if needed
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let db = Database::create(path)?;

        // Make sure both tables exist so readers never hit a missing table
        let write_txn = db.begin_write()?;
        {
            write_txn.open_table(SONGS_TABLE)?;
            write_txn.open_table(META_TABLE)?;
        }
        write_txn.commit()?;

        debug!(path = %path.display(), "Opened song database");
        Ok(Self { db })
    }

    fn put_song(&self, song: &Song) -> Result<()> {
        let bytes = serde_json::to_vec(song)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SONGS_TABLE)?;
            table.insert(song.id.as_str(), bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn all_songs(&self) -> Result<Vec<Song>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SONGS_TABLE)?;

        let mut songs = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            let song: Song = serde_json::from_slice(value.value())?;
            songs.push(song);
        }

        // Keys are random IDs; restore import order
        songs.sort_by_key(|s| s.imported_at);
        Ok(songs)
    }

    fn remove_song(&self, id: &SongId) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SONGS_TABLE)?;
            table.remove(id.as_str())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn remove_all_songs(&self) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        write_txn.delete_table(SONGS_TABLE)?;
        write_txn.open_table(SONGS_TABLE)?;
        write_txn.commit()?;
        Ok(())
    }

    fn put_playlists(&self, playlists: &[Playlist]) -> Result<()> {
        let bytes = serde_json::to_vec(playlists)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(META_TABLE)?;
            table.insert(PLAYLISTS_KEY, bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn get_playlists(&self) -> Result<Option<Vec<Playlist>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(META_TABLE)?;

        let playlists = match table.get(PLAYLISTS_KEY)? {
            Some(value) => Some(serde_json::from_slice(value.value())?),
            None => None,
        };
        Ok(playlists)
    }
}

impl DurableStore for RedbStore {
    fn upsert(&mut self, song: &Song) -> groove_core::Result<()> {
        Ok(self.put_song(song)?)
    }

    fn read_all(&self) -> groove_core::Result<Vec<Song>> {
        Ok(self.all_songs()?)
    }

    fn delete_by_id(&mut self, id: &SongId) -> groove_core::Result<()> {
        Ok(self.remove_song(id)?)
    }

    fn clear(&mut self) -> groove_core::Result<()> {
        Ok(self.remove_all_songs()?)
    }

    fn save_playlists(&mut self, playlists: &[Playlist]) -> groove_core::Result<()> {
        Ok(self.put_playlists(playlists)?)
    }

    fn load_playlists(&self) -> groove_core::Result<Option<Vec<Playlist>>> {
        Ok(self.get_playlists()?)
    }
}

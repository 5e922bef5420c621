//! Groove Player Storage
//!
//! Durable mirror of the in-memory library for Groove Player.
//!
//! Two `DurableStore` implementations:
//! - [`RedbStore`]: a single embedded redb database file
//! - [`MemoryStore`]: process-local, for `--in-memory` sessions and tests
//!
//! Songs are stored as JSON records keyed by song ID. The playlist list is
//! one JSON snapshot under the reserved key [`PLAYLISTS_KEY`].
//!
//! # Example
//!
//! ```rust,no_run
//! use groove_core::{traits::DurableStore, types::{Song, SourceRef}};
//! use groove_storage::RedbStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = RedbStore::open("groove.redb")?;
//! store.upsert(&Song::from_file_name("a.mp3", SourceRef::new("/music/a.mp3")))?;
//!
//! let songs = store.read_all()?;
//! # Ok(())
//! # }
//! ```

mod error;
mod memory;
mod redb_store;

pub use error::{Result, StorageError};
pub use memory::MemoryStore;
pub use redb_store::{RedbStore, PLAYLISTS_KEY};

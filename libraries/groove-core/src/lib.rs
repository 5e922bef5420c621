//! Groove Player Core
//!
//! Platform-agnostic core types, traits, and error handling for Groove Player.
//!
//! This crate provides the foundational building blocks shared by the
//! library, playback, and storage crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `Playlist`, `View`, and their IDs
//! - **Collaborator Traits**: `DurableStore`, `AudioEngine`, `MetadataExtractor`
//! - **Reorder Engine**: the one array-move primitive used everywhere
//! - **Error Handling**: Unified `GrooveError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use groove_core::reorder::move_item;
//! use groove_core::types::{Playlist, Song, SourceRef};
//!
//! let a = Song::from_file_name("a.mp3", SourceRef::new("/music/a.mp3"));
//! let b = Song::from_file_name("b.mp3", SourceRef::new("/music/b.mp3"));
//!
//! let mut playlist = Playlist::new("Mix");
//! playlist.song_ids = vec![a.id.clone(), b.id.clone()];
//!
//! move_item(&mut playlist.song_ids, 0, 1).unwrap();
//! assert_eq!(playlist.song_ids, vec![b.id, a.id]);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod reorder;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{GrooveError, Result};
pub use traits::{AudioEngine, DurableStore, MetadataExtractor};

pub use types::{
    CoverRef, MetadataPatch, Playlist, PlaylistId, Song, SongId, SongImport, SourceRef, View,
};

//! Groove Player Library
//!
//! In-memory collections behind the player: the song library, playlists,
//! batch selection, and the view query that combines them.
//!
//! Nothing here touches storage or audio. The playback crate owns these
//! structures and mirrors changes to the durable store.

#![forbid(unsafe_code)]

pub mod library;
pub mod playlists;
pub mod selection;
pub mod views;

pub use library::Library;
pub use playlists::PlaylistManager;
pub use selection::Selection;
pub use views::ViewSources;

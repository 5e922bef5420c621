/// Collaborator traits for Groove Player
///
/// The state engine owns none of these concerns; it talks to them through
/// the boundaries below.
use crate::error::Result;
use crate::types::{MetadataPatch, Playlist, Song, SongId, SourceRef};
use std::path::Path;

/// Durable key-value store mirroring the in-memory library
///
/// Called at startup (`read_all`, `load_playlists`) and after every library
/// or playlist mutation. Implementations never hold the source of truth:
/// the running session's memory does.
pub trait DurableStore {
    /// Insert or replace a song record
    fn upsert(&mut self, song: &Song) -> Result<()>;

    /// Read every stored song
    fn read_all(&self) -> Result<Vec<Song>>;

    /// Delete a song record (missing IDs are not an error)
    fn delete_by_id(&mut self, id: &SongId) -> Result<()>;

    /// Remove every song record
    fn clear(&mut self) -> Result<()>;

    /// Replace the serialized playlist snapshot
    fn save_playlists(&mut self, playlists: &[Playlist]) -> Result<()>;

    /// Read the playlist snapshot, if one was ever written
    fn load_playlists(&self) -> Result<Option<Vec<Playlist>>>;
}

/// External audio engine (consumed, not owned)
///
/// Playback events (`timeUpdated`, `durationKnown`, `ended`, `error`) flow
/// the other way and are delivered to the playback manager by the host.
pub trait AudioEngine {
    /// Take exclusive use of a source
    ///
    /// Callers must `release` the previous source first.
    fn load(&mut self, source: &SourceRef) -> Result<()>;

    /// Release the currently held source, if any
    fn release(&mut self);

    /// Start or resume playback
    ///
    /// May be rejected (e.g. platform policy); rejection is not retried.
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Seek within the current source
    fn seek(&mut self, position_secs: f64);

    /// Set output level (0.0 = silent, 1.0 = full)
    fn set_volume(&mut self, level: f32);

    /// Elapsed playback on the current source, in seconds
    fn position(&self) -> f64;
}

/// Tag/metadata extraction for imported files
pub trait MetadataExtractor {
    /// Read whatever tags are available
    ///
    /// Partial results are fine. Failures are swallowed by the caller and
    /// the import proceeds with filename-derived defaults.
    fn extract(&self, path: &Path) -> Result<MetadataPatch>;
}

/// Song domain types
use crate::types::SongId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Artist placeholder used until tags say otherwise
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Album placeholder used until tags say otherwise
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Opaque handle to a song's playable bytes
///
/// Only valid for the session that produced it. It is never written to the
/// durable store, so a song read back at startup has no source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceRef(String);

impl SourceRef {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle to cover art (typically a `data:` URL)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoverRef(String);

impl CoverRef {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A song in the library
///
/// Identity is by `id`; everything else is mutable metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Stable unique identifier
    pub id: SongId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Duration in seconds (0 until the engine reports it)
    #[serde(default)]
    pub duration_seconds: f64,

    /// Playable source for the current session
    #[serde(skip)]
    pub source: Option<SourceRef>,

    /// Cover art handle
    #[serde(default)]
    pub cover: Option<CoverRef>,

    /// When the song was imported
    pub imported_at: DateTime<Utc>,
}

impl Song {
    /// Create a song with filename-derived defaults
    ///
    /// The title is the file name without its extension; artist and album
    /// are placeholders until metadata extraction fills them in.
    pub fn from_file_name(file_name: &str, source: SourceRef) -> Self {
        Self {
            id: SongId::generate(),
            title: title_from_file_name(file_name),
            artist: UNKNOWN_ARTIST.to_string(),
            album: UNKNOWN_ALBUM.to_string(),
            duration_seconds: 0.0,
            source: Some(source),
            cover: None,
            imported_at: Utc::now(),
        }
    }

    /// Whether the song can be handed to the audio engine this session
    pub fn is_playable(&self) -> bool {
        self.source.is_some()
    }

    /// Case-insensitive title/artist substring match
    ///
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.artist.to_lowercase().contains(needle)
    }
}

fn title_from_file_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map_or_else(|| file_name.to_string(), str::to_string)
}

/// Request to import one file into the library
#[derive(Debug, Clone)]
pub struct SongImport {
    /// Original file name (used for the default title)
    pub file_name: String,

    /// Handle to the file's bytes for this session
    pub source: SourceRef,
}

impl SongImport {
    pub fn new(file_name: impl Into<String>, source: SourceRef) -> Self {
        Self {
            file_name: file_name.into(),
            source,
        }
    }
}

/// Partial metadata produced by tag extraction
///
/// Absent (or blank) fields leave the song's current value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataPatch {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub cover: Option<CoverRef>,
    pub duration_seconds: Option<f64>,
}

impl MetadataPatch {
    /// Whether the patch carries nothing usable
    pub fn is_empty(&self) -> bool {
        non_blank(self.title.as_deref()).is_none()
            && non_blank(self.artist.as_deref()).is_none()
            && non_blank(self.album.as_deref()).is_none()
            && self.cover.is_none()
            && self.duration_seconds.is_none()
    }

    /// Apply present fields to a song
    pub fn apply_to(&self, song: &mut Song) {
        if let Some(title) = non_blank(self.title.as_deref()) {
            song.title = title.to_string();
        }
        if let Some(artist) = non_blank(self.artist.as_deref()) {
            song.artist = artist.to_string();
        }
        if let Some(album) = non_blank(self.album.as_deref()) {
            song.album = album.to_string();
        }
        if let Some(cover) = &self.cover {
            song.cover = Some(cover.clone());
        }
        if let Some(duration) = self.duration_seconds.filter(|d| d.is_finite() && *d > 0.0) {
            song.duration_seconds = duration;
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

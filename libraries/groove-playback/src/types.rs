//! Core types for playback management

use serde::{Deserialize, Serialize};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing loaded
    #[default]
    Stopped,

    /// Currently playing
    Playing,

    /// Loaded but not playing (user pause or rejected play request)
    Paused,
}

/// How the queue moves when a track ends or the user skips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    /// Walk the queue in order, wrapping at both ends
    #[default]
    Sequential,

    /// Jump to a uniformly random position (repeats allowed)
    Shuffle,

    /// Replay the current track when it ends; skips still move
    RepeatOne,
}

impl PlaybackMode {
    /// Next mode in the user-facing cycle
    ///
    /// Sequential -> Shuffle -> RepeatOne -> Sequential
    pub fn cycled(self) -> Self {
        match self {
            Self::Sequential => Self::Shuffle,
            Self::Shuffle => Self::RepeatOne,
            Self::RepeatOne => Self::Sequential,
        }
    }
}

/// Direction of a queue advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// What caused a queue advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceTrigger {
    /// User pressed next/previous, or an error skip fired
    Skip,

    /// The engine reported the end of the track
    TrackEnded,
}

/// Configuration for playback manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Maximum history size (default: 50)
    pub history_size: usize,

    /// Elapsed seconds after which "previous" restarts the track instead
    /// of moving back (default: 3.0)
    pub rewind_threshold_secs: f64,

    /// Delay before skipping past a track that failed to play (default: 1000)
    pub error_skip_delay_ms: u64,

    /// Initial volume, 0.0 to 1.0 (default: 1.0)
    pub volume: f32,

    /// Initial playback mode (default: Sequential)
    pub mode: PlaybackMode,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            history_size: 50,
            rewind_threshold_secs: 3.0,
            error_skip_delay_ms: 1000,
            volume: 1.0,
            mode: PlaybackMode::Sequential,
        }
    }
}

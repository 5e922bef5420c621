//! Playback events
//!
//! Two directions:
//! - `EngineEvent`: reported by the audio engine host into the manager
//! - `StateEvent`: emitted by the manager for UI synchronization

use crate::types::{PlaybackMode, PlaybackState};
use groove_core::types::{SongId, View};
use serde::{Deserialize, Serialize};

/// Events delivered by the audio engine
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Periodic position tick
    TimeUpdated { position_secs: f64 },

    /// Duration of the loaded source became known
    DurationKnown { duration_secs: f64 },

    /// Current source played to the end
    Ended,

    /// Current source failed mid-playback
    Error { message: String },
}

/// Events emitted by the playback manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StateEvent {
    /// Queue items or pointer changed
    QueueChanged {
        /// New queue length
        length: usize,
        /// Current position, if any
        current_index: Option<usize>,
    },

    /// Position tick or seek
    PositionChanged {
        position_secs: f64,
        duration_secs: f64,
    },

    /// A song was imported, updated, or deleted
    LibraryChanged {
        /// Library size after the change
        count: usize,
    },

    /// Any playlist changed
    PlaylistsChanged,

    /// Recently played list changed
    HistoryChanged,

    /// Playing, paused, or stopped
    PlaybackStateChanged {
        state: PlaybackState,
        /// Song under the queue pointer
        song_id: Option<SongId>,
    },

    /// Playback mode cycled
    ModeChanged { mode: PlaybackMode },

    /// Volume or mute changed
    VolumeChanged { level: f32, is_muted: bool },

    /// Batch mode toggled or selection changed
    SelectionChanged { active: bool, count: usize },

    /// Active view or search term changed
    ViewChanged { view: View },

    /// A song could not be played
    PlaybackFailed {
        song_id: Option<SongId>,
        /// User-facing message
        message: String,
    },
}

/// Listener callback registered with `subscribe`
pub type Listener = Box<dyn FnMut(&StateEvent)>;

/// Fan-out for state events
///
/// Events are delivered to every listener immediately and also buffered
/// for callers that prefer to poll with `drain`.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
    pending: Vec<StateEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn emit(&mut self, event: StateEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
        self.pending.push(event);
    }

    /// Take all buffered events
    pub fn drain(&mut self) -> Vec<StateEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("pending", &self.pending)
            .finish()
    }
}

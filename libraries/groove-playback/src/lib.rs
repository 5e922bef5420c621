//! Groove Player - Playback Management
//!
//! The state engine behind Groove Player.
//!
//! This crate provides:
//! - Circular play queue with Sequential, Shuffle, and RepeatOne modes
//! - Bounded, duplicate-free play history
//! - `PlaybackManager`, the single owner of library, playlist, selection,
//!   and queue state
//! - State events for UI synchronization
//!
//! # Architecture
//!
//! `groove-playback` does not decode audio or touch disk itself. The audio
//! engine and durable store are injected through the `AudioEngine` and
//! `DurableStore` traits from `groove-core`, and engine callbacks come back
//! in through `PlaybackManager::handle_engine_event`.
//!
//! # Example
//!
//! ```rust
//! use groove_core::{error::Result, traits::AudioEngine, types::{SongImport, SourceRef}};
//! use groove_playback::{PlaybackConfig, PlaybackManager, PlaybackState};
//! use groove_storage::MemoryStore;
//!
//! struct SilentEngine;
//!
//! impl AudioEngine for SilentEngine {
//!     fn load(&mut self, _source: &SourceRef) -> Result<()> { Ok(()) }
//!     fn release(&mut self) {}
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, _position_secs: f64) {}
//!     fn set_volume(&mut self, _level: f32) {}
//!     fn position(&self) -> f64 { 0.0 }
//! }
//!
//! let mut manager = PlaybackManager::new(
//!     PlaybackConfig::default(),
//!     Box::new(SilentEngine),
//!     Box::new(MemoryStore::new()),
//! );
//!
//! let id = manager.import(SongImport::new("Intro.mp3", SourceRef::new("/music/Intro.mp3")));
//! manager.play_song(&id).unwrap();
//!
//! assert_eq!(manager.state(), PlaybackState::Playing);
//! assert_eq!(manager.current_song().unwrap().title, "Intro");
//! ```

mod events;
mod history;
mod manager;
mod queue;
mod shuffle;
pub mod types;

// Public exports
pub use events::{EngineEvent, EventBus, Listener, StateEvent};
pub use history::History;
pub use manager::{ExportItem, PlaybackManager};
pub use queue::{Queue, RemovalOutcome};
pub use shuffle::pick_random_index;
pub use types::{AdvanceTrigger, Direction, PlaybackConfig, PlaybackMode, PlaybackState};

//! Simulated audio engine for the shell
//!
//! No audio is decoded. The engine tracks a virtual clock that the shell
//! advances with `tick`, and reports the same events a real output device
//! would: duration once a source loads, position ticks, and end of track.

use groove_core::{
    error::{GrooveError, Result},
    traits::{AudioEngine, MetadataExtractor},
    types::SourceRef,
};
use groove_metadata::LoftyExtractor;
use groove_playback::EngineEvent;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, info};

#[derive(Debug, Default)]
struct Clock {
    loaded: Option<SourceRef>,
    playing: bool,
    position: f64,
    duration: Option<f64>,
    volume: f32,
    events: Vec<EngineEvent>,
}

/// Logging engine; clones share one clock
#[derive(Debug, Clone, Default)]
pub struct LoggingEngine {
    clock: Rc<RefCell<Clock>>,
}

impl LoggingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the virtual clock while playing
    ///
    /// Reports a position tick, and `Ended` once the known duration is
    /// reached.
    pub fn tick(&self, secs: f64) {
        let mut clock = self.clock.borrow_mut();
        if !clock.playing || clock.loaded.is_none() {
            return;
        }

        clock.position += secs.max(0.0);
        if let Some(duration) = clock.duration {
            if clock.position >= duration {
                clock.position = duration;
                clock.playing = false;
                let position_secs = clock.position;
                clock.events.push(EngineEvent::TimeUpdated { position_secs });
                clock.events.push(EngineEvent::Ended);
                return;
            }
        }
        let position_secs = clock.position;
        clock.events.push(EngineEvent::TimeUpdated { position_secs });
    }

    /// Report a mid-playback failure, as a real decoder would
    pub fn fail(&self, message: impl Into<String>) {
        let mut clock = self.clock.borrow_mut();
        clock.playing = false;
        clock.events.push(EngineEvent::Error {
            message: message.into(),
        });
    }

    /// Events reported since the last call
    pub fn take_events(&self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.clock.borrow_mut().events)
    }

    pub fn is_playing(&self) -> bool {
        self.clock.borrow().playing
    }

    pub fn volume(&self) -> f32 {
        self.clock.borrow().volume
    }
}

impl AudioEngine for LoggingEngine {
    fn load(&mut self, source: &SourceRef) -> Result<()> {
        let path = Path::new(source.as_str());
        if !path.exists() {
            return Err(GrooveError::rejected(format!(
                "source not readable: {}",
                source.as_str()
            )));
        }

        // Duration is best-effort; untagged files simply never end
        let duration = LoftyExtractor::new()
            .extract(path)
            .ok()
            .and_then(|patch| patch.duration_seconds);

        let mut clock = self.clock.borrow_mut();
        clock.loaded = Some(source.clone());
        clock.playing = false;
        clock.position = 0.0;
        clock.duration = duration;
        if let Some(duration_secs) = duration {
            clock.events.push(EngineEvent::DurationKnown { duration_secs });
        }

        debug!(source = source.as_str(), ?duration, "Engine loaded source");
        Ok(())
    }

    fn release(&mut self) {
        let mut clock = self.clock.borrow_mut();
        if let Some(source) = clock.loaded.take() {
            debug!(source = source.as_str(), "Engine released source");
        }
        clock.playing = false;
        clock.position = 0.0;
        clock.duration = None;
    }

    fn play(&mut self) -> Result<()> {
        let mut clock = self.clock.borrow_mut();
        let Some(source) = &clock.loaded else {
            return Err(GrooveError::rejected("no source loaded"));
        };
        info!(source = source.as_str(), "Playing");
        clock.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.clock.borrow_mut().playing = false;
        info!("Paused");
    }

    fn seek(&mut self, position_secs: f64) {
        self.clock.borrow_mut().position = position_secs;
        debug!(position_secs, "Engine seek");
    }

    fn set_volume(&mut self, level: f32) {
        self.clock.borrow_mut().volume = level;
        debug!(level, "Engine volume");
    }

    fn position(&self) -> f64 {
        self.clock.borrow().position
    }
}

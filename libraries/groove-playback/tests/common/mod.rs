//! Shared test infrastructure for playback tests

#![allow(dead_code)]

use groove_core::{
    error::{GrooveError, Result},
    traits::{AudioEngine, DurableStore},
    types::{Playlist, Song, SongId, SongImport, SourceRef},
};
use groove_playback::{PlaybackConfig, PlaybackManager};
use groove_storage::MemoryStore;
use rand::{rngs::StdRng, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;

/// Everything the fake engine was asked to do
#[derive(Debug, Default)]
pub struct EngineLog {
    pub loaded: Option<SourceRef>,
    pub loads: Vec<SourceRef>,
    pub releases: usize,
    /// `load` called while a source was still held
    pub loads_without_release: usize,
    pub playing: bool,
    pub play_calls: usize,
    pub position: f64,
    pub seeks: Vec<f64>,
    pub volume: f32,
    pub reject_play: bool,
    pub fail_load: bool,
}

/// Scriptable audio engine; clones share one log
#[derive(Debug, Clone, Default)]
pub struct FakeEngine(pub Rc<RefCell<EngineLog>>);

impl FakeEngine {
    pub fn log(&self) -> std::cell::Ref<'_, EngineLog> {
        self.0.borrow()
    }

    pub fn set_position(&self, secs: f64) {
        self.0.borrow_mut().position = secs;
    }

    pub fn reject_play(&self, reject: bool) {
        self.0.borrow_mut().reject_play = reject;
    }
}

impl AudioEngine for FakeEngine {
    fn load(&mut self, source: &SourceRef) -> Result<()> {
        let mut log = self.0.borrow_mut();
        if log.fail_load {
            return Err(GrooveError::rejected("cannot decode source"));
        }
        if log.loaded.is_some() {
            log.loads_without_release += 1;
        }
        log.loaded = Some(source.clone());
        log.loads.push(source.clone());
        Ok(())
    }

    fn release(&mut self) {
        let mut log = self.0.borrow_mut();
        log.loaded = None;
        log.playing = false;
        log.position = 0.0;
        log.releases += 1;
    }

    fn play(&mut self) -> Result<()> {
        let mut log = self.0.borrow_mut();
        log.play_calls += 1;
        if log.reject_play {
            return Err(GrooveError::rejected("playback not allowed"));
        }
        log.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.0.borrow_mut().playing = false;
    }

    fn seek(&mut self, position_secs: f64) {
        let mut log = self.0.borrow_mut();
        log.position = position_secs;
        log.seeks.push(position_secs);
    }

    fn set_volume(&mut self, level: f32) {
        self.0.borrow_mut().volume = level;
    }

    fn position(&self) -> f64 {
        self.0.borrow().position
    }
}

/// Store whose writes always fail
#[derive(Debug, Default)]
pub struct FailingStore;

impl DurableStore for FailingStore {
    fn upsert(&mut self, _song: &Song) -> Result<()> {
        Err(GrooveError::persistence("disk full"))
    }

    fn read_all(&self) -> Result<Vec<Song>> {
        Ok(Vec::new())
    }

    fn delete_by_id(&mut self, _id: &SongId) -> Result<()> {
        Err(GrooveError::persistence("disk full"))
    }

    fn clear(&mut self) -> Result<()> {
        Err(GrooveError::persistence("disk full"))
    }

    fn save_playlists(&mut self, _playlists: &[Playlist]) -> Result<()> {
        Err(GrooveError::persistence("disk full"))
    }

    fn load_playlists(&self) -> Result<Option<Vec<Playlist>>> {
        Ok(None)
    }
}

/// Test harness: a manager plus handles to its collaborators
pub struct Harness {
    pub manager: PlaybackManager,
    pub engine: FakeEngine,
    pub store: MemoryStore,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    pub fn with_store(store: MemoryStore) -> Self {
        Self::with_config(PlaybackConfig::default(), store)
    }

    pub fn with_config(config: PlaybackConfig, store: MemoryStore) -> Self {
        let engine = FakeEngine::default();
        let manager =
            PlaybackManager::new(config, Box::new(engine.clone()), Box::new(store.clone()))
                .with_rng(StdRng::seed_from_u64(42));
        Self {
            manager,
            engine,
            store,
        }
    }

    /// Import songs by title, in order
    pub fn import(&mut self, titles: &[&str]) -> Vec<SongId> {
        titles
            .iter()
            .map(|title| {
                self.manager.import(SongImport::new(
                    format!("{}.mp3", title),
                    SourceRef::new(format!("/music/{}.mp3", title)),
                ))
            })
            .collect()
    }

    pub fn current_title(&self) -> Option<String> {
        self.manager.current_song().map(|s| s.title.clone())
    }
}

//! Playback manager - core orchestration
//!
//! Owns the library, playlists, history, selection, and queue, and is the
//! only place any of them change. Every command runs to completion on
//! `&mut self`, mirrors its effect to the durable store, and emits
//! `StateEvent`s for the UI.

use crate::{
    events::{EngineEvent, EventBus, StateEvent},
    history::History,
    queue::{Queue, RemovalOutcome},
    types::{AdvanceTrigger, Direction, PlaybackConfig, PlaybackMode, PlaybackState},
};
use groove_core::{
    error::{GrooveError, Result},
    traits::{AudioEngine, DurableStore},
    types::{MetadataPatch, PlaylistId, Song, SongId, SongImport, SourceRef, View},
};
use groove_library::{Library, PlaylistManager, Selection, ViewSources};
use rand::{rngs::StdRng, SeedableRng};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// One song handed out by a batch export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportItem {
    pub song_id: SongId,
    pub title: String,
    pub source: SourceRef,
}

/// Central playback and library state
///
/// Collaborators are injected:
/// - `AudioEngine` plays sources and reports back through
///   `handle_engine_event`
/// - `DurableStore` mirrors library and playlist changes; its failures are
///   logged and never roll back in-memory state
pub struct PlaybackManager {
    config: PlaybackConfig,

    // Collections
    library: Library,
    playlists: PlaylistManager,
    history: History,
    selection: Selection,

    // Queue and the view it was built from
    queue: Queue,
    queue_origin: Option<View>,

    // Browsing
    active_view: View,
    search: String,

    // Transport
    state: PlaybackState,
    position_secs: f64,
    duration_secs: f64,
    volume: f32,
    last_audible_volume: f32,
    pending_skip: Option<Instant>,

    // Collaborators
    engine: Box<dyn AudioEngine>,
    store: Box<dyn DurableStore>,
    rng: StdRng,

    // Event queue for UI synchronization
    events: EventBus,
}

impl PlaybackManager {
    /// Create a manager with an empty library
    ///
    /// Call `load_from_store` to seed it from the durable store.
    pub fn new(
        config: PlaybackConfig,
        mut engine: Box<dyn AudioEngine>,
        store: Box<dyn DurableStore>,
    ) -> Self {
        let volume = clamp_volume(config.volume);
        engine.set_volume(volume);

        Self {
            library: Library::new(),
            playlists: PlaylistManager::new(),
            history: History::new(config.history_size),
            selection: Selection::new(),
            queue: Queue::new(config.mode),
            queue_origin: None,
            active_view: View::Library,
            search: String::new(),
            state: PlaybackState::Stopped,
            position_secs: 0.0,
            duration_secs: 0.0,
            volume,
            last_audible_volume: if volume > 0.0 { volume } else { 1.0 },
            pending_skip: None,
            engine,
            store,
            rng: StdRng::from_entropy(),
            events: EventBus::new(),
            config,
        }
    }

    /// Replace the shuffle RNG (deterministic tests, reproducible sessions)
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    // ===== Startup =====

    /// Seed the library and playlists from the durable store
    ///
    /// A missing playlist snapshot yields just the favorites playlist.
    pub fn load_from_store(&mut self) -> Result<()> {
        let songs = self.store.read_all()?;
        let snapshot = self.store.load_playlists()?;

        self.library = Library::from_songs(songs);
        self.playlists = snapshot.map_or_else(PlaylistManager::new, PlaylistManager::restore);

        info!(
            songs = self.library.len(),
            playlists = self.playlists.len(),
            "Loaded library from store"
        );

        if let View::Playlist(id) = &self.active_view {
            if !self.playlists.contains(id) {
                self.active_view = View::Library;
                self.emit_view_changed();
            }
        }

        self.emit_library_changed();
        self.events.emit(StateEvent::PlaylistsChanged);
        Ok(())
    }

    // ===== Library =====

    /// Add one file to the library
    ///
    /// The record starts with filename-derived defaults. Tag data arrives
    /// later through `apply_metadata`.
    pub fn import(&mut self, import: SongImport) -> SongId {
        let song = Song::from_file_name(&import.file_name, import.source);
        let id = song.id.clone();

        info!(song = %id, title = %song.title, "Imported song");
        self.library.insert(song);
        self.persist_song(&id);
        self.emit_library_changed();
        id
    }

    /// Apply extracted tags to a song
    ///
    /// Returns `false` (and discards the patch) if the song was deleted in
    /// the meantime.
    pub fn apply_metadata(&mut self, id: &SongId, patch: &MetadataPatch) -> bool {
        let Some(song) = self.library.get_mut(id) else {
            debug!(song = %id, "Discarding metadata for deleted song");
            return false;
        };

        if patch.is_empty() {
            return true;
        }

        patch.apply_to(song);
        self.persist_song(id);
        self.emit_library_changed();
        true
    }

    /// Delete a song and scrub every reference to it
    ///
    /// Removes it from the store, every playlist, history, the selection,
    /// and the live queue. If it was playing, playback halts.
    pub fn delete_song(&mut self, id: &SongId) -> Result<()> {
        if !self.library.contains(id) {
            return Err(GrooveError::SongNotFound(id.clone()));
        }

        let was_selected = self.selection.contains(id);
        self.remove_song_cascade(id);
        if was_selected {
            self.emit_selection_changed();
        }
        Ok(())
    }

    /// Delete every song
    pub fn clear_library(&mut self) {
        let ids: Vec<SongId> = self.library.songs().iter().map(|s| s.id.clone()).collect();
        for id in &ids {
            self.remove_song_cascade(id);
        }

        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear store");
        }
        self.selection.exit();
        self.emit_selection_changed();
    }

    fn remove_song_cascade(&mut self, id: &SongId) {
        self.library.remove(id);
        if let Err(e) = self.store.delete_by_id(id) {
            warn!(song = %id, error = %e, "Failed to delete song from store");
        }

        if self.playlists.remove_song_everywhere(id) {
            self.persist_playlists();
            self.events.emit(StateEvent::PlaylistsChanged);
        }

        if self.history.remove(id) {
            self.events.emit(StateEvent::HistoryChanged);
        }

        self.selection.remove(id);
        self.drop_from_queue(id);

        info!(song = %id, "Deleted song");
        self.emit_library_changed();
    }

    // ===== Views =====

    /// Switch the active view
    ///
    /// Leaves batch mode.
    pub fn switch_view(&mut self, view: View) -> Result<()> {
        if let View::Playlist(id) = &view {
            if !self.playlists.contains(id) {
                return Err(GrooveError::PlaylistNotFound(id.clone()));
            }
        }

        if self.selection.is_active() {
            self.selection.exit();
            self.emit_selection_changed();
        }

        debug!(view = %view, "Switched view");
        self.active_view = view;
        self.emit_view_changed();
        Ok(())
    }

    /// Set the search term for the active view
    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
        self.emit_view_changed();
    }

    /// Songs visible in the active view under the current search
    pub fn view_songs(&self) -> Vec<Song> {
        self.view_songs_for(&self.active_view, &self.search)
    }

    /// Songs visible in any view under any search term
    pub fn view_songs_for(&self, view: &View, term: &str) -> Vec<Song> {
        let history = self.history.ids();
        ViewSources {
            library: &self.library,
            playlists: &self.playlists,
            history: &history,
        }
        .songs(view, term)
    }

    // ===== Playback Control =====

    /// Play a song from the active view
    ///
    /// The queue becomes a copy of the visible list with the pointer on
    /// the chosen song.
    pub fn play_song(&mut self, id: &SongId) -> Result<()> {
        let songs = self.view_songs();
        self.start_queue(self.active_view.clone(), songs, id)
    }

    /// Pause or resume
    ///
    /// With nothing loaded, resumes the queue pointer or else starts the
    /// library from its first song.
    pub fn toggle_play(&mut self) -> Result<()> {
        match self.state {
            PlaybackState::Playing => {
                self.engine.pause();
                self.set_state(PlaybackState::Paused);
                Ok(())
            }
            PlaybackState::Paused => match self.engine.play() {
                Ok(()) => {
                    self.set_state(PlaybackState::Playing);
                    Ok(())
                }
                Err(e) => self.fail_playback(PlaybackState::Paused, e),
            },
            PlaybackState::Stopped => {
                if self.queue.current_id().is_some() {
                    return self.start_current();
                }

                let Some(first) = self.library.first().map(|s| s.id.clone()) else {
                    return Ok(());
                };
                let songs = self.library.songs().to_vec();
                self.start_queue(View::Library, songs, &first)
            }
        }
    }

    /// Skip forward
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<()> {
        self.advance(Direction::Forward, AdvanceTrigger::Skip)
    }

    /// Go back
    ///
    /// Past the rewind threshold this restarts the current track instead.
    pub fn previous(&mut self) -> Result<()> {
        if self.state != PlaybackState::Stopped
            && self.engine.position() > self.config.rewind_threshold_secs
        {
            debug!("Restarting current track");
            self.engine.seek(0.0);
            self.position_secs = 0.0;
            self.emit_position_changed();
            return Ok(());
        }

        self.advance(Direction::Backward, AdvanceTrigger::Skip)
    }

    /// Cycle Sequential -> Shuffle -> RepeatOne
    pub fn cycle_mode(&mut self) -> PlaybackMode {
        let mode = self.queue.cycle_mode();
        debug!(?mode, "Playback mode changed");
        self.events.emit(StateEvent::ModeChanged { mode });
        mode
    }

    /// Seek within the current track
    ///
    /// Ignored when nothing is loaded.
    pub fn seek(&mut self, position_secs: f64) {
        if self.state == PlaybackState::Stopped || !position_secs.is_finite() {
            return;
        }

        let mut target = position_secs.max(0.0);
        if self.duration_secs > 0.0 {
            target = target.min(self.duration_secs);
        }

        self.engine.seek(target);
        self.position_secs = target;
        self.emit_position_changed();
    }

    // ===== Volume =====

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&mut self, level: f32) {
        self.volume = clamp_volume(level);
        if self.volume > 0.0 {
            self.last_audible_volume = self.volume;
        }
        self.engine.set_volume(self.volume);
        self.emit_volume_changed();
    }

    /// Mute, or restore the last audible volume
    pub fn toggle_mute(&mut self) {
        self.volume = if self.volume > 0.0 {
            0.0
        } else {
            self.last_audible_volume
        };
        self.engine.set_volume(self.volume);
        self.emit_volume_changed();
    }

    // ===== Reordering =====

    /// Drag-drop within the live queue
    pub fn reorder_queue(&mut self, from: usize, to: usize) -> Result<()> {
        self.queue.reconcile_reorder(from, to)?;
        self.emit_queue_changed();
        Ok(())
    }

    /// Drag-drop within the active playlist view
    ///
    /// Indices are positions in the visible list. If the live queue was
    /// built from this playlist and still matches it, the queue follows
    /// the move.
    pub fn reorder_view(&mut self, from: usize, to: usize) -> Result<()> {
        let View::Playlist(playlist_id) = self.active_view.clone() else {
            return Err(GrooveError::invalid_input(
                "only playlist views can be reordered",
            ));
        };
        if !self.search.trim().is_empty() {
            return Err(GrooveError::invalid_input(
                "cannot reorder a filtered view",
            ));
        }

        let playlist = self
            .playlists
            .get(&playlist_id)
            .ok_or_else(|| GrooveError::PlaylistNotFound(playlist_id.clone()))?;

        // Storage positions of the refs that are still visible
        let live: Vec<usize> = playlist
            .song_ids
            .iter()
            .enumerate()
            .filter(|(_, id)| self.library.contains(id))
            .map(|(i, _)| i)
            .collect();
        let visible: Vec<SongId> = live.iter().map(|&i| playlist.song_ids[i].clone()).collect();

        let (Some(&stored_from), Some(&stored_to)) = (live.get(from), live.get(to)) else {
            let index = if from >= live.len() { from } else { to };
            return Err(GrooveError::IndexOutOfBounds {
                index,
                len: live.len(),
            });
        };

        self.playlists.reorder(&playlist_id, stored_from, stored_to)?;
        self.playlists_changed();

        self.follow_playlist_move(&playlist_id, &visible[from], &visible)
    }

    // ===== Playlists =====

    pub fn create_playlist(&mut self, name: &str) -> Result<PlaylistId> {
        let id = self.playlists.create(name)?;
        self.playlists_changed();
        Ok(id)
    }

    /// Delete a user playlist
    ///
    /// The favorites playlist cannot be deleted. If the playlist was the
    /// active view, the view falls back to the library. A queue built from
    /// it keeps playing but no longer tracks any playlist.
    pub fn delete_playlist(&mut self, id: &PlaylistId) -> Result<()> {
        self.playlists.delete(id)?;

        let deleted_view = View::Playlist(id.clone());
        if self.active_view == deleted_view {
            self.active_view = View::Library;
            self.emit_view_changed();
        }
        if self.queue_origin.as_ref() == Some(&deleted_view) {
            self.queue_origin = None;
        }

        self.playlists_changed();
        Ok(())
    }

    pub fn rename_playlist(&mut self, id: &PlaylistId, name: &str) -> Result<()> {
        self.playlists.rename(id, name)?;
        self.playlists_changed();
        Ok(())
    }

    /// Add library songs to a playlist, skipping ones already there
    ///
    /// IDs not in the library are ignored. Returns how many were added.
    /// A queue that mirrors the playlist gets the new songs at its tail.
    pub fn add_to_playlist(&mut self, id: &PlaylistId, song_ids: &[SongId]) -> Result<usize> {
        let known: Vec<SongId> = song_ids
            .iter()
            .filter(|s| self.library.contains(s))
            .cloned()
            .collect();

        let before = self.playlist_songs(id)?;
        let added = self.playlists.add_songs(id, &known)?;
        if added == 0 {
            return Ok(added);
        }
        self.playlists_changed();

        if self.queue_mirrors(id, &before) {
            let fresh: Vec<SongId> = self
                .playlist_songs(id)?
                .into_iter()
                .filter(|s| !before.contains(s))
                .collect();
            self.queue.append(&fresh);
            self.emit_queue_changed();
        }
        Ok(added)
    }

    /// Take a song out of a playlist
    ///
    /// A queue built from the playlist drops it too, with the same pointer
    /// rules as a library deletion.
    pub fn remove_from_playlist(&mut self, id: &PlaylistId, song_id: &SongId) -> Result<usize> {
        let removed = self.playlists.remove_song(id, song_id)?;
        if removed == 0 {
            return Ok(removed);
        }
        self.playlists_changed();

        if self.queue_origin.as_ref() == Some(&View::Playlist(id.clone())) {
            self.drop_from_queue(song_id);
        }
        Ok(removed)
    }

    /// Move a song within a playlist by stored position
    pub fn reorder_playlist(&mut self, id: &PlaylistId, from: usize, to: usize) -> Result<()> {
        let before = self.playlist_songs(id)?;
        let moved = self
            .playlists
            .get(id)
            .and_then(|p| p.song_ids.get(from))
            .cloned();

        self.playlists.reorder(id, from, to)?;
        self.playlists_changed();

        match moved {
            Some(moved) => self.follow_playlist_move(id, &moved, &before),
            None => Ok(()),
        }
    }

    // ===== Batch =====

    pub fn enter_batch(&mut self) {
        self.selection.enter();
        self.emit_selection_changed();
    }

    pub fn exit_batch(&mut self) {
        self.selection.exit();
        self.emit_selection_changed();
    }

    /// Returns whether batch mode is now on
    pub fn toggle_batch_mode(&mut self) -> bool {
        let active = self.selection.toggle_mode();
        self.emit_selection_changed();
        active
    }

    /// Returns whether the song is now selected
    pub fn toggle_select(&mut self, id: &SongId) -> bool {
        let selected = self.selection.toggle(id);
        self.emit_selection_changed();
        selected
    }

    /// Select or deselect everything in the active view
    pub fn select_all_toggle(&mut self) {
        let visible: Vec<SongId> = self.view_songs().into_iter().map(|s| s.id).collect();
        self.selection.select_all_toggle(&visible);
        self.emit_selection_changed();
    }

    /// Delete every selected song; returns how many were deleted
    pub fn apply_delete(&mut self) -> usize {
        if !self.selection.is_active() {
            return 0;
        }

        let ids = self.take_selection();
        for id in &ids {
            self.remove_song_cascade(id);
        }
        info!(count = ids.len(), "Batch deleted songs");
        ids.len()
    }

    /// Add every selected song to each target playlist
    ///
    /// All targets are checked before anything changes. Returns the total
    /// number of additions.
    pub fn apply_add_to_playlists(&mut self, targets: &[PlaylistId]) -> Result<usize> {
        if !self.selection.is_active() {
            return Ok(0);
        }
        if let Some(missing) = targets.iter().find(|t| !self.playlists.contains(t)) {
            return Err(GrooveError::PlaylistNotFound(missing.clone()));
        }

        let ids = self.take_selection();
        let mut added = 0;
        for target in targets {
            added += self.playlists.add_songs(target, &ids)?;
        }

        if added > 0 {
            self.playlists_changed();
        }
        Ok(added)
    }

    /// List the selected songs for export, in library order
    ///
    /// Songs whose source is gone this session are skipped and logged. The
    /// caller performs the actual copying, one item at a time.
    pub fn apply_export(&mut self) -> Vec<ExportItem> {
        if !self.selection.is_active() {
            return Vec::new();
        }

        let ids = self.take_selection();
        let mut items = Vec::with_capacity(ids.len());
        for id in ids {
            let Some(song) = self.library.get(&id) else {
                continue;
            };
            match &song.source {
                Some(source) => items.push(ExportItem {
                    song_id: id.clone(),
                    title: song.title.clone(),
                    source: source.clone(),
                }),
                None => warn!(song = %id, "Skipping export of song without a source"),
            }
        }
        items
    }

    /// Drain the selection in library order and leave batch mode
    fn take_selection(&mut self) -> Vec<SongId> {
        let selected = self.selection.take();
        self.emit_selection_changed();
        self.library
            .songs()
            .iter()
            .filter(|s| selected.contains(&s.id))
            .map(|s| s.id.clone())
            .collect()
    }

    // ===== Engine Events =====

    /// Handle an event reported by the audio engine
    pub fn handle_engine_event(&mut self, event: EngineEvent) -> Result<()> {
        match event {
            EngineEvent::TimeUpdated { position_secs } => {
                self.position_secs = position_secs;
                self.emit_position_changed();
            }
            EngineEvent::DurationKnown { duration_secs } => {
                if !(duration_secs.is_finite() && duration_secs > 0.0) {
                    return Ok(());
                }
                self.duration_secs = duration_secs;
                self.backfill_duration(duration_secs);
                self.emit_position_changed();
            }
            // Late reports for a song that was already halted
            EngineEvent::Ended | EngineEvent::Error { .. }
                if self.state == PlaybackState::Stopped =>
            {
                debug!("Ignoring engine report while stopped");
            }
            EngineEvent::Ended => {
                return self.advance(Direction::Forward, AdvanceTrigger::TrackEnded);
            }
            EngineEvent::Error { message } => {
                let song_id = self.queue.current_id().cloned();
                error!(song = ?song_id, %message, "Audio engine error");

                self.set_state(PlaybackState::Paused);
                self.events.emit(StateEvent::PlaybackFailed { song_id, message });
                self.pending_skip =
                    Some(Instant::now() + Duration::from_millis(self.config.error_skip_delay_ms));
            }
        }
        Ok(())
    }

    /// Fire the scheduled error skip once its deadline has passed
    pub fn poll(&mut self, now: Instant) -> Result<()> {
        match self.pending_skip {
            Some(deadline) if now >= deadline => {
                self.pending_skip = None;
                debug!("Skipping past failed track");
                self.advance(Direction::Forward, AdvanceTrigger::Skip)
            }
            _ => Ok(()),
        }
    }

    /// When the next `poll` has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending_skip
    }

    fn backfill_duration(&mut self, duration_secs: f64) {
        let Some(id) = self.queue.current_id().cloned() else {
            return;
        };
        let Some(song) = self.library.get_mut(&id) else {
            return;
        };

        if (song.duration_seconds - duration_secs).abs() > f64::EPSILON {
            song.duration_seconds = duration_secs;
            self.persist_song(&id);
            self.emit_library_changed();
        }
    }

    // ===== Observation =====

    /// Register a listener for every state event
    pub fn subscribe(&mut self, listener: impl FnMut(&StateEvent) + 'static) {
        self.events.subscribe(Box::new(listener));
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<StateEvent> {
        self.events.drain()
    }

    pub fn has_pending_events(&self) -> bool {
        self.events.has_pending()
    }

    // ===== State Queries =====

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Song under the queue pointer
    pub fn current_song(&self) -> Option<&Song> {
        self.queue.current_id().and_then(|id| self.library.get(id))
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Queue contents resolved to songs
    pub fn queue_songs(&self) -> Vec<Song> {
        self.library.resolve(self.queue.items())
    }

    /// Recently played, most recent first
    pub fn history_songs(&self) -> Vec<Song> {
        self.library.resolve(&self.history.ids())
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn playlists(&self) -> &PlaylistManager {
        &self.playlists
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn active_view(&self) -> &View {
        &self.active_view
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.volume == 0.0
    }

    pub fn mode(&self) -> PlaybackMode {
        self.queue.mode()
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    // ===== Internal =====

    fn start_queue(&mut self, origin: View, songs: Vec<Song>, start: &SongId) -> Result<()> {
        if !songs.iter().any(|s| &s.id == start) {
            return Err(GrooveError::SongNotFound(start.clone()));
        }

        let items = songs.into_iter().map(|s| s.id).collect();
        self.queue.build(items, start);
        self.queue_origin = Some(origin);
        self.emit_queue_changed();
        self.start_current()
    }

    fn advance(&mut self, direction: Direction, trigger: AdvanceTrigger) -> Result<()> {
        if self
            .queue
            .advance(direction, trigger, &mut self.rng)
            .is_none()
        {
            return Ok(());
        }

        self.emit_queue_changed();
        self.start_current()
    }

    /// Load and play the song under the queue pointer
    fn start_current(&mut self) -> Result<()> {
        let Some(id) = self.queue.current_id().cloned() else {
            self.halt();
            return Ok(());
        };

        self.engine.release();
        self.pending_skip = None;
        self.position_secs = 0.0;

        let Some(song) = self.library.get(&id) else {
            self.halt();
            return Err(GrooveError::SongNotFound(id));
        };
        self.duration_secs = song.duration_seconds;
        let source = song.source.clone();

        let Some(source) = source else {
            return self.fail_playback(
                PlaybackState::Stopped,
                GrooveError::SourceInvalidated(id),
            );
        };

        if let Err(e) = self.engine.load(&source) {
            return self.fail_playback(PlaybackState::Stopped, e);
        }

        self.history.record_play(id.clone());
        self.events.emit(StateEvent::HistoryChanged);
        self.emit_position_changed();

        match self.engine.play() {
            Ok(()) => {
                debug!(song = %id, "Playing");
                self.set_state(PlaybackState::Playing);
                Ok(())
            }
            Err(e) => self.fail_playback(PlaybackState::Paused, e),
        }
    }

    /// Record a failed play attempt without retrying
    fn fail_playback(&mut self, state: PlaybackState, err: GrooveError) -> Result<()> {
        let song_id = self.queue.current_id().cloned();
        warn!(song = ?song_id, error = %err, "Playback failed");

        if state == PlaybackState::Stopped {
            self.engine.release();
        }
        self.set_state(state);
        self.events.emit(StateEvent::PlaybackFailed {
            song_id,
            message: err.to_string(),
        });
        Err(err)
    }

    /// Apply a removal to the live queue, halting if the current song went
    fn drop_from_queue(&mut self, id: &SongId) {
        match self.queue.reconcile_removal(id) {
            RemovalOutcome::NotPresent => {}
            RemovalOutcome::Removed { current_removed } => {
                if current_removed {
                    self.halt();
                }
                self.emit_queue_changed();
            }
            RemovalOutcome::Emptied => {
                self.queue_origin = None;
                self.halt();
                self.emit_queue_changed();
            }
        }
    }

    /// Playlist members that are still in the library, in stored order
    fn playlist_songs(&self, id: &PlaylistId) -> Result<Vec<SongId>> {
        let playlist = self
            .playlists
            .get(id)
            .ok_or_else(|| GrooveError::PlaylistNotFound(id.clone()))?;
        Ok(playlist
            .song_ids
            .iter()
            .filter(|s| self.library.contains(s))
            .cloned()
            .collect())
    }

    /// Whether the live queue was built from this playlist and still lists
    /// exactly its members
    fn queue_mirrors(&self, id: &PlaylistId, members: &[SongId]) -> bool {
        self.queue_origin.as_ref() == Some(&View::Playlist(id.clone()))
            && self.queue.items() == members
    }

    /// Replay a playlist move on a queue that mirrors the playlist
    fn follow_playlist_move(
        &mut self,
        id: &PlaylistId,
        moved: &SongId,
        before: &[SongId],
    ) -> Result<()> {
        if !self.queue_mirrors(id, before) {
            return Ok(());
        }

        let after = self.playlist_songs(id)?;
        let from = before.iter().position(|s| s == moved);
        let to = after.iter().position(|s| s == moved);
        if let (Some(from), Some(to)) = (from, to) {
            if from != to {
                self.queue.reconcile_reorder(from, to)?;
                self.emit_queue_changed();
            }
        }
        Ok(())
    }

    /// Stop and release the engine; the queue pointer is left alone
    fn halt(&mut self) {
        self.engine.release();
        self.pending_skip = None;
        self.position_secs = 0.0;
        self.duration_secs = 0.0;
        self.set_state(PlaybackState::Stopped);
    }

    fn set_state(&mut self, state: PlaybackState) {
        self.state = state;
        self.events.emit(StateEvent::PlaybackStateChanged {
            state,
            song_id: self.queue.current_id().cloned(),
        });
    }

    fn persist_song(&mut self, id: &SongId) {
        if let Some(song) = self.library.get(id) {
            if let Err(e) = self.store.upsert(song) {
                warn!(song = %id, error = %e, "Failed to persist song");
            }
        }
    }

    fn persist_playlists(&mut self) {
        if let Err(e) = self.store.save_playlists(self.playlists.all()) {
            warn!(error = %e, "Failed to persist playlists");
        }
    }

    fn playlists_changed(&mut self) {
        self.persist_playlists();
        self.events.emit(StateEvent::PlaylistsChanged);
    }

    fn emit_queue_changed(&mut self) {
        self.events.emit(StateEvent::QueueChanged {
            length: self.queue.len(),
            current_index: self.queue.current_index(),
        });
    }

    fn emit_position_changed(&mut self) {
        self.events.emit(StateEvent::PositionChanged {
            position_secs: self.position_secs,
            duration_secs: self.duration_secs,
        });
    }

    fn emit_library_changed(&mut self) {
        self.events.emit(StateEvent::LibraryChanged {
            count: self.library.len(),
        });
    }

    fn emit_selection_changed(&mut self) {
        self.events.emit(StateEvent::SelectionChanged {
            active: self.selection.is_active(),
            count: self.selection.len(),
        });
    }

    fn emit_view_changed(&mut self) {
        self.events.emit(StateEvent::ViewChanged {
            view: self.active_view.clone(),
        });
    }

    fn emit_volume_changed(&mut self) {
        self.events.emit(StateEvent::VolumeChanged {
            level: self.volume,
            is_muted: self.is_muted(),
        });
    }
}

fn clamp_volume(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}

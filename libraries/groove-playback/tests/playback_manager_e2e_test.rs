//! End-to-end tests for PlaybackManager
//!
//! Covers the library lifecycle around playback:
//! - Deletion cascade
//! - Batch operations
//! - Engine failures and error skips
//! - Persistence mirroring and swallowed store failures
//! - Playlist views and drag-drop reordering
//! - Event observation

mod common;

use common::{FailingStore, FakeEngine, Harness};
use groove_core::{
    error::GrooveError,
    traits::DurableStore,
    types::{MetadataPatch, PlaylistId, SongImport, SourceRef, View},
};
use groove_playback::{EngineEvent, PlaybackConfig, PlaybackManager, PlaybackState, StateEvent};
use groove_storage::MemoryStore;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

// ============================================================================
// Import & Metadata
// ============================================================================

#[test]
fn import_uses_filename_defaults_and_persists() {
    let mut h = Harness::new();
    let id = h.manager.import(SongImport::new(
        "So What.flac",
        SourceRef::new("/jazz/So What.flac"),
    ));

    let song = h.manager.library().get(&id).unwrap();
    assert_eq!(song.title, "So What");
    assert_eq!(song.artist, "Unknown Artist");
    assert_eq!(song.album, "Unknown Album");
    assert_eq!(song.duration_seconds, 0.0);
    assert!(h.store.contains(&id));
}

#[test]
fn metadata_for_deleted_song_is_discarded() {
    let mut h = Harness::new();
    let ids = h.import(&["Track"]);
    h.manager.delete_song(&ids[0]).unwrap();

    let patch = MetadataPatch {
        title: Some("Late".to_string()),
        ..Default::default()
    };
    assert!(!h.manager.apply_metadata(&ids[0], &patch));
    assert!(h.manager.library().is_empty());
    assert_eq!(h.store.song_count(), 0);
}

#[test]
fn metadata_patch_updates_song_and_store() {
    let mut h = Harness::new();
    let ids = h.import(&["01 - track"]);

    let patch = MetadataPatch {
        title: Some("Kind of Blue".to_string()),
        artist: Some("Miles Davis".to_string()),
        album: Some("  ".to_string()),
        ..Default::default()
    };
    assert!(h.manager.apply_metadata(&ids[0], &patch));

    let stored = h.store.read_all().unwrap();
    assert_eq!(stored[0].title, "Kind of Blue");
    assert_eq!(stored[0].artist, "Miles Davis");
    assert_eq!(stored[0].album, "Unknown Album");
}

#[test]
fn duration_is_backfilled_when_known() {
    let mut h = Harness::new();
    let ids = h.import(&["A"]);
    h.manager.play_song(&ids[0]).unwrap();

    h.manager
        .handle_engine_event(EngineEvent::DurationKnown {
            duration_secs: 187.5,
        })
        .unwrap();

    assert_eq!(h.manager.current_song().unwrap().duration_seconds, 187.5);
    assert_eq!(h.store.read_all().unwrap()[0].duration_seconds, 187.5);
    assert_eq!(h.manager.duration_secs(), 187.5);
}

#[test]
fn time_updates_track_position() {
    let mut h = Harness::new();
    let ids = h.import(&["A"]);
    h.manager.play_song(&ids[0]).unwrap();

    h.manager
        .handle_engine_event(EngineEvent::TimeUpdated { position_secs: 12.0 })
        .unwrap();
    assert_eq!(h.manager.position_secs(), 12.0);
}

// ============================================================================
// Deletion Cascade
// ============================================================================

#[test]
fn deleting_current_song_halts_and_scrubs_everywhere() {
    let mut h = Harness::new();
    let ids = h.import(&["A", "B", "C"]);
    let mix = h.manager.create_playlist("Mix").unwrap();
    h.manager.add_to_playlist(&mix, &ids).unwrap();
    h.manager
        .add_to_playlist(&PlaylistId::favorites(), &ids[1..2])
        .unwrap();
    h.manager.play_song(&ids[1]).unwrap();

    h.manager.delete_song(&ids[1]).unwrap();

    assert_eq!(h.manager.state(), PlaybackState::Stopped);
    assert!(h.engine.log().loaded.is_none());
    // Pointer lands on the follower without starting it
    assert_eq!(h.current_title().as_deref(), Some("C"));
    assert_eq!(h.manager.queue().items(), &[ids[0].clone(), ids[2].clone()]);

    assert!(!h.manager.library().contains(&ids[1]));
    assert!(!h.store.contains(&ids[1]));
    assert!(h.manager.history_songs().is_empty());
    for playlist in h.manager.playlists().all() {
        assert!(!playlist.contains(&ids[1]));
    }

    let saved = h.store.load_playlists().unwrap().unwrap();
    assert!(saved.iter().all(|p| !p.contains(&ids[1])));
}

#[test]
fn late_engine_reports_after_delete_stay_stopped() {
    let mut h = Harness::new();
    let ids = h.import(&["A", "B", "C"]);
    h.manager.play_song(&ids[0]).unwrap();
    h.manager.delete_song(&ids[0]).unwrap();
    let loads = h.engine.log().loads.len();

    h.manager.handle_engine_event(EngineEvent::Ended).unwrap();
    h.manager
        .handle_engine_event(EngineEvent::Error {
            message: "decoder gone".to_string(),
        })
        .unwrap();

    assert_eq!(h.manager.state(), PlaybackState::Stopped);
    assert_eq!(h.current_title().as_deref(), Some("B"));
    assert_eq!(h.engine.log().loads.len(), loads);
    assert_eq!(h.manager.next_deadline(), None);
}

#[test]
fn deleting_other_song_keeps_playing() {
    let mut h = Harness::new();
    let ids = h.import(&["A", "B", "C"]);
    h.manager.play_song(&ids[1]).unwrap();

    h.manager.delete_song(&ids[0]).unwrap();

    assert_eq!(h.manager.state(), PlaybackState::Playing);
    assert_eq!(h.manager.queue().current_index(), Some(0));
    assert_eq!(h.current_title().as_deref(), Some("B"));
}

#[test]
fn deleting_last_queued_song_empties_queue() {
    let mut h = Harness::new();
    let ids = h.import(&["Solo"]);
    h.manager.play_song(&ids[0]).unwrap();

    h.manager.delete_song(&ids[0]).unwrap();

    assert!(h.manager.queue().is_empty());
    assert_eq!(h.manager.queue().current_index(), None);
    assert_eq!(h.manager.state(), PlaybackState::Stopped);
}

#[test]
fn deleting_unknown_song_fails() {
    let mut h = Harness::new();
    h.import(&["A"]);
    let other = Harness::new().import(&["B"]).remove(0);

    assert!(matches!(
        h.manager.delete_song(&other),
        Err(GrooveError::SongNotFound(_))
    ));
}

#[test]
fn clear_library_removes_everything() {
    let mut h = Harness::new();
    let ids = h.import(&["A", "B"]);
    h.manager
        .add_to_playlist(&PlaylistId::favorites(), &ids)
        .unwrap();
    h.manager.play_song(&ids[0]).unwrap();

    h.manager.clear_library();

    assert!(h.manager.library().is_empty());
    assert!(h.manager.queue().is_empty());
    assert_eq!(h.store.song_count(), 0);
    assert!(h.manager.playlists().all()[0].song_ids.is_empty());
}

// ============================================================================
// Batch
// ============================================================================

#[test]
fn batch_delete_removes_selection_and_exits() {
    let mut h = Harness::new();
    let ids = h.import(&["A", "B", "C"]);

    h.manager.enter_batch();
    h.manager.toggle_select(&ids[0]);
    h.manager.toggle_select(&ids[2]);
    assert_eq!(h.manager.apply_delete(), 2);

    assert!(!h.manager.selection().is_active());
    let titles: Vec<String> = h
        .manager
        .library()
        .songs()
        .iter()
        .map(|s| s.title.clone())
        .collect();
    assert_eq!(titles, vec!["B"]);
}

#[test]
fn batch_actions_while_inactive_do_nothing() {
    let mut h = Harness::new();
    let ids = h.import(&["A"]);
    h.manager.toggle_select(&ids[0]);

    assert_eq!(h.manager.apply_delete(), 0);
    assert_eq!(
        h.manager
            .apply_add_to_playlists(&[PlaylistId::favorites()])
            .unwrap(),
        0
    );
    assert!(h.manager.apply_export().is_empty());
    assert_eq!(h.manager.library().len(), 1);
}

#[test]
fn batch_add_to_playlists_dedups() {
    let mut h = Harness::new();
    let ids = h.import(&["A", "B", "C"]);
    let fav = PlaylistId::favorites();
    let mix = h.manager.create_playlist("Mix").unwrap();
    h.manager.add_to_playlist(&fav, &ids[..1]).unwrap();

    h.manager.enter_batch();
    h.manager.select_all_toggle();
    let added = h
        .manager
        .apply_add_to_playlists(&[fav.clone(), mix.clone()])
        .unwrap();

    assert_eq!(added, 2 + 3);
    assert_eq!(h.manager.playlists().get(&fav).unwrap().song_ids, ids);
    assert_eq!(h.manager.playlists().get(&mix).unwrap().song_ids, ids);
    assert!(!h.manager.selection().is_active());
}

#[test]
fn batch_add_to_missing_playlist_changes_nothing() {
    let mut h = Harness::new();
    h.import(&["A"]);

    h.manager.enter_batch();
    h.manager.select_all_toggle();
    let result = h.manager.apply_add_to_playlists(&[
        PlaylistId::favorites(),
        PlaylistId::new("pl_missing"),
    ]);

    assert!(matches!(result, Err(GrooveError::PlaylistNotFound(_))));
    assert!(h.manager.playlists().all()[0].song_ids.is_empty());
}

#[test]
fn export_skips_songs_without_source() {
    let store = MemoryStore::new();
    {
        let mut first = Harness::with_store(store.clone());
        first.import(&["Stored"]);
    }

    let mut h = Harness::with_store(store);
    h.manager.load_from_store().unwrap();
    let fresh = h.import(&["Fresh"]);

    h.manager.enter_batch();
    h.manager.select_all_toggle();
    let items = h.manager.apply_export();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].song_id, fresh[0]);
    assert_eq!(items[0].source.as_str(), "/music/Fresh.mp3");
    assert!(!h.manager.selection().is_active());
}

#[test]
fn select_all_covers_only_the_view() {
    let mut h = Harness::new();
    let ids = h.import(&["A", "B", "C"]);
    let fav = PlaylistId::favorites();
    h.manager.add_to_playlist(&fav, &ids[1..2]).unwrap();
    h.manager.switch_view(View::Playlist(fav)).unwrap();

    h.manager.enter_batch();
    h.manager.select_all_toggle();
    assert_eq!(h.manager.selection().len(), 1);
    assert!(h.manager.selection().contains(&ids[1]));

    h.manager.select_all_toggle();
    assert!(h.manager.selection().is_empty());
}

#[test]
fn switching_view_leaves_batch_mode() {
    let mut h = Harness::new();
    let ids = h.import(&["A"]);
    h.manager.enter_batch();
    h.manager.toggle_select(&ids[0]);

    h.manager.switch_view(View::History).unwrap();

    assert!(!h.manager.selection().is_active());
    assert!(h.manager.selection().is_empty());
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn rejected_play_pauses_without_retry() {
    let mut h = Harness::new();
    let ids = h.import(&["A", "B"]);
    h.engine.reject_play(true);

    let result = h.manager.play_song(&ids[0]);

    assert!(matches!(result, Err(GrooveError::PlaybackRejected(_))));
    assert_eq!(h.manager.state(), PlaybackState::Paused);
    assert_eq!(h.engine.log().play_calls, 1);
    assert!(h
        .manager
        .drain_events()
        .iter()
        .any(|e| matches!(e, StateEvent::PlaybackFailed { .. })));

    // User tries again once allowed
    h.engine.reject_play(false);
    h.manager.toggle_play().unwrap();
    assert_eq!(h.manager.state(), PlaybackState::Playing);
    assert_eq!(h.current_title().as_deref(), Some("A"));
}

#[test]
fn engine_error_skips_after_delay() {
    let mut h = Harness::new();
    let ids = h.import(&["Broken", "Fine"]);
    h.manager.play_song(&ids[0]).unwrap();

    h.manager
        .handle_engine_event(EngineEvent::Error {
            message: "decode error".to_string(),
        })
        .unwrap();
    assert_eq!(h.manager.state(), PlaybackState::Paused);
    assert!(h.manager.next_deadline().is_some());

    // Not yet
    h.manager.poll(Instant::now()).unwrap();
    assert_eq!(h.current_title().as_deref(), Some("Broken"));

    h.manager
        .poll(Instant::now() + Duration::from_secs(2))
        .unwrap();
    assert_eq!(h.current_title().as_deref(), Some("Fine"));
    assert_eq!(h.manager.state(), PlaybackState::Playing);
    assert!(h.manager.next_deadline().is_none());
}

#[test]
fn manual_skip_cancels_pending_error_skip() {
    let mut h = Harness::new();
    let ids = h.import(&["A", "B", "C"]);
    h.manager.play_song(&ids[0]).unwrap();
    h.manager
        .handle_engine_event(EngineEvent::Error {
            message: "boom".to_string(),
        })
        .unwrap();

    h.manager.next().unwrap();
    h.manager
        .poll(Instant::now() + Duration::from_secs(5))
        .unwrap();

    assert_eq!(h.current_title().as_deref(), Some("B"));
}

#[test]
fn songs_from_previous_session_have_invalid_sources() {
    let store = MemoryStore::new();
    {
        let mut first = Harness::with_store(store.clone());
        first.import(&["Yesterday"]);
    }

    let mut h = Harness::with_store(store);
    h.manager.load_from_store().unwrap();
    let id = h.manager.library().songs()[0].id.clone();

    let result = h.manager.play_song(&id);

    assert!(matches!(result, Err(GrooveError::SourceInvalidated(_))));
    assert!(result.unwrap_err().is_user_facing());
    assert_eq!(h.manager.state(), PlaybackState::Stopped);
    assert!(h.engine.log().loads.is_empty());
}

#[test]
fn store_failures_never_roll_back_memory() {
    let engine = FakeEngine::default();
    let mut manager = PlaybackManager::new(
        PlaybackConfig::default(),
        Box::new(engine),
        Box::new(FailingStore),
    );

    let id = manager.import(SongImport::new("a.mp3", SourceRef::new("/a.mp3")));
    let mix = manager.create_playlist("Mix").unwrap();
    manager.add_to_playlist(&mix, &[id.clone()]).unwrap();

    assert_eq!(manager.library().len(), 1);
    assert!(manager.playlists().get(&mix).unwrap().contains(&id));

    manager.delete_song(&id).unwrap();
    assert!(manager.library().is_empty());
}

// ============================================================================
// Playlists & Views
// ============================================================================

#[test]
fn favorites_cannot_be_deleted() {
    let mut h = Harness::new();
    let result = h.manager.delete_playlist(&PlaylistId::favorites());

    assert!(matches!(result, Err(GrooveError::GuardedDeletion(_))));
    assert!(h.manager.playlists().contains(&PlaylistId::favorites()));
}

#[test]
fn deleting_active_playlist_falls_back_to_library() {
    let mut h = Harness::new();
    let mix = h.manager.create_playlist("Mix").unwrap();
    h.manager.switch_view(View::Playlist(mix.clone())).unwrap();

    h.manager.delete_playlist(&mix).unwrap();

    assert_eq!(h.manager.active_view(), &View::Library);
    let saved = h.store.load_playlists().unwrap().unwrap();
    assert_eq!(saved.len(), 1);
}

#[test]
fn switching_to_unknown_playlist_fails() {
    let mut h = Harness::new();
    let result = h.manager.switch_view(View::Playlist(PlaylistId::new("pl_ghost")));
    assert!(matches!(result, Err(GrooveError::PlaylistNotFound(_))));
    assert_eq!(h.manager.active_view(), &View::Library);
}

#[test]
fn history_view_is_most_recent_first() {
    let mut h = Harness::new();
    let ids = h.import(&["A", "B", "C"]);
    h.manager.play_song(&ids[0]).unwrap();
    h.manager.next().unwrap();
    h.manager.next().unwrap();
    h.manager.play_song(&ids[0]).unwrap();

    let titles: Vec<String> = h
        .manager
        .view_songs_for(&View::History, "")
        .into_iter()
        .map(|s| s.title)
        .collect();
    assert_eq!(titles, vec!["A", "C", "B"]);
}

#[test]
fn reorder_view_moves_playlist_and_live_queue() {
    let mut h = Harness::new();
    let ids = h.import(&["A", "B", "C"]);
    let mix = h.manager.create_playlist("Mix").unwrap();
    h.manager.add_to_playlist(&mix, &ids).unwrap();
    h.manager.switch_view(View::Playlist(mix.clone())).unwrap();
    h.manager.play_song(&ids[1]).unwrap();

    h.manager.reorder_view(0, 2).unwrap();

    let expected = vec![ids[1].clone(), ids[2].clone(), ids[0].clone()];
    assert_eq!(h.manager.playlists().get(&mix).unwrap().song_ids, expected);
    assert_eq!(h.manager.queue().items(), expected.as_slice());
    assert_eq!(h.manager.queue().current_index(), Some(0));
    assert_eq!(h.current_title().as_deref(), Some("B"));

    let saved = h.store.load_playlists().unwrap().unwrap();
    let saved_mix = saved.iter().find(|p| p.id == mix).unwrap();
    assert_eq!(saved_mix.song_ids, expected);
}

#[test]
fn reorder_view_leaves_unrelated_queue_alone() {
    let mut h = Harness::new();
    let ids = h.import(&["A", "B"]);
    let fav = PlaylistId::favorites();
    h.manager.add_to_playlist(&fav, &ids).unwrap();
    h.manager.play_song(&ids[0]).unwrap();

    h.manager.switch_view(View::Playlist(fav)).unwrap();
    h.manager.reorder_view(0, 1).unwrap();

    assert_eq!(h.manager.queue().items(), ids.as_slice());
}

#[test]
fn removing_from_playlist_drops_song_from_its_queue() {
    let mut h = Harness::new();
    let ids = h.import(&["A", "B", "C"]);
    let mix = h.manager.create_playlist("Mix").unwrap();
    h.manager.add_to_playlist(&mix, &ids).unwrap();
    h.manager.switch_view(View::Playlist(mix.clone())).unwrap();
    h.manager.play_song(&ids[0]).unwrap();

    h.manager.remove_from_playlist(&mix, &ids[1]).unwrap();

    assert_eq!(h.manager.queue().items(), &[ids[0].clone(), ids[2].clone()]);
    assert_eq!(h.manager.state(), PlaybackState::Playing);
    h.manager.next().unwrap();
    assert_eq!(h.current_title().as_deref(), Some("C"));
}

#[test]
fn removing_playing_song_from_playlist_halts() {
    let mut h = Harness::new();
    let ids = h.import(&["A", "B", "C"]);
    let mix = h.manager.create_playlist("Mix").unwrap();
    h.manager.add_to_playlist(&mix, &ids).unwrap();
    h.manager.switch_view(View::Playlist(mix.clone())).unwrap();
    h.manager.play_song(&ids[1]).unwrap();

    h.manager.remove_from_playlist(&mix, &ids[1]).unwrap();

    assert_eq!(h.manager.state(), PlaybackState::Stopped);
    assert_eq!(h.current_title().as_deref(), Some("C"));
    // Still in the library, only out of the playlist
    assert!(h.manager.library().contains(&ids[1]));
}

#[test]
fn removing_from_other_playlist_leaves_queue() {
    let mut h = Harness::new();
    let ids = h.import(&["A", "B"]);
    let fav = PlaylistId::favorites();
    h.manager.add_to_playlist(&fav, &ids).unwrap();
    h.manager.play_song(&ids[0]).unwrap();

    h.manager.remove_from_playlist(&fav, &ids[1]).unwrap();

    assert_eq!(h.manager.queue().items(), ids.as_slice());
}

#[test]
fn adding_to_playlist_extends_its_queue() {
    let mut h = Harness::new();
    let ids = h.import(&["A", "B", "C"]);
    let mix = h.manager.create_playlist("Mix").unwrap();
    h.manager.add_to_playlist(&mix, &ids[..2]).unwrap();
    h.manager.switch_view(View::Playlist(mix.clone())).unwrap();
    h.manager.play_song(&ids[1]).unwrap();

    h.manager.add_to_playlist(&mix, &ids).unwrap();

    assert_eq!(h.manager.queue().items(), ids.as_slice());
    assert_eq!(h.manager.queue().current_index(), Some(1));
    h.manager.next().unwrap();
    assert_eq!(h.current_title().as_deref(), Some("C"));
}

#[test]
fn reorder_playlist_moves_its_queue() {
    let mut h = Harness::new();
    let ids = h.import(&["A", "B", "C"]);
    let mix = h.manager.create_playlist("Mix").unwrap();
    h.manager.add_to_playlist(&mix, &ids).unwrap();
    h.manager.switch_view(View::Playlist(mix.clone())).unwrap();
    h.manager.play_song(&ids[0]).unwrap();
    h.manager.switch_view(View::Library).unwrap();

    h.manager.reorder_playlist(&mix, 0, 2).unwrap();

    let expected = vec![ids[1].clone(), ids[2].clone(), ids[0].clone()];
    assert_eq!(h.manager.playlists().get(&mix).unwrap().song_ids, expected);
    assert_eq!(h.manager.queue().items(), expected.as_slice());
    assert_eq!(h.manager.queue().current_index(), Some(2));
    assert_eq!(h.current_title().as_deref(), Some("A"));
}

#[test]
fn reorder_playlist_to_front_moves_queue() {
    let mut h = Harness::new();
    let ids = h.import(&["A", "B", "C"]);
    let mix = h.manager.create_playlist("Mix").unwrap();
    h.manager.add_to_playlist(&mix, &ids).unwrap();
    h.manager.switch_view(View::Playlist(mix.clone())).unwrap();
    h.manager.play_song(&ids[0]).unwrap();

    // Moving C to the front is a move from queue slot 2 to slot 0
    h.manager.reorder_playlist(&mix, 2, 0).unwrap();

    let expected = vec![ids[2].clone(), ids[0].clone(), ids[1].clone()];
    assert_eq!(h.manager.queue().items(), expected.as_slice());
    assert_eq!(h.current_title().as_deref(), Some("A"));
}

#[test]
fn deleting_playlist_keeps_its_queue_playing() {
    let mut h = Harness::new();
    let ids = h.import(&["A", "B", "C"]);
    let mix = h.manager.create_playlist("Mix").unwrap();
    h.manager.add_to_playlist(&mix, &ids[..2]).unwrap();
    h.manager.switch_view(View::Playlist(mix.clone())).unwrap();
    h.manager.play_song(&ids[0]).unwrap();

    h.manager.delete_playlist(&mix).unwrap();

    assert_eq!(h.manager.active_view(), &View::Library);
    assert_eq!(h.manager.state(), PlaybackState::Playing);
    assert_eq!(h.manager.queue().items(), &ids[..2]);
    h.manager.next().unwrap();
    assert_eq!(h.current_title().as_deref(), Some("B"));
}

#[test]
fn reorder_view_outside_playlists_is_rejected() {
    let mut h = Harness::new();
    h.import(&["A", "B"]);

    assert!(matches!(
        h.manager.reorder_view(0, 1),
        Err(GrooveError::InvalidInput(_))
    ));
}

#[test]
fn playlists_survive_restart() {
    let store = MemoryStore::new();
    let (ids, mix) = {
        let mut first = Harness::with_store(store.clone());
        let ids = first.import(&["A", "B"]);
        let mix = first.manager.create_playlist("Mix").unwrap();
        first.manager.add_to_playlist(&mix, &ids).unwrap();
        first.manager.reorder_playlist(&mix, 0, 1).unwrap();
        (ids, mix)
    };

    let mut h = Harness::with_store(store);
    h.manager.load_from_store().unwrap();

    assert_eq!(h.manager.library().len(), 2);
    let playlist = h.manager.playlists().get(&mix).unwrap();
    assert_eq!(playlist.song_ids, vec![ids[1].clone(), ids[0].clone()]);
    assert!(h.manager.playlists().all()[0].is_default());
}

// ============================================================================
// Volume & Events
// ============================================================================

#[test]
fn toggle_mute_restores_last_volume() {
    let mut h = Harness::new();
    h.manager.set_volume(0.6);

    h.manager.toggle_mute();
    assert!(h.manager.is_muted());
    assert_eq!(h.engine.log().volume, 0.0);

    h.manager.toggle_mute();
    assert_eq!(h.manager.volume(), 0.6);
    assert_eq!(h.engine.log().volume, 0.6);
}

#[test]
fn volume_is_clamped() {
    let mut h = Harness::new();
    h.manager.set_volume(3.0);
    assert_eq!(h.manager.volume(), 1.0);
    h.manager.set_volume(-1.0);
    assert_eq!(h.manager.volume(), 0.0);
}

#[test]
fn seek_is_clamped_to_duration() {
    let mut h = Harness::new();
    let ids = h.import(&["A"]);
    h.manager.play_song(&ids[0]).unwrap();
    h.manager
        .handle_engine_event(EngineEvent::DurationKnown { duration_secs: 100.0 })
        .unwrap();

    h.manager.seek(250.0);
    assert_eq!(h.manager.position_secs(), 100.0);
    assert_eq!(h.engine.log().seeks, vec![100.0]);
}

#[test]
fn subscribers_see_every_event() {
    let mut h = Harness::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    h.manager
        .subscribe(move |event| sink.borrow_mut().push(event.clone()));

    let ids = h.import(&["A"]);
    h.manager.play_song(&ids[0]).unwrap();

    let drained = h.manager.drain_events();
    assert_eq!(*seen.borrow(), drained);
    assert!(drained
        .iter()
        .any(|e| matches!(e, StateEvent::LibraryChanged { count: 1 })));
    assert!(drained.iter().any(|e| matches!(
        e,
        StateEvent::PlaybackStateChanged {
            state: PlaybackState::Playing,
            ..
        }
    )));
    assert!(!h.manager.has_pending_events());
}

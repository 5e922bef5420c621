//! Batch selection
//!
//! Transient multi-select mode for bulk delete, export, and
//! add-to-playlist. The selection only exists while the mode is active.

use groove_core::types::SongId;
use std::collections::HashSet;

/// Batch-mode selection state
#[derive(Debug, Clone, Default)]
pub struct Selection {
    active: bool,
    ids: HashSet<SongId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter batch mode with an empty selection
    pub fn enter(&mut self) {
        self.active = true;
        self.ids.clear();
    }

    /// Leave batch mode, discarding the selection
    pub fn exit(&mut self) {
        self.active = false;
        self.ids.clear();
    }

    /// Flip batch mode on or off; returns the new state
    pub fn toggle_mode(&mut self) -> bool {
        if self.active {
            self.exit();
        } else {
            self.enter();
        }
        self.active
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Add or remove one song; returns whether it is now selected
    ///
    /// Ignored outside batch mode.
    pub fn toggle(&mut self, id: &SongId) -> bool {
        if !self.active {
            return false;
        }
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    /// Select-all over the currently visible songs
    ///
    /// If every visible song is already selected they are all deselected,
    /// otherwise all of them are selected. Selections outside `visible` are
    /// left alone.
    pub fn select_all_toggle(&mut self, visible: &[SongId]) {
        if !self.active {
            return;
        }

        if visible.iter().all(|id| self.ids.contains(id)) {
            for id in visible {
                self.ids.remove(id);
            }
        } else {
            self.ids.extend(visible.iter().cloned());
        }
    }

    /// Drop a song that no longer exists
    pub fn remove(&mut self, id: &SongId) -> bool {
        self.ids.remove(id)
    }

    pub fn contains(&self, id: &SongId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &HashSet<SongId> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Take the selected IDs and leave batch mode
    pub fn take(&mut self) -> HashSet<SongId> {
        self.active = false;
        std::mem::take(&mut self.ids)
    }
}

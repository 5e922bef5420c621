//! Recently played tracking
//!
//! Maintains a bounded, duplicate-free list of played song IDs with the most
//! recent play at the front.

use groove_core::types::SongId;
use std::collections::VecDeque;

/// Bounded play history
///
/// Re-playing a song moves it to the front instead of adding a second
/// entry. When full, the oldest entry falls off the back.
#[derive(Debug, Clone)]
pub struct History {
    /// Most recent = front
    ids: VecDeque<SongId>,

    /// Maximum history size
    max_size: usize,
}

impl History {
    /// Create new history with specified maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            ids: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Record that a song started playing
    pub fn record_play(&mut self, id: SongId) {
        if self.max_size == 0 {
            return;
        }

        self.remove(&id);
        self.ids.push_front(id);
        self.ids.truncate(self.max_size);
    }

    /// Forget a song (used when it is deleted from the library)
    pub fn remove(&mut self, id: &SongId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        self.ids.len() != before
    }

    /// IDs, most recent first
    pub fn ids(&self) -> Vec<SongId> {
        self.ids.iter().cloned().collect()
    }

    pub fn contains(&self, id: &SongId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(50)
    }
}

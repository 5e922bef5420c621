//! Circular play queue
//!
//! A snapshot of the view the user played from, plus a pointer to the
//! current position. The queue wraps at both ends; it never runs out.

use crate::{
    shuffle::pick_random_index,
    types::{AdvanceTrigger, Direction, PlaybackMode},
};
use groove_core::{
    error::Result,
    reorder::{follow_move, move_item},
    types::SongId,
};
use rand::Rng;

/// Result of removing a song from the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The song was not in the queue
    NotPresent,

    /// One or more entries were removed; items remain
    Removed {
        /// The current entry was among them, so playback must halt
        current_removed: bool,
    },

    /// The queue is now empty
    Emptied,
}

/// Play queue
///
/// ```text
/// items:   [A] [B] [C] [D]
///                   ^
///                current
/// ```
///
/// Items are a copy taken when playback starts. Later edits to the source
/// view do not flow into the queue except through the explicit reconcile
/// operations.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    items: Vec<SongId>,
    current: Option<usize>,
    mode: PlaybackMode,
}

impl Queue {
    /// Create new empty queue
    pub fn new(mode: PlaybackMode) -> Self {
        Self {
            items: Vec::new(),
            current: None,
            mode,
        }
    }

    /// Replace the queue with a new snapshot
    ///
    /// The pointer lands on `start`, or is cleared when `start` is absent.
    pub fn build(&mut self, items: Vec<SongId>, start: &SongId) -> Option<usize> {
        self.current = items.iter().position(|id| id == start);
        self.items = items;
        self.current
    }

    /// Move the pointer according to the current mode
    ///
    /// Returns the new position, or `None` for an empty queue. Without a
    /// pointer, forward starts at the head and backward at the tail.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        direction: Direction,
        trigger: AdvanceTrigger,
        rng: &mut R,
    ) -> Option<usize> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }

        let next = match self.current {
            None => match direction {
                Direction::Forward => 0,
                Direction::Backward => len - 1,
            },
            Some(index) => match (self.mode, direction, trigger) {
                (PlaybackMode::RepeatOne, _, AdvanceTrigger::TrackEnded) => index,
                (PlaybackMode::Shuffle, Direction::Forward, _) => {
                    pick_random_index(len, rng).unwrap_or(0)
                }
                (_, Direction::Forward, _) => (index + 1) % len,
                (_, Direction::Backward, _) => (index + len - 1) % len,
            },
        };

        self.current = Some(next);
        self.current
    }

    /// Drop every occurrence of a deleted song
    ///
    /// A pointer after removed entries shifts down with them. If the current
    /// entry itself goes, the pointer stays on the slot and so lands on the
    /// song that followed (or wraps to the head if it was the tail).
    pub fn reconcile_removal(&mut self, id: &SongId) -> RemovalOutcome {
        if !self.items.contains(id) {
            return RemovalOutcome::NotPresent;
        }

        let removed_before = self.current.map_or(0, |current| {
            self.items[..current].iter().filter(|s| *s == id).count()
        });
        let current_removed = self
            .current
            .is_some_and(|current| &self.items[current] == id);

        self.items.retain(|s| s != id);

        if self.items.is_empty() {
            self.current = None;
            return RemovalOutcome::Emptied;
        }

        let len = self.items.len();
        self.current = self.current.map(|current| {
            let shifted = current - removed_before;
            if shifted >= len {
                0
            } else {
                shifted
            }
        });

        RemovalOutcome::Removed { current_removed }
    }

    /// Add songs at the tail; the pointer does not move
    pub fn append(&mut self, ids: &[SongId]) {
        self.items.extend_from_slice(ids);
    }

    /// Move an entry, keeping the pointer on the same song
    pub fn reconcile_reorder(&mut self, from: usize, to: usize) -> Result<()> {
        move_item(&mut self.items, from, to)?;
        self.current = self.current.map(|current| follow_move(current, from, to));
        Ok(())
    }

    /// Switch to the next mode in the cycle
    pub fn cycle_mode(&mut self) -> PlaybackMode {
        self.mode = self.mode.cycled();
        self.mode
    }

    pub fn set_mode(&mut self, mode: PlaybackMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn items(&self) -> &[SongId] {
        &self.items
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// ID of the song under the pointer
    pub fn current_id(&self) -> Option<&SongId> {
        self.current.and_then(|index| self.items.get(index))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clear items and pointer; the mode survives
    pub fn clear(&mut self) {
        self.items.clear();
        self.current = None;
    }
}

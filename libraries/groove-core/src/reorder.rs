//! Reorder engine
//!
//! A single splice-out/splice-in move shared by playlist custom ordering and
//! live-queue reordering. It knows nothing about what the sequence holds.

use crate::error::{GrooveError, Result};

/// Move the element at `from` so it ends up at `to`
///
/// `to` is an index into the sequence *after* the element was taken out,
/// which for a move inside one sequence is the element's final position.
/// `from == to` is a no-op. Moving back (`to`, `from`) restores the original
/// order.
pub fn move_item<T>(items: &mut [T], from: usize, to: usize) -> Result<()> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(GrooveError::IndexOutOfBounds { index, len });
        }
    }

    if from < to {
        items[from..=to].rotate_left(1);
    } else if to < from {
        items[to..=from].rotate_right(1);
    }

    Ok(())
}

/// Where an index points after `move_item(from, to)`
///
/// Keeps a position attached to the same logical element across a move.
pub fn follow_move(index: usize, from: usize, to: usize) -> usize {
    if index == from {
        to
    } else if from < index && index <= to {
        index - 1
    } else if to <= index && index < from {
        index + 1
    } else {
        index
    }
}

//! Shuffle selection
//!
//! Shuffle mode does not permute the queue. Each forward advance picks a
//! uniformly random position, so the same track can come up again before
//! the others have played.

use rand::Rng;

/// Pick a uniformly random index in `[0, len)`
///
/// Returns `None` for an empty queue.
pub fn pick_random_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(rng.gen_range(0..len))
    }
}

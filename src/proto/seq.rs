//! Modular sequence-number arithmetic over [`SEQ_SPACE`].

use super::config::SEQ_SPACE;

/// Forward modular distance from `from` to `to`: how many steps
/// `from` must advance (wrapping at `SEQ_SPACE`) to reach `to`.
pub fn forward_distance(from: u8, to: u8) -> usize {
    ((to as usize + SEQ_SPACE) - from as usize) % SEQ_SPACE
}

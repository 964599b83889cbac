//! The allocation cursor and rollback snapshots.
//!
//! A [`Frontier`] is the pair `(block index, remaining slots in that block)`.
//! The block index is `None` until the first block has been claimed, which
//! replaces the "index = -1" wraparound trick with an explicit state.
//!
//! A [`Checkpoint`] is a frontier frozen at capture time, tagged with the
//! configuration epoch of the arena that produced it.

use std::cmp::Ordering;

/// Position of the next free slot in a block arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Frontier {
    /// Block currently being filled, or `None` before the first claim.
    pub index: Option<usize>,
    /// Free slots left in the current block.
    pub remains: usize,
}

impl Frontier {
    /// The "no block yet" frontier of a freshly configured arena.
    pub const EMPTY: Frontier = Frontier {
        index: None,
        remains: 0,
    };

    /// Frontier at the start of block 0, as left by a full rollback.
    pub fn start(block_size: usize) -> Self {
        Self {
            index: Some(0),
            remains: block_size,
        }
    }

    /// Number of slots claimed before this frontier.
    ///
    /// Counts every slot of every earlier block, including tails abandoned
    /// by a run that did not fit.
    pub fn position(&self, block_size: usize) -> usize {
        match self.index {
            Some(index) => index * block_size + (block_size - self.remains),
            None => 0,
        }
    }

    /// Offset of the next free slot within the current block.
    pub fn offset(&self, block_size: usize) -> usize {
        block_size - self.remains
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Allocation order: a later block is later; within one block, fewer
/// remaining slots is later. `None` precedes every block.
impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index
            .cmp(&other.index)
            .then_with(|| other.remains.cmp(&self.remains))
    }
}

/// An opaque snapshot of an arena's frontier.
///
/// Captured with [`BlockArena::checkpoint`](crate::BlockArena::checkpoint)
/// and consumed by [`BlockArena::rollback_to`](crate::BlockArena::rollback_to).
/// Checkpoints from the same configuration epoch compare in allocation order;
/// checkpoints from different epochs are incomparable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Checkpoint {
    frontier: Frontier,
    epoch: u64,
}

impl Checkpoint {
    pub(crate) fn new(frontier: Frontier, epoch: u64) -> Self {
        Self { frontier, epoch }
    }

    /// The frontier recorded at capture time.
    pub fn frontier(&self) -> Frontier {
        self.frontier
    }

    /// Configuration epoch of the arena at capture time.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl PartialOrd for Checkpoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.epoch != other.epoch {
            return None;
        }
        Some(self.frontier.cmp(&other.frontier))
    }
}

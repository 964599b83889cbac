//! The block arena: bump allocation over a growable block store with
//! checkpoint rollback.
//!
//! [`BlockArena`] hands out runs of already-constructed elements from
//! fixed-size blocks. Claiming a run only moves the [`Frontier`]; rolling
//! back destroys and default-reconstructs the released slots in place and
//! moves the frontier backward, leaving the blocks allocated for reuse.
//!
//! ```text
//! block 0          block 1          block 2
//! [x x x x]        [x x x .]        [. . . .]
//!                         ^ frontier (index 1, remains 1)
//! ```

use std::fmt;
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace};

use crate::block::BlockStore;
use crate::config::{AllocMode, ArenaConfig};
use crate::error::ArenaError;
use crate::frontier::{Checkpoint, Frontier};

/// Source of configuration epochs. Zero is reserved for unconfigured arenas.
static NEXT_EPOCH: AtomicU64 = AtomicU64::new(1);

fn next_epoch() -> u64 {
    NEXT_EPOCH.fetch_add(1, Ordering::Relaxed)
}

/// Location of a contiguous run of slots returned by [`BlockArena::alloc`].
///
/// A run never spans two blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Run {
    block: usize,
    offset: usize,
    len: usize,
}

impl Run {
    /// Index of the block holding the run.
    pub fn block(&self) -> usize {
        self.block
    }

    /// Offset of the first slot within its block.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of slots in the run.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the run has no slots.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Flat index of the first slot, as used by [`BlockArena::element_at`].
    pub fn start(&self, block_size: usize) -> usize {
        self.block * block_size + self.offset
    }
}

/// A typed, block-growable arena with stack-discipline rollback.
///
/// Single-writer: the arena does no internal locking. Wrap it in a
/// [`SharedArena`](crate::SharedArena) (or any other lock) when it must be
/// reached from several threads.
///
/// Precondition violations (oversized runs, use before configuration,
/// popping an empty arena) panic; every such operation also has a `try_*`
/// form that returns an [`ArenaError`] instead.
#[derive(Clone)]
pub struct BlockArena<T> {
    config: Option<ArenaConfig>,
    store: BlockStore<T>,
    frontier: Frontier,
    epoch: u64,
}

impl<T> BlockArena<T> {
    /// Create an unconfigured arena with no capacity.
    pub fn new() -> Self {
        Self {
            config: None,
            store: BlockStore::new(0, None),
            frontier: Frontier::EMPTY,
            epoch: 0,
        }
    }

    /// Reset the arena and apply `config`.
    ///
    /// Every existing block is released. Checkpoints captured before the
    /// call become stale.
    pub fn try_configure(&mut self, config: ArenaConfig) -> Result<(), ArenaError> {
        config.validate()?;
        self.reset();
        self.store = BlockStore::new(config.block_size, config.max_blocks);
        self.epoch = next_epoch();
        debug!(
            "arena configured: block_size={}, mode={}, max_blocks={:?}",
            config.block_size, config.mode, config.max_blocks
        );
        self.config = Some(config);
        Ok(())
    }

    /// Reset the arena and apply `config`.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`ArenaConfig::validate`].
    pub fn configure(&mut self, config: ArenaConfig) {
        if let Err(err) = self.try_configure(config) {
            panic!("{err}");
        }
    }

    /// Shorthand for configuring with [`ArenaConfig::new`].
    pub fn set_block_size(&mut self, block_size: usize) {
        self.configure(ArenaConfig::new(block_size));
    }

    /// Release every block and return to the unconfigured state.
    ///
    /// Calling it on an arena that is already unconfigured does nothing.
    pub fn reset(&mut self) {
        if self.config.take().is_none() && self.store.is_empty() {
            return;
        }
        debug!(
            "arena reset: releasing {} blocks ({} bytes)",
            self.store.len(),
            self.store.memory_bytes()
        );
        self.store.clear();
        self.frontier = Frontier::EMPTY;
        self.epoch = 0;
    }

    /// Active configuration, or `None` before [`configure`](Self::configure).
    pub fn config(&self) -> Option<&ArenaConfig> {
        self.config.as_ref()
    }

    /// Configured elements per block, zero when unconfigured.
    pub fn block_size(&self) -> usize {
        self.store.block_size()
    }

    /// Number of blocks in the store.
    pub fn block_count(&self) -> usize {
        self.store.len()
    }

    /// Total slots across all blocks.
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Memory held by block storage in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.store.memory_bytes()
    }

    /// The current frontier.
    pub fn frontier(&self) -> Frontier {
        self.frontier
    }

    /// Number of claimed slots, including tails skipped by runs that did
    /// not fit in their block.
    pub fn len(&self) -> usize {
        self.frontier.position(self.block_size())
    }

    /// Whether no slot is claimed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at flat position `index`, or `None` if `index >= len()`.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len() {
            return None;
        }
        let block_size = self.block_size();
        self.store.block(index / block_size).get(index % block_size)
    }

    /// Mutable element at flat position `index`, or `None` if `index >= len()`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len() {
            return None;
        }
        let block_size = self.block_size();
        self.store
            .block_mut(index / block_size)
            .get_mut(index % block_size)
    }

    /// Element at flat position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn element_at(&self, index: usize) -> &T {
        let len = self.len();
        match self.get(index) {
            Some(value) => value,
            None => panic!("index {index} out of bounds for arena of length {len}"),
        }
    }

    /// Mutable element at flat position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn element_at_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("index {index} out of bounds for arena of length {len}"),
        }
    }

    /// Slots of a run returned by [`alloc`](Self::alloc).
    pub fn run(&self, run: &Run) -> &[T] {
        self.store.block(run.block).slice(run.offset, run.len)
    }

    /// Mutable slots of a run returned by [`alloc`](Self::alloc).
    pub fn run_mut(&mut self, run: &Run) -> &mut [T] {
        self.store.block_mut(run.block).slice_mut(run.offset, run.len)
    }

    /// Iterate over claimed slots in flat order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.store
            .iter()
            .flat_map(|block| block.slice(0, block.len()).iter())
            .take(self.len())
    }

    /// Capture the current frontier for a later [`rollback_to`](Self::rollback_to).
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(self.frontier, self.epoch)
    }

    fn active(&self) -> Result<(AllocMode, usize), ArenaError> {
        self.config
            .as_ref()
            .map(|config| (config.mode, config.block_size))
            .ok_or(ArenaError::NotConfigured)
    }
}

impl<T: Default> BlockArena<T> {
    /// Create an arena with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`ArenaConfig::validate`].
    pub fn with_config(config: ArenaConfig) -> Self {
        let mut arena = Self::new();
        arena.configure(config);
        arena
    }

    /// Create a mixed-mode arena with `block_size` elements per block.
    pub fn with_block_size(block_size: usize) -> Self {
        Self::with_config(ArenaConfig::new(block_size))
    }

    /// Move the frontier to the start of the next block, allocating it if
    /// the store does not have one yet. Leaves the frontier untouched on error.
    fn advance(&mut self, block_size: usize) -> Result<usize, ArenaError> {
        let next = self.frontier.index.map_or(0, |index| index + 1);
        debug_assert!(next <= self.store.len());
        if next == self.store.len() {
            self.store.grow()?;
        }
        self.frontier = Frontier {
            index: Some(next),
            remains: block_size,
        };
        Ok(next)
    }

    /// Claim a run of `len` contiguous, default-constructed elements.
    ///
    /// Returns `Ok(None)` for `len == 0`. If the current block cannot hold
    /// the whole run, its remaining slots are skipped and the run starts at
    /// the beginning of the next block.
    pub fn try_alloc(&mut self, len: usize) -> Result<Option<Run>, ArenaError> {
        if len == 0 {
            return Ok(None);
        }
        let (mode, block_size) = self.active()?;
        if !mode.allows_run(len) {
            return Err(ArenaError::ModeViolation {
                mode,
                operation: "alloc",
            });
        }
        if len > block_size {
            return Err(ArenaError::RunTooLong {
                requested: len,
                block_size,
            });
        }
        let frontier = self.frontier;
        let block = match frontier.index {
            Some(index) if frontier.remains >= len => index,
            _ => self.advance(block_size)?,
        };
        let offset = self.frontier.offset(block_size);
        self.frontier.remains -= len;
        Ok(Some(Run { block, offset, len }))
    }

    /// Claim a run of `len` contiguous, default-constructed elements.
    ///
    /// # Panics
    ///
    /// Panics under the conditions where [`try_alloc`](Self::try_alloc) errors.
    pub fn alloc(&mut self, len: usize) -> Option<Run> {
        match self.try_alloc(len) {
            Ok(run) => run,
            Err(err) => panic!("{err}"),
        }
    }

    /// Claim a run and return its slots directly. Empty for `len == 0`.
    pub fn alloc_slice(&mut self, len: usize) -> &mut [T] {
        match self.alloc(len) {
            Some(run) => self.run_mut(&run),
            None => &mut [],
        }
    }

    /// Claim one slot and store `value` in it.
    pub fn try_push(&mut self, value: T) -> Result<(), ArenaError> {
        let (mode, block_size) = self.active()?;
        if !mode.allows_stack_ops() {
            return Err(ArenaError::ModeViolation {
                mode,
                operation: "push",
            });
        }
        let frontier = self.frontier;
        let block = match frontier.index {
            Some(index) if frontier.remains > 0 => index,
            _ => self.advance(block_size)?,
        };
        let offset = self.frontier.offset(block_size);
        self.store.block_mut(block).put(offset, value);
        self.frontier.remains -= 1;
        Ok(())
    }

    /// Claim one slot and store `value` in it.
    ///
    /// # Panics
    ///
    /// Panics under the conditions where [`try_push`](Self::try_push) errors.
    pub fn push(&mut self, value: T) {
        if let Err(err) = self.try_push(value) {
            panic!("{err}");
        }
    }

    /// Release the last claimed slot and return its value.
    ///
    /// The slot is left holding a fresh `T::default()`. When the current
    /// block has nothing claimed, the frontier first steps back to the end
    /// of the previous block.
    pub fn try_remove_last(&mut self) -> Result<T, ArenaError> {
        let (mode, block_size) = self.active()?;
        if !mode.allows_stack_ops() {
            return Err(ArenaError::ModeViolation {
                mode,
                operation: "remove_last",
            });
        }
        let Some(mut index) = self.frontier.index else {
            return Err(ArenaError::Empty);
        };
        let mut remains = self.frontier.remains;
        if remains == block_size {
            if index == 0 {
                return Err(ArenaError::Empty);
            }
            index -= 1;
            remains = 0;
        }
        remains += 1;
        let value = self.store.block_mut(index).take(block_size - remains);
        self.frontier = Frontier {
            index: Some(index),
            remains,
        };
        Ok(value)
    }

    /// Release the last claimed slot and return its value.
    ///
    /// # Panics
    ///
    /// Panics if the arena is empty, unconfigured, or in [`AllocMode::Runs`].
    pub fn remove_last(&mut self) -> T {
        match self.try_remove_last() {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Reconstruct every slot of every block and return the frontier to the
    /// start of block 0. Blocks stay allocated.
    pub fn rollback_all(&mut self) {
        if self.store.is_empty() {
            return;
        }
        let block_size = self.block_size();
        for block in self.store.iter_mut() {
            block.reset_range(0..block_size);
        }
        trace!(
            "rolled back all {} slots across {} blocks",
            self.len(),
            self.store.len()
        );
        self.frontier = Frontier::start(block_size);
    }

    /// Roll the frontier back to `checkpoint`.
    ///
    /// Returns `Ok(true)` when slots were released, `Ok(false)` when the
    /// checkpoint does not lie before the current frontier by claimed count.
    /// In that case the frontier is left exactly as it was.
    pub fn try_rollback_to(&mut self, checkpoint: Checkpoint) -> Result<bool, ArenaError> {
        if checkpoint.epoch() != self.epoch {
            return Err(ArenaError::StaleCheckpoint {
                checkpoint_epoch: checkpoint.epoch(),
                current_epoch: self.epoch,
            });
        }
        let target = checkpoint.frontier();
        let block_size = self.block_size();
        if let Some(index) = target.index {
            if index >= self.store.len() || target.remains > block_size {
                return Err(ArenaError::InvalidCheckpoint {
                    index,
                    remains: target.remains,
                });
            }
        }
        // Compare by claimed count: `Frontier::EMPTY` and `Frontier::start`
        // both sit at position 0 and must not count as a rollback.
        let frontier = self.frontier;
        let released = frontier
            .position(block_size)
            .saturating_sub(target.position(block_size));
        let current = match frontier.index {
            Some(current) if released > 0 => current,
            _ => return Ok(false),
        };

        let first = target.index.unwrap_or(0);
        let start = target.index.map_or(0, |_| target.offset(block_size));
        let end = frontier.offset(block_size);
        if first == current {
            self.store.block_mut(current).reset_range(start..end);
        } else {
            self.store.block_mut(first).reset_range(start..block_size);
            for index in first + 1..current {
                self.store.block_mut(index).reset_range(0..block_size);
            }
            self.store.block_mut(current).reset_range(0..end);
        }

        trace!(
            "rolled back {} slots (block {} -> {:?})",
            released,
            current,
            target.index
        );
        self.frontier = target;
        Ok(true)
    }

    /// Roll the frontier back to `checkpoint`, see [`try_rollback_to`](Self::try_rollback_to).
    ///
    /// # Panics
    ///
    /// Panics if the checkpoint is stale or lies outside the arena.
    pub fn rollback_to(&mut self, checkpoint: Checkpoint) -> bool {
        match self.try_rollback_to(checkpoint) {
            Ok(applied) => applied,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> Default for BlockArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for BlockArena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockArena")
            .field("config", &self.config)
            .field("blocks", &self.store.len())
            .field("frontier", &self.frontier)
            .field("len", &self.len())
            .finish()
    }
}

impl<T> Index<usize> for BlockArena<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.element_at(index)
    }
}

impl<T> IndexMut<usize> for BlockArena<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.element_at_mut(index)
    }
}

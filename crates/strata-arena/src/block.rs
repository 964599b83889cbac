//! Fixed-capacity blocks and the append-only block store.
//!
//! A [`Block`] is a boxed slice of exactly `block_size` default-constructed
//! elements. A [`BlockStore`] is an ordered list of blocks that only grows;
//! individual blocks are never resized or freed, only the whole store is
//! cleared.

use std::ops::Range;

use log::debug;

use crate::error::ArenaError;

/// A single block of constructed elements.
///
/// Every slot holds a live `T` for the whole lifetime of the block.
/// "Freeing" a slot means replacing it with a fresh `T::default()` in place.
#[derive(Clone, Debug)]
pub struct Block<T> {
    slots: Box<[T]>,
}

impl<T: Default> Block<T> {
    /// Allocate a block of `len` default-constructed elements.
    ///
    /// The backing storage is reserved in one fallible step; failure is
    /// reported as [`ArenaError::AllocationFailed`].
    pub fn new(len: usize) -> Result<Self, ArenaError> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(len)
            .map_err(|_| ArenaError::AllocationFailed { elements: len })?;
        slots.resize_with(len, T::default);
        Ok(Self {
            slots: slots.into_boxed_slice(),
        })
    }

    /// Destroy and default-reconstruct every slot in `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds.
    pub fn reset_range(&mut self, range: Range<usize>) {
        for slot in &mut self.slots[range] {
            *slot = T::default();
        }
    }

    /// Replace the slot at `offset` with a default value and return the old one.
    pub fn take(&mut self, offset: usize) -> T {
        std::mem::take(&mut self.slots[offset])
    }
}

impl<T> Block<T> {
    /// Overwrite the slot at `offset`, dropping its previous value.
    pub fn put(&mut self, offset: usize, value: T) {
        self.slots[offset] = value;
    }

    /// Shared slice of `len` slots starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + len` exceeds the block.
    pub fn slice(&self, offset: usize, len: usize) -> &[T] {
        &self.slots[offset..offset + len]
    }

    /// Mutable slice of `len` slots starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + len` exceeds the block.
    pub fn slice_mut(&mut self, offset: usize, len: usize) -> &mut [T] {
        &mut self.slots[offset..offset + len]
    }

    /// Slot at `offset`, if in bounds.
    pub fn get(&self, offset: usize) -> Option<&T> {
        self.slots.get(offset)
    }

    /// Mutable slot at `offset`, if in bounds.
    pub fn get_mut(&mut self, offset: usize) -> Option<&mut T> {
        self.slots.get_mut(offset)
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the block has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Memory usage of the slot storage in bytes.
    pub fn memory_bytes(&self) -> usize {
        std::mem::size_of_val(&*self.slots)
    }
}

/// An append-only list of equally sized [`Block`]s.
///
/// Growth appends exactly one block at a time, up to `max_blocks` when a cap
/// is configured. The store never shrinks; [`clear`](Self::clear) releases
/// every block at once.
#[derive(Clone, Debug)]
pub struct BlockStore<T> {
    blocks: Vec<Block<T>>,
    block_size: usize,
    max_blocks: Option<usize>,
}

impl<T> BlockStore<T> {
    /// Create an empty store. No block is allocated until [`grow`](Self::grow).
    pub fn new(block_size: usize, max_blocks: Option<usize>) -> Self {
        Self {
            blocks: Vec::new(),
            block_size,
            max_blocks,
        }
    }

    /// Block at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a valid block index.
    pub fn block(&self, index: usize) -> &Block<T> {
        &self.blocks[index]
    }

    /// Mutable block at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a valid block index.
    pub fn block_mut(&mut self, index: usize) -> &mut Block<T> {
        &mut self.blocks[index]
    }

    /// Iterate over all blocks in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Block<T>> {
        self.blocks.iter()
    }

    /// Iterate mutably over all blocks in order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Block<T>> {
        self.blocks.iter_mut()
    }

    /// Number of blocks currently allocated.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether no block has been allocated.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Elements per block.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Total slots across all blocks.
    pub fn capacity(&self) -> usize {
        self.blocks.len() * self.block_size
    }

    /// Total memory used by slot storage in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.blocks.iter().map(|b| b.memory_bytes()).sum()
    }

    /// Drop every block and return to the unconfigured zero state.
    pub fn clear(&mut self) {
        self.blocks = Vec::new();
        self.block_size = 0;
        self.max_blocks = None;
    }
}

impl<T: Default> BlockStore<T> {
    /// Append one freshly constructed block and return its index.
    ///
    /// Returns [`ArenaError::CapacityExceeded`] when the cap is reached and
    /// [`ArenaError::AllocationFailed`] when the system allocator refuses.
    pub fn grow(&mut self) -> Result<usize, ArenaError> {
        if let Some(max_blocks) = self.max_blocks {
            if self.blocks.len() >= max_blocks {
                return Err(ArenaError::CapacityExceeded {
                    blocks: self.blocks.len(),
                    max_blocks,
                });
            }
        }
        self.blocks
            .try_reserve(1)
            .map_err(|_| ArenaError::AllocationFailed {
                elements: self.block_size,
            })?;
        let block = Block::new(self.block_size)?;
        self.blocks.push(block);
        debug!(
            "block store grew to {} blocks ({} slots)",
            self.blocks.len(),
            self.capacity()
        );
        Ok(self.blocks.len() - 1)
    }
}

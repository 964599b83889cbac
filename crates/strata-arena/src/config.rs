//! Arena configuration parameters.

use std::fmt;

use crate::error::ArenaError;

/// Which allocation discipline an arena accepts.
///
/// Multi-element runs can abandon the tail of a block when they do not fit,
/// which breaks the push/pop reading of [`len`](crate::BlockArena::len).
/// Tagging the arena with a mode at configuration time makes that choice
/// explicit instead of leaving it to caller discipline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AllocMode {
    /// Runs of any length up to the block size; no push/pop.
    Runs,
    /// One element at a time: `push`, `remove_last`, and `alloc` with `k <= 1`.
    Stack,
    /// Everything is allowed. Size accounting after a block advance that
    /// skipped a non-empty tail no longer matches a simple stack.
    #[default]
    Mixed,
}

impl AllocMode {
    /// Whether a run of `len` elements is permitted in this mode.
    pub fn allows_run(self, len: usize) -> bool {
        match self {
            Self::Runs | Self::Mixed => true,
            Self::Stack => len <= 1,
        }
    }

    /// Whether `push` / `remove_last` are permitted in this mode.
    pub fn allows_stack_ops(self) -> bool {
        !matches!(self, Self::Runs)
    }
}

impl fmt::Display for AllocMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Runs => "runs",
            Self::Stack => "stack",
            Self::Mixed => "mixed",
        };
        f.write_str(name)
    }
}

/// Configuration for a [`BlockArena`](crate::BlockArena).
///
/// Fixed once passed to [`configure`](crate::BlockArena::configure); a new
/// configuration always starts from an empty arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Number of elements in each block.
    ///
    /// Also the longest run a single `alloc` may request. Must be non-zero.
    pub block_size: usize,

    /// Allocation discipline accepted by the arena.
    pub mode: AllocMode,

    /// Upper bound on the number of blocks the store may grow to.
    ///
    /// `None` means growth is limited only by the system allocator.
    pub max_blocks: Option<usize>,
}

impl ArenaConfig {
    /// Create a config with the given block size, [`AllocMode::Mixed`] and no block cap.
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size,
            mode: AllocMode::default(),
            max_blocks: None,
        }
    }

    /// Set the allocation mode.
    pub fn with_mode(mut self, mode: AllocMode) -> Self {
        self.mode = mode;
        self
    }

    /// Cap the number of blocks.
    pub fn with_max_blocks(mut self, max_blocks: usize) -> Self {
        self.max_blocks = Some(max_blocks);
        self
    }

    /// Check the structural invariants of this configuration.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.block_size == 0 {
            return Err(ArenaError::InvalidBlockSize);
        }
        if self.max_blocks == Some(0) {
            return Err(ArenaError::InvalidMaxBlocks);
        }
        Ok(())
    }

    /// Size of one block of `T` in bytes.
    pub fn block_bytes<T>(&self) -> usize {
        self.block_size.saturating_mul(std::mem::size_of::<T>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults_to_mixed_and_uncapped() {
        let config = ArenaConfig::new(64);
        assert_eq!(config.block_size, 64);
        assert_eq!(config.mode, AllocMode::Mixed);
        assert_eq!(config.max_blocks, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_block_size_rejected() {
        let config = ArenaConfig::new(0);
        assert_eq!(config.validate(), Err(ArenaError::InvalidBlockSize));
    }

    #[test]
    fn zero_block_cap_rejected() {
        let config = ArenaConfig::new(8).with_max_blocks(0);
        assert_eq!(config.validate(), Err(ArenaError::InvalidMaxBlocks));
    }

    #[test]
    fn block_bytes_scales_with_element_size() {
        let config = ArenaConfig::new(16);
        assert_eq!(config.block_bytes::<u64>(), 128);
        assert_eq!(config.block_bytes::<u8>(), 16);
    }

    #[test]
    fn stack_mode_limits_runs() {
        assert!(AllocMode::Stack.allows_run(1));
        assert!(!AllocMode::Stack.allows_run(2));
        assert!(AllocMode::Runs.allows_run(1024));
        assert!(!AllocMode::Runs.allows_stack_ops());
        assert!(AllocMode::Mixed.allows_stack_ops());
    }
}

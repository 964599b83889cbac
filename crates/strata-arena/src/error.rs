//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use crate::config::AllocMode;

/// Errors that can occur during arena operations.
///
/// The panicking arena methods abort with this error's `Display` text; the
/// `try_*` variants return it instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// An allocation, push or pop was attempted before `configure`.
    NotConfigured,
    /// The configured block size was zero.
    InvalidBlockSize,
    /// The configured block cap was zero.
    InvalidMaxBlocks,
    /// A run longer than one block was requested.
    RunTooLong {
        /// Number of elements requested.
        requested: usize,
        /// Configured block size.
        block_size: usize,
    },
    /// `remove_last` on an arena with no claimed slots.
    Empty,
    /// The block store is at its configured cap.
    CapacityExceeded {
        /// Blocks currently allocated.
        blocks: usize,
        /// Configured cap.
        max_blocks: usize,
    },
    /// The system allocator could not provide a new block.
    AllocationFailed {
        /// Number of elements in the block that failed to allocate.
        elements: usize,
    },
    /// A checkpoint captured before the arena was last reconfigured or reset.
    StaleCheckpoint {
        /// Epoch the checkpoint was captured in.
        checkpoint_epoch: u64,
        /// Current epoch of the arena.
        current_epoch: u64,
    },
    /// A checkpoint that does not describe a position inside this arena.
    InvalidCheckpoint {
        /// Block index recorded in the checkpoint.
        index: usize,
        /// Remaining capacity recorded in the checkpoint.
        remains: usize,
    },
    /// The operation is not permitted in the arena's allocation mode.
    ModeViolation {
        /// The configured mode.
        mode: AllocMode,
        /// Name of the rejected operation.
        operation: &'static str,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "arena used before a block size was configured"),
            Self::InvalidBlockSize => write!(f, "block size must be greater than zero"),
            Self::InvalidMaxBlocks => write!(f, "block cap must be greater than zero"),
            Self::RunTooLong {
                requested,
                block_size,
            } => {
                write!(
                    f,
                    "run of {requested} elements exceeds block size {block_size}"
                )
            }
            Self::Empty => write!(f, "remove_last called on an empty arena"),
            Self::CapacityExceeded { blocks, max_blocks } => {
                write!(
                    f,
                    "arena capacity exceeded: {blocks} blocks allocated, cap {max_blocks}"
                )
            }
            Self::AllocationFailed { elements } => {
                write!(f, "failed to allocate a block of {elements} elements")
            }
            Self::StaleCheckpoint {
                checkpoint_epoch,
                current_epoch,
            } => {
                write!(
                    f,
                    "stale checkpoint: captured in epoch {checkpoint_epoch}, arena is at epoch {current_epoch}"
                )
            }
            Self::InvalidCheckpoint { index, remains } => {
                write!(
                    f,
                    "checkpoint (block {index}, remains {remains}) lies outside the arena"
                )
            }
            Self::ModeViolation { mode, operation } => {
                write!(f, "{operation} is not permitted in {mode} mode")
            }
        }
    }
}

impl Error for ArenaError {}

//! Workload profiles for benchmarking the Strata arena.
//!
//! - [`generate_workload`]: deterministic mixed allocate/push/pop/rollback
//!   sequence from a seed
//! - [`replay`]: drive an arena through a workload
//! - [`scratch_profile`]: the reference block size and op count

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strata_arena::{BlockArena, Checkpoint};

/// One step of a benchmark workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkOp {
    /// Claim a run of this many elements.
    Alloc(usize),
    /// Push one value.
    Push(u64),
    /// Pop one value if any is claimed.
    Pop,
    /// Capture a checkpoint.
    Capture,
    /// Roll back to the most recent uncommitted checkpoint.
    Rollback,
}

/// Reference profile: block size and number of ops.
///
/// Sized after a surface-reconstruction pass: a few thousand small
/// vertex runs per block with frequent speculative rollbacks.
pub fn scratch_profile() -> (usize, usize) {
    (4096, 100_000)
}

/// Generate a deterministic workload of `len` ops for `block_size`.
///
/// Roughly 50% runs, 30% pushes, 10% pops, 5% captures and 5% rollbacks.
/// Run lengths are uniform in `1..=min(block_size, 64)`.
pub fn generate_workload(seed: u64, block_size: usize, len: usize) -> Vec<WorkOp> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let max_run = block_size.clamp(1, 64) as u32;
    (0..len)
        .map(|_| match rng.next_u32() % 20 {
            0..=9 => WorkOp::Alloc((rng.next_u32() % max_run) as usize + 1),
            10..=15 => WorkOp::Push(rng.next_u64()),
            16..=17 => WorkOp::Pop,
            18 => WorkOp::Capture,
            _ => WorkOp::Rollback,
        })
        .collect()
}

/// Drive `arena` through `ops` and return the final claimed length.
///
/// The arena must be configured in mixed mode with a block size at least
/// as large as the longest run in `ops`.
pub fn replay(arena: &mut BlockArena<u64>, ops: &[WorkOp]) -> usize {
    let mut checkpoints: Vec<Checkpoint> = Vec::new();
    for op in ops {
        match *op {
            WorkOp::Alloc(k) => {
                arena.alloc(k);
            }
            WorkOp::Push(v) => arena.push(v),
            WorkOp::Pop => {
                if !arena.is_empty() {
                    arena.remove_last();
                }
            }
            WorkOp::Capture => checkpoints.push(arena.checkpoint()),
            WorkOp::Rollback => {
                if let Some(cp) = checkpoints.pop() {
                    arena.rollback_to(cp);
                }
            }
        }
    }
    arena.len()
}

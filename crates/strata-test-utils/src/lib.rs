//! Test utilities and fixture types for Strata development.
//!
//! Provides [`Tracked`], an element type that counts its own default
//! constructions and drops, arena fill helpers, and a logger hook for
//! tests that want to see the arena's `log` output.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{life_counts, reset_life_counts, LifeCounts, Tracked};

use log::LevelFilter;
use strata_arena::BlockArena;

/// Install `env_logger` for the test harness at debug level.
///
/// `RUST_LOG` overrides the level. Safe to call from every test; only the
/// first call installs the logger.
pub fn init_logging() {
    let _ = env_logger::Builder::new()
        .filter_level(LevelFilter::Debug)
        .parse_default_env()
        .is_test(true)
        .try_init();
}

/// Push `values` one at a time.
pub fn push_all<T: Default>(arena: &mut BlockArena<T>, values: impl IntoIterator<Item = T>) {
    for value in values {
        arena.push(value);
    }
}

/// Build a mixed-mode arena holding `0..n`.
pub fn sequential_arena(block_size: usize, n: u64) -> BlockArena<u64> {
    let mut arena = BlockArena::with_block_size(block_size);
    push_all(&mut arena, 0..n);
    arena
}

/// Copy every claimed slot out in flat order.
pub fn contents<T: Clone>(arena: &BlockArena<T>) -> Vec<T> {
    arena.iter().cloned().collect()
}

//! Element types that record their own lifecycle.
//!
//! [`Tracked`] counts default constructions and drops in thread-local
//! counters, so each test thread sees only its own arena's activity.
//! Explicit construction through [`Tracked::new`] and cloning are not
//! counted.

use std::cell::Cell;

thread_local! {
    static DEFAULTS: Cell<usize> = const { Cell::new(0) };
    static DROPS: Cell<usize> = const { Cell::new(0) };
}

/// Snapshot of the lifecycle counters for the current thread.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LifeCounts {
    /// `Tracked::default()` calls.
    pub defaults: usize,
    /// `Tracked` values dropped.
    pub drops: usize,
}

/// Read the current thread's counters.
pub fn life_counts() -> LifeCounts {
    LifeCounts {
        defaults: DEFAULTS.with(Cell::get),
        drops: DROPS.with(Cell::get),
    }
}

/// Zero the current thread's counters.
pub fn reset_life_counts() {
    DEFAULTS.with(|c| c.set(0));
    DROPS.with(|c| c.set(0));
}

/// A value whose default construction and destruction are counted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tracked {
    pub value: u64,
}

impl Tracked {
    pub fn new(value: u64) -> Self {
        Self { value }
    }
}

impl Default for Tracked {
    fn default() -> Self {
        DEFAULTS.with(|c| c.set(c.get() + 1));
        Self { value: 0 }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        DROPS.with(|c| c.set(c.get() + 1));
    }
}

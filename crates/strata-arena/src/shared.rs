//! Opt-in scoped locking for arenas reached from several threads.
//!
//! [`BlockArena`] itself does no synchronisation. [`SharedArena`] puts one
//! behind an `Arc<Mutex<_>>` so every operation runs under a scoped lock,
//! leaving the single-threaded case free of locking overhead.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::arena::BlockArena;

/// A cloneable, lock-protected handle to a [`BlockArena`].
pub struct SharedArena<T> {
    inner: Arc<Mutex<BlockArena<T>>>,
}

impl<T> SharedArena<T> {
    /// Wrap `arena` for shared use.
    pub fn new(arena: BlockArena<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(arena)),
        }
    }

    /// Acquire the lock for the lifetime of the returned guard.
    ///
    /// A lock poisoned by a panicking holder is recovered: arena operations
    /// check their preconditions before touching any state.
    pub fn lock(&self) -> MutexGuard<'_, BlockArena<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the arena.
    pub fn with<R>(&self, f: impl FnOnce(&mut BlockArena<T>) -> R) -> R {
        f(&mut *self.lock())
    }

    /// Recover the arena if this is the last handle.
    pub fn try_unwrap(self) -> Result<BlockArena<T>, Self> {
        Arc::try_unwrap(self.inner)
            .map(|mutex| mutex.into_inner().unwrap_or_else(PoisonError::into_inner))
            .map_err(|inner| Self { inner })
    }
}

impl<T> Clone for SharedArena<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> From<BlockArena<T>> for SharedArena<T> {
    fn from(arena: BlockArena<T>) -> Self {
        Self::new(arena)
    }
}

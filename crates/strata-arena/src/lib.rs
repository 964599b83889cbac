//! Block-growable, stack-discipline object arena with checkpoint rollback.
//!
//! Hands out runs of constructed objects from preallocated fixed-size
//! blocks, and can roll back to an earlier allocation point without
//! releasing the underlying memory.
//!
//! # Architecture
//!
//! ```text
//! BlockArena<T> (operations, mode checks, rollback walk)
//! ├── ArenaConfig (block size, allocation mode, block cap)
//! ├── BlockStore<T> → Block<T>[] (Box<[T]> of `block_size` defaults)
//! └── Frontier (block index, remains) ── captured as Checkpoint
//! SharedArena<T> (optional Arc<Mutex<BlockArena<T>>>)
//! ```
//!
//! # Lifetime model
//!
//! Every slot of every block always holds a live `T`. Growing the store
//! default-constructs a whole block at once; claiming slots only moves the
//! frontier. Releasing slots (rollback, `remove_last`) destroys and
//! default-reconstructs them in place. Only [`BlockArena::reset`],
//! reconfiguration, or dropping the arena frees block memory.
//!
//! # Example
//!
//! ```
//! use strata_arena::BlockArena;
//!
//! let mut arena: BlockArena<u32> = BlockArena::with_block_size(4);
//! for v in 0..10 {
//!     arena.push(v);
//! }
//! let cp = arena.checkpoint();
//! for v in 10..15 {
//!     arena.push(v);
//! }
//! assert!(arena.rollback_to(cp));
//! assert_eq!(arena.len(), 10);
//! assert_eq!(arena.block_count(), 4);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod arena;
pub mod block;
pub mod config;
pub mod error;
pub mod frontier;
pub mod shared;

// Public re-exports for the primary API surface.
pub use arena::{BlockArena, Run};
pub use config::{AllocMode, ArenaConfig};
pub use error::ArenaError;
pub use frontier::{Checkpoint, Frontier};
pub use shared::SharedArena;

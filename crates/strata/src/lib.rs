//! Strata: block-growable object arenas with checkpoint rollback.
//!
//! This is the top-level facade crate that re-exports the public API of the
//! Strata sub-crates. Adding `strata` as a single dependency is enough for
//! most users.
//!
//! # Quick start
//!
//! ```rust
//! use strata::prelude::*;
//!
//! // Scratch storage for a pass that may be abandoned half way.
//! let mut scratch: BlockArena<[f32; 3]> = BlockArena::with_block_size(256);
//! let cp = scratch.checkpoint();
//!
//! let run = scratch.alloc(8).unwrap();
//! for (i, p) in scratch.run_mut(&run).iter_mut().enumerate() {
//!     *p = [i as f32, 0.0, 1.0];
//! }
//! assert_eq!(scratch.len(), 8);
//!
//! // Discard the pass; the block stays allocated for the next one.
//! assert!(scratch.rollback_to(cp));
//! assert!(scratch.is_empty());
//! assert_eq!(scratch.block_count(), 1);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `strata-arena` | `BlockArena`, checkpoints, config, errors, `SharedArena` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Block arena, checkpoints and configuration (`strata-arena`).
///
/// [`arena::BlockArena`] is the main type; [`arena::SharedArena`] adds a
/// scoped lock for use across threads.
pub use strata_arena as arena;

/// Common imports for typical Strata usage.
///
/// ```rust
/// use strata::prelude::*;
/// ```
pub mod prelude {
    // Arena
    pub use strata_arena::{BlockArena, Checkpoint, Run, SharedArena};

    // Configuration
    pub use strata_arena::{AllocMode, ArenaConfig};

    // Errors
    pub use strata_arena::ArenaError;
}

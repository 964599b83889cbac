//! Object lifetime accounting: which slots are destroyed and reconstructed
//! by each arena operation.

use strata_arena::{ArenaConfig, BlockArena};
use strata_test_utils::{init_logging, life_counts, reset_life_counts, LifeCounts, Tracked};

fn counts(defaults: usize, drops: usize) -> LifeCounts {
    LifeCounts { defaults, drops }
}

#[test]
fn configure_constructs_nothing() {
    reset_life_counts();
    let arena: BlockArena<Tracked> = BlockArena::with_block_size(8);
    assert_eq!(life_counts(), counts(0, 0));
    drop(arena);
    assert_eq!(life_counts(), counts(0, 0));
}

#[test]
fn growth_constructs_a_whole_block() {
    init_logging();
    reset_life_counts();
    let mut arena: BlockArena<Tracked> = BlockArena::with_block_size(4);
    arena.push(Tracked::new(1));
    // Four defaults for the block, one of them replaced by the pushed value.
    assert_eq!(life_counts(), counts(4, 1));

    arena.alloc(3);
    assert_eq!(life_counts(), counts(4, 1));
}

#[test]
fn rollback_reconstructs_only_released_slots() {
    reset_life_counts();
    let mut arena: BlockArena<Tracked> = BlockArena::with_block_size(4);
    arena.push(Tracked::new(1));
    arena.push(Tracked::new(2));
    let cp = arena.checkpoint();
    for v in 3..=6 {
        arena.push(Tracked::new(v));
    }
    assert_eq!(arena.block_count(), 2);

    reset_life_counts();
    assert!(arena.rollback_to(cp));
    // Slots 2..4 of block 0 and 0..2 of block 1.
    assert_eq!(life_counts(), counts(4, 4));
    assert_eq!(arena.element_at(1).value, 2);
}

#[test]
fn rollback_all_reconstructs_every_slot() {
    reset_life_counts();
    let mut arena: BlockArena<Tracked> = BlockArena::with_block_size(4);
    for v in 0..5 {
        arena.push(Tracked::new(v));
    }

    reset_life_counts();
    arena.rollback_all();
    assert_eq!(life_counts(), counts(8, 8));
    assert_eq!(arena.block_count(), 2);
}

#[test]
fn remove_last_hands_back_the_value() {
    reset_life_counts();
    let mut arena: BlockArena<Tracked> = BlockArena::with_block_size(4);
    arena.push(Tracked::new(9));

    reset_life_counts();
    let value = arena.remove_last();
    assert_eq!(value, Tracked::new(9));
    // The compared temporary above was dropped; the slot got a fresh default.
    assert_eq!(life_counts(), counts(1, 1));
    drop(value);
    assert_eq!(life_counts(), counts(1, 2));
}

#[test]
fn reset_and_drop_release_every_slot() {
    reset_life_counts();
    let mut arena: BlockArena<Tracked> = BlockArena::with_block_size(4);
    for v in 0..5 {
        arena.push(Tracked::new(v));
    }
    reset_life_counts();
    arena.reset();
    assert_eq!(life_counts(), counts(0, 8));

    arena.configure(ArenaConfig::new(3));
    arena.push(Tracked::new(1));
    reset_life_counts();
    drop(arena);
    assert_eq!(life_counts(), counts(0, 3));
}

#[test]
fn reconfigure_releases_previous_blocks() {
    reset_life_counts();
    let mut arena: BlockArena<Tracked> = BlockArena::with_block_size(2);
    arena.push(Tracked::new(1));
    reset_life_counts();
    arena.set_block_size(6);
    assert_eq!(life_counts(), counts(0, 2));
    assert_eq!(arena.block_count(), 0);
}

#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! Route planning for a snake-like board game.
//! Each decision cycle takes a read-only snapshot of the live board and
//! produces one discrete move: the first step of the shortest walkable
//! route from the snake's head to the nearest apple, found with a Lee-style
//! wavefront that lets the snake's tail recede while the search runs.
//! [`decision::decide`] is the entry point; everything under it (the
//! marker grid, the body reconstruction, the wavefront itself) is public
//! mostly so it can be driven directly in tests and benches.

use wire_representation::BoardSnapshot;

pub mod body_order;
pub mod cell_grid;
pub mod decision;
pub mod types;
pub mod wavefront;
pub mod wire_representation;

/// Loads a board snapshot fixture from a given string
pub fn snapshot_fixture(snapshot_fixture: &str) -> BoardSnapshot {
    let s: Result<BoardSnapshot, _> = serde_json::from_str(snapshot_fixture);
    s.expect("the json literal is valid")
}

//! rebuilds the ordered snake body from unordered occupancy.
//!
//! The board only reports *which* cells the snake occupies, plus an
//! orientation code per cell saying which way the body continues from there.
//! Recovering the head-to-tail order is an adjacency puzzle: interior cells
//! continue in two directions, and the one pointing back at the segment we
//! just came from has to be excluded at every step.
use crate::types::SolverError;
use crate::wire_representation::{Position, SegmentShape, SnakeSnapshot};
use fxhash::FxHashMap;
use std::collections::VecDeque;

/// Walks the snake from its head to a tail end and returns the ordered body.
///
/// Fails with [`SolverError::BodyMismatch`] whenever the walk disagrees with
/// the snapshot: it leaves the reported cell set, revisits it in a cycle, or
/// terminates at a length other than the reported one. An inconsistent
/// snapshot must never be silently papered over.
pub fn rebuild(snake: &SnakeSnapshot) -> Result<VecDeque<Position>, SolverError> {
    let shapes: FxHashMap<Position, SegmentShape> = snake
        .cells
        .iter()
        .map(|cell| (cell.position, cell.shape))
        .collect();
    let reported = snake.cells.len();

    let mut chain = VecDeque::with_capacity(reported);
    chain.push_back(snake.head);

    // a head-only snake has nothing to walk
    if reported > 1 {
        loop {
            let current = *chain.back().expect("chain starts with the head");
            let shape = shapes
                .get(&current)
                .copied()
                .ok_or(SolverError::BodyMismatch {
                    expected: reported,
                    actual: chain.len(),
                })?;
            let previous = chain.iter().rev().nth(1).copied();
            let next = shape
                .continuations()
                .iter()
                .map(|&mv| current.step(mv))
                .find(|point| Some(*point) != previous);
            match next {
                Some(point) => {
                    // growing past the reported count means the codes loop
                    if chain.len() == reported {
                        return Err(SolverError::BodyMismatch {
                            expected: reported,
                            actual: chain.len() + 1,
                        });
                    }
                    chain.push_back(point);
                }
                None => break,
            }
        }
    }

    if chain.len() != reported {
        return Err(SolverError::BodyMismatch {
            expected: reported,
            actual: chain.len(),
        });
    }
    Ok(chain)
}

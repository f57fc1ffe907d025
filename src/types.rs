//! moves, vectors and the solver's error taxonomy
use crate::wire_representation::Position;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A vector with which to do positional math
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector {
    /// x position
    pub x: i64,
    /// y position
    pub y: i64,
}

/// Represents a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Move {
    #[allow(missing_docs)]
    Left,
    #[allow(missing_docs)]
    Down,
    #[allow(missing_docs)]
    Up,
    #[allow(missing_docs)]
    Right,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Left => write!(f, "left"),
            Move::Right => write!(f, "right"),
            Move::Up => write!(f, "up"),
            Move::Down => write!(f, "down"),
        }
    }
}

impl Move {
    /// convert this move to a vector
    pub fn to_vector(self) -> Vector {
        match self {
            Move::Left => Vector { x: -1, y: 0 },
            Move::Right => Vector { x: 1, y: 0 },
            Move::Up => Vector { x: 0, y: 1 },
            Move::Down => Vector { x: 0, y: -1 },
        }
    }

    /// create a Move from the given vector
    pub fn from_vector(vector: Vector) -> Self {
        match vector {
            Vector { x: -1, y: 0 } => Self::Left,
            Vector { x: 1, y: 0 } => Self::Right,
            Vector { x: 0, y: 1 } => Self::Up,
            Vector { x: 0, y: -1 } => Self::Down,
            _ => panic!(),
        }
    }

    /// returns a vec of all possible moves. The order here is also the
    /// neighbor-visit and tie-break order everywhere in this crate, so routes
    /// are reproducible run to run
    pub fn all() -> Vec<Move> {
        vec![Move::Up, Move::Down, Move::Left, Move::Right]
    }

    /// converts this move to a usize index. indices are the same order as the `Move::all()` method
    pub fn as_index(&self) -> usize {
        match self {
            Move::Up => 0,
            Move::Down => 1,
            Move::Left => 2,
            Move::Right => 3,
        }
    }

    /// converts a usize index to a move
    pub fn from_index(index: usize) -> Move {
        match index {
            0 => Move::Up,
            1 => Move::Down,
            2 => Move::Left,
            3 => Move::Right,
            _ => panic!("invalid index"),
        }
    }

    /// checks if a given move is not opposite this move. e.g. Up is not opposite to Left, but is opposite to Down
    pub fn is_not_opposite(&self, other: &Move) -> bool {
        !matches!(
            (self, other),
            (Move::Up, Move::Down)
                | (Move::Down, Move::Up)
                | (Move::Left, Move::Right)
                | (Move::Right, Move::Left)
        )
    }

    /// the move that walks `from` onto `to`, failing when `to` is not exactly
    /// one cardinal step away (diagonals and far points both land here)
    pub fn between(from: Position, to: Position) -> Result<Move, SolverError> {
        let offset = to.sub_vec(from.to_vector()).to_vector();
        Move::all()
            .into_iter()
            .find(|mv| mv.to_vector() == offset)
            .ok_or(SolverError::NotAdjacent { from, to })
    }
}

/// Everything that can go wrong while planning a route. All of these are
/// recoverable in the sense that the decision entry point catches them and
/// degrades to the fallback move; none of them should escape this crate.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SolverError {
    /// direction requested between two points that don't share a grid edge
    #[error("no cardinal step leads from {from:?} to {to:?}")]
    NotAdjacent {
        #[allow(missing_docs)]
        from: Position,
        #[allow(missing_docs)]
        to: Position,
    },

    /// the rebuilt body disagrees with the cell count the snapshot reports,
    /// which means the snapshot itself is inconsistent
    #[error("rebuilt body has {actual} cells, snapshot reports {expected}")]
    BodyMismatch {
        #[allow(missing_docs)]
        expected: usize,
        #[allow(missing_docs)]
        actual: usize,
    },

    /// the route backtrace expected a distance mark next to a cell and found
    /// none. can only happen if the search wrote marks inconsistently
    #[error("no neighbor of {near:?} carries distance mark {mark}")]
    TraceGap {
        #[allow(missing_docs)]
        mark: i32,
        #[allow(missing_docs)]
        near: Position,
    },
}

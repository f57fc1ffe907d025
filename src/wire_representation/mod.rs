#![allow(missing_docs)]
//! types to match the json board snapshot handed over once per decision cycle
use crate::types::{Move, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Struct that matches the `position` object from the snapshot. y grows
/// upward, so `Move::Up` is `+y`
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn add_vec(&self, v: Vector) -> Position {
        Position {
            x: (self.x as i64 + v.x) as i32,
            y: (self.y as i64 + v.y) as i32,
        }
    }

    pub fn sub_vec(&self, v: Vector) -> Position {
        Position {
            x: (self.x as i64 - v.x) as i32,
            y: (self.y as i64 - v.y) as i32,
        }
    }

    pub fn to_vector(&self) -> Vector {
        Vector {
            x: self.x as i64,
            y: self.y as i64,
        }
    }

    /// the point one cardinal step away. pure coordinate arithmetic, bounds
    /// are the caller's problem
    pub fn step(&self, mv: Move) -> Position {
        self.add_vec(mv.to_vector())
    }

    /// the four cardinal neighbors, in `Move::all()` order
    pub fn neighbors(&self) -> Vec<Position> {
        Move::all().into_iter().map(|mv| self.step(mv)).collect()
    }

    pub fn manhattan_distance(&self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Orientation code for one occupied snake cell: which cardinal directions
/// the body continues toward from here. Head shapes continue one way
/// (opposite the way the head faces), straight and turn shapes two ways,
/// tail-end shapes none.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentShape {
    HeadUp,
    HeadDown,
    HeadLeft,
    HeadRight,
    BodyHorizontal,
    BodyVertical,
    TurnLeftDown,
    TurnLeftUp,
    TurnRightDown,
    TurnRightUp,
    TailUp,
    TailDown,
    TailLeft,
    TailRight,
}

impl SegmentShape {
    /// the directions the body continues toward from a cell of this shape
    pub fn continuations(self) -> &'static [Move] {
        match self {
            SegmentShape::HeadUp => &[Move::Down],
            SegmentShape::HeadDown => &[Move::Up],
            SegmentShape::HeadLeft => &[Move::Right],
            SegmentShape::HeadRight => &[Move::Left],
            SegmentShape::BodyHorizontal => &[Move::Left, Move::Right],
            SegmentShape::BodyVertical => &[Move::Up, Move::Down],
            SegmentShape::TurnLeftDown => &[Move::Left, Move::Down],
            SegmentShape::TurnLeftUp => &[Move::Left, Move::Up],
            SegmentShape::TurnRightDown => &[Move::Right, Move::Down],
            SegmentShape::TurnRightUp => &[Move::Right, Move::Up],
            SegmentShape::TailUp
            | SegmentShape::TailDown
            | SegmentShape::TailLeft
            | SegmentShape::TailRight => &[],
        }
    }

    pub fn is_tail_end(self) -> bool {
        self.continuations().is_empty()
    }
}

/// one occupied cell of the snake, as reported by the board
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyCell {
    pub position: Position,
    pub shape: SegmentShape,
}

/// The snake as the board reports it: a known head plus an *unordered* set
/// of occupied cells with orientation codes. `cells` includes the head cell;
/// its length is the reported body length the reconstructor checks against.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SnakeSnapshot {
    pub head: Position,
    pub cells: Vec<BodyCell>,
}

/// Read-only capture of the live game board for one decision cycle
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub width: u32,
    pub height: u32,
    pub barriers: Vec<Position>,
    pub stones: Vec<Position>,
    pub apples: Vec<Position>,
    pub snake: SnakeSnapshot,
}

impl BoardSnapshot {
    pub fn off_board(&self, position: Position) -> bool {
        position.x < 0
            || position.x >= self.width as i32
            || position.y < 0
            || position.y >= self.height as i32
    }
}

impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for i in 0..self.height {
            let k = self.height - i - 1;
            for j in 0..self.width {
                let position = Position {
                    x: j as i32,
                    y: k as i32,
                };
                if self.snake.head == position {
                    write!(f, "H")?;
                } else if self.snake.cells.iter().any(|c| c.position == position) {
                    write!(f, "s")?;
                } else if self.apples.contains(&position) {
                    write!(f, "a")?;
                } else if self.barriers.contains(&position) {
                    write!(f, "x")?;
                } else if self.stones.contains(&position) {
                    write!(f, "o")?;
                } else {
                    write!(f, ".")?;
                }
                write!(f, " ")?;
            }
            writeln!(f)?;
        }
        write!(f, "(head: {:?}, {} cells)", self.snake.head, self.snake.cells.len())?;
        Ok(())
    }
}

//! the mutable marker grid one route decision works against.
//!
//! A `CellGrid` is built fresh from a [`BoardSnapshot`] at the start of a
//! decision cycle, mutated in place by the wavefront search (tail recession
//! clears body cells, ring expansion writes distance marks) and thrown away
//! once a move is chosen. Nothing survives across cycles.
use crate::wire_representation::{BoardSnapshot, Position};
use std::collections::VecDeque;
use std::fmt;

/// marker for a walkable, unvisited cell
pub const EMPTY: i32 = 0;
/// marker for a static impassable stone
pub const STONE: i32 = -4;
/// marker for a static impassable barrier
pub const BARRIER: i32 = -5;
/// marker for the snake's head cell
pub const HEAD: i32 = -10;
/// per-segment decrement for body cells: segment k from the head carries
/// `HEAD + k * SNAKE_STEP`, so segments are distinguishable and can never
/// collide with barrier, stone or distance values
pub const SNAKE_STEP: i32 = -10;
/// marker for an apple cell. Distance marks are bounded by width * height,
/// so this has to stay above that for every board size in use
pub const APPLE: i32 = 9_999;

/// A fixed-size arena of cell markers, indexed `y * width + x`, plus the
/// ordered snake body it was seeded with (head first, tail last)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    width: u32,
    height: u32,
    cells: Vec<i32>,
    snake: VecDeque<Position>,
}

impl CellGrid {
    /// allocates a width x height grid and writes the snapshot's static
    /// environment: barriers, stones and apples. The snake is not placed
    /// yet, see [`CellGrid::set_snake`]
    pub fn new(snapshot: &BoardSnapshot) -> Self {
        let mut grid = CellGrid {
            width: snapshot.width,
            height: snapshot.height,
            cells: vec![EMPTY; snapshot.width as usize * snapshot.height as usize],
            snake: VecDeque::new(),
        };
        for &barrier in &snapshot.barriers {
            grid.set(barrier, BARRIER);
        }
        for &apple in &snapshot.apples {
            grid.set(apple, APPLE);
        }
        for &stone in &snapshot.stones {
            grid.set(stone, STONE);
        }
        grid
    }

    fn index(&self, point: Position) -> usize {
        // out of bounds here is a bug in the caller, not a board condition
        assert!(
            !self.off_board(point),
            "{:?} lies outside the {}x{} grid",
            point,
            self.width,
            self.height
        );
        point.y as usize * self.width as usize + point.x as usize
    }

    /// true when the point lies outside the grid
    pub fn off_board(&self, point: Position) -> bool {
        point.x < 0
            || point.x >= self.width as i32
            || point.y < 0
            || point.y >= self.height as i32
    }

    /// the marker at the given point
    pub fn get(&self, point: Position) -> i32 {
        self.cells[self.index(point)]
    }

    /// writes a marker at the given point
    pub fn set(&mut self, point: Position, val: i32) {
        let idx = self.index(point);
        self.cells[idx] = val;
    }

    /// resets the given point to [`EMPTY`]
    pub fn clear(&mut self, point: Position) {
        self.set(point, EMPTY);
    }

    /// true when the cell is walkable and unvisited
    pub fn is_empty(&self, point: Position) -> bool {
        self.get(point) == EMPTY
    }

    /// true when the cell holds an apple
    pub fn is_apple(&self, point: Position) -> bool {
        self.get(point) == APPLE
    }

    /// true when the search may step onto this cell: empty or apple
    pub fn is_walkable(&self, point: Position) -> bool {
        matches!(self.get(point), EMPTY | APPLE)
    }

    /// writes the ordered body onto the grid, head first, each segment one
    /// `SNAKE_STEP` below the previous, and retains the ordering for
    /// [`CellGrid::recede_tail`]
    pub fn set_snake(&mut self, snake: VecDeque<Position>) {
        let mut mark = HEAD;
        for &point in &snake {
            self.set(point, mark);
            mark += SNAKE_STEP;
        }
        self.snake = snake;
    }

    /// vacates the rearmost still-unconsumed body cell and returns it, or
    /// `None` once the body is fully drained. The wavefront search calls
    /// this exactly once per expansion ring
    pub fn recede_tail(&mut self) -> Option<Position> {
        let tail = self.snake.pop_back()?;
        self.clear(tail);
        Some(tail)
    }

    /// grid width in cells
    pub fn width(&self) -> u32 {
        self.width
    }

    /// grid height in cells
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Draws the grid with row and column labels, top row first. Barriers,
    /// stones, apples, the head and empty cells get fixed glyphs and body
    /// cells always show their (negative) marker. Distance marks show only
    /// when the cell is on `route`, or when `route` is empty, so a traced
    /// route stands out from the leftover wavefront
    pub fn render(&self, route: &[Position]) -> String {
        let mut out = String::new();
        out.push_str("   ");
        for x in 0..self.width {
            out.push_str(&format!("{:>3}", x));
        }
        out.push('\n');
        for i in 0..self.height {
            let y = self.height - i - 1;
            out.push_str(&format!("{:>3}", y));
            for x in 0..self.width {
                let point = Position {
                    x: x as i32,
                    y: y as i32,
                };
                out.push_str(&self.render_cell(point, route));
            }
            out.push('\n');
        }
        out
    }

    fn render_cell(&self, point: Position, route: &[Position]) -> String {
        match self.get(point) {
            EMPTY => " . ".to_string(),
            BARRIER => "XXX".to_string(),
            STONE => " S ".to_string(),
            APPLE => " A ".to_string(),
            HEAD => " O ".to_string(),
            val if val < HEAD => format!("{:>3}", val),
            val if route.is_empty() || route.contains(&point) => format!("{:>3}", val),
            _ => " . ".to_string(),
        }
    }
}

impl fmt::Display for CellGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(&[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire_representation::SnakeSnapshot;

    fn snapshot(
        barriers: Vec<Position>,
        stones: Vec<Position>,
        apples: Vec<Position>,
    ) -> BoardSnapshot {
        BoardSnapshot {
            width: 5,
            height: 5,
            barriers,
            stones,
            apples,
            snake: SnakeSnapshot {
                head: Position { x: 0, y: 0 },
                cells: vec![],
            },
        }
    }

    fn p(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    #[test]
    fn test_new_marks_environment() {
        let grid = CellGrid::new(&snapshot(
            vec![p(0, 0), p(4, 4)],
            vec![p(1, 2)],
            vec![p(3, 3)],
        ));
        assert_eq!(BARRIER, grid.get(p(0, 0)));
        assert_eq!(BARRIER, grid.get(p(4, 4)));
        assert_eq!(STONE, grid.get(p(1, 2)));
        assert_eq!(APPLE, grid.get(p(3, 3)));
        assert_eq!(EMPTY, grid.get(p(2, 2)));
    }

    #[test]
    fn test_set_snake_markers_strictly_decrease() {
        let mut grid = CellGrid::new(&snapshot(vec![], vec![], vec![]));
        grid.set_snake(vec![p(2, 2), p(2, 1), p(2, 0)].into_iter().collect());
        assert_eq!(HEAD, grid.get(p(2, 2)));
        assert_eq!(HEAD + SNAKE_STEP, grid.get(p(2, 1)));
        assert_eq!(HEAD + 2 * SNAKE_STEP, grid.get(p(2, 0)));
        assert!(grid.get(p(2, 1)) < grid.get(p(2, 2)));
        assert!(grid.get(p(2, 0)) < grid.get(p(2, 1)));
    }

    #[test]
    fn test_walkable_queries() {
        let mut grid = CellGrid::new(&snapshot(vec![p(0, 1)], vec![p(1, 1)], vec![p(2, 1)]));
        grid.set_snake(vec![p(3, 1)].into_iter().collect());
        assert!(grid.is_walkable(p(2, 2)));
        assert!(grid.is_apple(p(2, 1)));
        assert!(grid.is_walkable(p(2, 1)));
        assert!(!grid.is_walkable(p(0, 1)));
        assert!(!grid.is_walkable(p(1, 1)));
        assert!(!grid.is_walkable(p(3, 1)));
        assert!(grid.is_empty(p(2, 2)));
        assert!(!grid.is_empty(p(2, 1)));
    }

    #[test]
    fn test_clear_resets_to_empty() {
        let mut grid = CellGrid::new(&snapshot(vec![p(1, 1)], vec![], vec![]));
        grid.clear(p(1, 1));
        assert!(grid.is_empty(p(1, 1)));
    }

    #[test]
    fn test_recede_tail_pops_rearmost_and_clears() {
        let mut grid = CellGrid::new(&snapshot(vec![], vec![], vec![]));
        grid.set_snake(vec![p(2, 2), p(2, 1), p(2, 0)].into_iter().collect());
        assert_eq!(Some(p(2, 0)), grid.recede_tail());
        assert!(grid.is_empty(p(2, 0)));
        assert!(!grid.is_empty(p(2, 1)));
        assert_eq!(Some(p(2, 1)), grid.recede_tail());
        assert_eq!(Some(p(2, 2)), grid.recede_tail());
        assert!(grid.is_empty(p(2, 2)));
        assert_eq!(None, grid.recede_tail());
    }

    #[test]
    fn test_render_route_filters_distance_marks() {
        let mut grid = CellGrid::new(&snapshot(vec![p(0, 0)], vec![], vec![p(4, 4)]));
        // marks above the axis labels so the assertions can't match a label
        grid.set(p(1, 0), 6);
        grid.set(p(2, 0), 7);

        // no route given: every mark shows
        let all_marks = grid.render(&[]);
        assert!(all_marks.contains("  6"));
        assert!(all_marks.contains("  7"));

        // route given: only marks on the route show
        let filtered = grid.render(&[p(2, 0)]);
        assert!(!filtered.contains("  6"));
        assert!(filtered.contains("  7"));

        assert!(filtered.contains("XXX"));
        assert!(filtered.contains(" A "));
    }

    #[test]
    fn test_render_draws_head_and_body() {
        let mut grid = CellGrid::new(&snapshot(vec![], vec![], vec![]));
        grid.set_snake(vec![p(2, 2), p(2, 1)].into_iter().collect());
        let drawn = format!("{}", grid);
        assert!(drawn.contains(" O "));
        assert!(drawn.contains("-20"));
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_get_asserts() {
        let grid = CellGrid::new(&snapshot(vec![], vec![], vec![]));
        grid.get(p(7, 7));
    }
}

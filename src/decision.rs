//! turns a board snapshot into the next move.
//!
//! This is the one entry point the game loop calls. Whatever happens on the
//! way (an inconsistent snapshot, a walled-off apple, a search bug) the
//! answer is always a legal-looking direction: availability beats precision
//! here, a snake that stalls is dead for sure.
use crate::body_order;
use crate::cell_grid::CellGrid;
use crate::types::{Move, SolverError};
use crate::wavefront;
use crate::wire_representation::{BoardSnapshot, Position};
use fxhash::FxHashSet;
use tracing::warn;

/// Picks the move for this cycle: rebuild the body, run the wavefront to
/// the nearest apple and take the route's first step. Falls back to
/// [`nearest_safe_move`] when there is no apple, no route, or any stage
/// reports an inconsistency. Never fails.
pub fn decide(snapshot: &BoardSnapshot) -> Move {
    match plan(snapshot) {
        Ok(Some(mv)) => mv,
        Ok(None) => nearest_safe_move(snapshot),
        Err(error) => {
            warn!(%error, "route planning failed, falling back");
            nearest_safe_move(snapshot)
        }
    }
}

fn plan(snapshot: &BoardSnapshot) -> Result<Option<Move>, SolverError> {
    let target = match nearest_apple(snapshot) {
        Some(target) => target,
        None => return Ok(None),
    };
    let body = body_order::rebuild(&snapshot.snake)?;
    let mut grid = CellGrid::new(snapshot);
    grid.set_snake(body);
    match wavefront::shortest_route(&mut grid, snapshot.snake.head, target)? {
        Some(route) => resolve(snapshot.snake.head, &route).map(Some),
        None => Ok(None),
    }
}

/// the move that takes the head onto the route's first cell. The search
/// only ever produces routes starting next to the head, so this succeeds
/// for every route it is meant for
pub fn resolve(head: Position, route: &[Position]) -> Result<Move, SolverError> {
    Move::between(head, route[0])
}

/// the apple closest to the head by Manhattan distance, ties broken by
/// coordinate order so repeated calls agree
fn nearest_apple(snapshot: &BoardSnapshot) -> Option<Position> {
    let head = snapshot.snake.head;
    snapshot
        .apples
        .iter()
        .copied()
        .min_by_key(|apple| (apple.manhattan_distance(head), apple.x, apple.y))
}

/// Last resort when no route exists: the first neighbor of the head (in
/// `Move::all()` order) that is on the board and neither body, barrier nor
/// stone. When every neighbor is taken the move no longer matters, we are
/// boxed in and `Up` is as good as anything.
pub fn nearest_safe_move(snapshot: &BoardSnapshot) -> Move {
    let head = snapshot.snake.head;
    let blocked: FxHashSet<Position> = snapshot
        .snake
        .cells
        .iter()
        .map(|cell| cell.position)
        .chain(snapshot.barriers.iter().copied())
        .chain(snapshot.stones.iter().copied())
        .collect();
    Move::all()
        .into_iter()
        .find(|mv| {
            let point = head.step(*mv);
            !snapshot.off_board(point) && !blocked.contains(&point)
        })
        .unwrap_or(Move::Up)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire_representation::{BodyCell, SegmentShape, SnakeSnapshot};

    fn p(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    fn cell(x: i32, y: i32, shape: SegmentShape) -> BodyCell {
        BodyCell {
            position: p(x, y),
            shape,
        }
    }

    fn open_snapshot(apples: Vec<Position>, snake: SnakeSnapshot) -> BoardSnapshot {
        BoardSnapshot {
            width: 5,
            height: 5,
            barriers: vec![],
            stones: vec![],
            apples,
            snake,
        }
    }

    fn head_only(x: i32, y: i32) -> SnakeSnapshot {
        SnakeSnapshot {
            head: p(x, y),
            cells: vec![cell(x, y, SegmentShape::HeadUp)],
        }
    }

    #[test]
    fn test_open_board_walks_straight_at_the_apple() {
        let snapshot = open_snapshot(vec![p(0, 3)], head_only(0, 0));
        assert_eq!(Move::Up, decide(&snapshot));
    }

    #[test]
    fn test_nearest_apple_wins() {
        let snapshot = open_snapshot(vec![p(4, 2), p(2, 3)], head_only(2, 2));
        assert_eq!(Move::Up, decide(&snapshot));
    }

    #[test]
    fn test_search_threads_the_receding_tail_instead_of_falling_back() {
        // head walled in except for its own tail cell. The fallback would
        // answer Up blindly; a working search answers Right through the
        // cell the tail vacates
        let snapshot = BoardSnapshot {
            width: 5,
            height: 5,
            barriers: vec![p(0, 1), p(1, 0), p(1, 2)],
            stones: vec![],
            apples: vec![p(3, 1)],
            snake: SnakeSnapshot {
                head: p(1, 1),
                cells: vec![
                    cell(1, 1, SegmentShape::HeadLeft),
                    cell(2, 1, SegmentShape::TailRight),
                ],
            },
        };
        assert_eq!(Move::Right, decide(&snapshot));
    }

    #[test]
    fn test_unreachable_apple_falls_back_to_safe_neighbor() {
        let mut snapshot = open_snapshot(vec![p(3, 3)], head_only(0, 0));
        snapshot.barriers = vec![p(2, 3), p(4, 3), p(3, 2), p(3, 4)];
        // search finds nothing; the first open neighbor of (0,0) is Up
        assert_eq!(Move::Up, decide(&snapshot));
    }

    #[test]
    fn test_no_apples_falls_back() {
        let snapshot = open_snapshot(vec![], head_only(2, 2));
        assert_eq!(Move::Up, decide(&snapshot));
    }

    #[test]
    fn test_fallback_skips_blocked_neighbors() {
        let mut snapshot = open_snapshot(vec![], head_only(2, 2));
        snapshot.barriers = vec![p(2, 3)];
        snapshot.stones = vec![p(2, 1)];
        assert_eq!(Move::Left, nearest_safe_move(&snapshot));
    }

    #[test]
    fn test_fallback_avoids_the_board_edge() {
        let snapshot = open_snapshot(vec![], head_only(0, 4));
        // Up and Left fall off the board
        assert_eq!(Move::Down, nearest_safe_move(&snapshot));
    }

    #[test]
    fn test_boxed_in_fallback_answers_up() {
        let mut snapshot = open_snapshot(vec![], head_only(2, 2));
        snapshot.barriers = vec![p(2, 3), p(2, 1), p(1, 2), p(3, 2)];
        assert_eq!(Move::Up, nearest_safe_move(&snapshot));
    }

    #[test]
    fn test_corrupt_snapshot_still_produces_a_move() {
        // reported cells disagree with the walk: BodyMismatch inside,
        // fallback outside
        let snapshot = open_snapshot(
            vec![p(0, 3)],
            SnakeSnapshot {
                head: p(2, 2),
                cells: vec![
                    cell(2, 2, SegmentShape::HeadUp),
                    cell(2, 1, SegmentShape::TailUp),
                    cell(9, 9, SegmentShape::TailUp),
                ],
            },
        );
        assert_eq!(Move::Up, decide(&snapshot));
    }

    #[test]
    fn test_resolve_takes_the_first_route_step() {
        assert_eq!(
            Move::Right,
            resolve(p(1, 1), &[p(2, 1), p(3, 1)]).unwrap()
        );
    }

    #[test]
    fn test_fixture_board_heads_for_the_apple() {
        let snapshot = crate::snapshot_fixture(include_str!("../fixtures/open_field.json"));
        assert_eq!(Move::Up, decide(&snapshot));
    }
}

//! Lee wavefront search over the cell grid.
//!
//! Classic breadth-first rings with one twist: before every expansion the
//! grid's snake recedes by one tail cell. A route is walked one step per
//! turn, so by the time the head is n steps along, the rearmost n body
//! cells have been vacated: a route exactly as long as the body may end on
//! cells the tail gives up along the way. Without the recession the search
//! would treat the snake's own body as permanent walls.
use crate::cell_grid::CellGrid;
use crate::types::SolverError;
use crate::wire_representation::Position;
use itertools::Itertools;
use std::collections::VecDeque;
use tracing::{instrument, trace};

/// Runs the wavefront from `start` until `target` is reached or the frontier
/// dies out.
///
/// `Ok(Some(route))` carries the points from the cell next to `start`
/// through `target` inclusive; `Ok(None)` is the expected outcome when the
/// target is walled off. `Err` is reserved for the backtrace losing its
/// marks, which means the search state itself is inconsistent.
#[instrument(level = "trace", skip_all)]
pub fn shortest_route(
    grid: &mut CellGrid,
    start: Position,
    target: Position,
) -> Result<Option<Vec<Position>>, SolverError> {
    let mut frontier = vec![start];
    let mut step = 0;
    loop {
        // exactly one recession per ring, before expanding. The ring depth
        // is the number of turns the snake has had to crawl forward
        grid.recede_tail();
        frontier = walkable_neighbors(grid, &frontier);
        if frontier.is_empty() {
            return Ok(None);
        }
        if frontier.contains(&target) {
            break;
        }
        step += 1;
        for &point in &frontier {
            grid.set(point, step);
        }
        trace!("ring {}\n{}", step, grid.render(&[]));
    }
    trace_route_to_start(grid, step, target).map(Some)
}

/// the deduplicated union of walkable cardinal neighbors of `points`, in
/// first-seen order so tie-breaks are reproducible
fn walkable_neighbors(grid: &CellGrid, points: &[Position]) -> Vec<Position> {
    points
        .iter()
        .flat_map(|point| point.neighbors())
        .filter(|&point| !grid.off_board(point) && grid.is_walkable(point))
        .unique()
        .collect()
}

/// walks backward from the target, at each step hopping onto the neighbor
/// that carries the current countdown mark. The start cell sits at count 0
/// and stays out of the route
fn trace_route_to_start(
    grid: &CellGrid,
    mut step: i32,
    target: Position,
) -> Result<Vec<Position>, SolverError> {
    let mut route = VecDeque::new();
    route.push_front(target);
    while step > 0 {
        let cursor = *route.front().expect("route starts with the target");
        let next = cursor
            .neighbors()
            .into_iter()
            .filter(|&point| !grid.off_board(point))
            .find(|&point| grid.get(point) == step)
            .ok_or(SolverError::TraceGap { mark: step, near: cursor })?;
        route.push_front(next);
        step -= 1;
    }
    Ok(route.into_iter().collect())
}

use gridsearch_core::{Context, Point};
use rustc_hash::FxHashSet;

use crate::queue::PriorityQueue;
use crate::traits::SearchGrid;
use crate::{Outcome, SearchError};

/// A* search with unit step costs.
///
/// Nodes are ordered by `(depth + h, h)` where `h` is the grid distance to
/// the goal, so among equal totals the node nearer the goal goes first.
/// Keys are fixed at push time; a node reached again along a strictly
/// shorter path is pushed again with its new key, and the stale entry is
/// expanded later using the node's current depth.
///
/// With an admissible `distance` the path found is a shortest one.
/// Expects a freshly reset grid.
pub fn astar<G: SearchGrid + ?Sized>(
    grid: &mut G,
    ctx: &Context,
) -> Result<Outcome, SearchError> {
    let start = grid.start();
    let goal = grid.goal();

    let mut visited: FxHashSet<Point> = FxHashSet::default();
    visited.insert(start);
    let mut open = PriorityQueue::new();
    let h = grid.distance(start, goal);
    open.push(start, (grid.depth(start) + h, h));
    let mut nbuf = Vec::with_capacity(8);

    while !open.is_empty() {
        if ctx.is_done() {
            return Ok(Outcome::Cancelled);
        }
        let u = open.pop_min()?;
        let next_depth = grid.depth(u) + 1;

        nbuf.clear();
        grid.neighbors(u, &mut nbuf);

        for &v in &nbuf {
            // Re-entry only along a strictly shorter path.
            if visited.contains(&v) && grid.depth(v) <= next_depth {
                continue;
            }
            grid.set_parent(v, Some(u));
            grid.set_depth(v, next_depth);
            if v == goal {
                grid.on_path_found(v);
                return Ok(Outcome::Found(v));
            }
            let h = grid.distance(v, goal);
            open.push(v, (next_depth + h, h));
            if visited.insert(v) {
                grid.on_node_visited(v);
            }
        }
        log::trace!("astar: heap size {}", open.len());
    }

    Ok(Outcome::Exhausted)
}

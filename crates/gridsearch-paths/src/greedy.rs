use gridsearch_core::{Context, Point};
use rustc_hash::FxHashSet;

use crate::queue::PriorityQueue;
use crate::traits::SearchGrid;
use crate::{Outcome, SearchError};

/// Greedy best-first search: always expands the frontier node that looks
/// closest to the goal, ignoring the cost already paid.
///
/// Fast on open grids, but not optimal. Expects a freshly reset grid.
pub fn best_first<G: SearchGrid + ?Sized>(
    grid: &mut G,
    ctx: &Context,
) -> Result<Outcome, SearchError> {
    let start = grid.start();
    let goal = grid.goal();

    let mut visited: FxHashSet<Point> = FxHashSet::default();
    visited.insert(start);
    let mut open = PriorityQueue::new();
    open.push(start, grid.distance(start, goal));
    let mut nbuf = Vec::with_capacity(8);

    while !open.is_empty() {
        if ctx.is_done() {
            return Ok(Outcome::Cancelled);
        }
        let u = open.pop_min()?;

        nbuf.clear();
        grid.neighbors(u, &mut nbuf);

        for &v in &nbuf {
            if visited.contains(&v) {
                continue;
            }
            grid.set_parent(v, Some(u));
            if v == goal {
                grid.on_path_found(v);
                return Ok(Outcome::Found(v));
            }
            open.push(v, grid.distance(v, goal));
            visited.insert(v);
            grid.on_node_visited(v);
        }
        log::trace!("best-first: heap size {}", open.len());
    }

    Ok(Outcome::Exhausted)
}

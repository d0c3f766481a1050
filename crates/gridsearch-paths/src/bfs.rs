use std::collections::VecDeque;

use gridsearch_core::{Context, Point};
use rustc_hash::FxHashSet;

use crate::traits::SearchGrid;
use crate::{Outcome, SearchError};

/// Breadth-first search with a FIFO frontier.
///
/// Nodes are discovered in order of edge count from the start, so the
/// first time the goal is generated its parent chain is a shortest path.
/// Expects a freshly reset grid.
pub fn breadth_first<G: SearchGrid + ?Sized>(
    grid: &mut G,
    ctx: &Context,
) -> Result<Outcome, SearchError> {
    let start = grid.start();
    let goal = grid.goal();

    let mut visited: FxHashSet<Point> = FxHashSet::default();
    visited.insert(start);
    let mut queue: VecDeque<Point> = VecDeque::from([start]);
    let mut nbuf = Vec::with_capacity(8);

    while let Some(u) = queue.pop_front() {
        if ctx.is_done() {
            return Ok(Outcome::Cancelled);
        }

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
            queue.push_back(v);
            visited.insert(v);
            grid.on_node_visited(v);
        }
        log::trace!("bfs: queue size {}", queue.len());
    }

    Ok(Outcome::Exhausted)
}

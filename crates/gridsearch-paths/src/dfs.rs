use gridsearch_core::{Context, Point};
use rustc_hash::FxHashSet;

use crate::traits::SearchGrid;
use crate::{Outcome, SearchError};

/// Depth-first search with a LIFO frontier.
///
/// Nodes are never re-entered once discovered, so the path found is not
/// necessarily the shortest. Expects a freshly reset grid.
pub fn depth_first<G: SearchGrid + ?Sized>(
    grid: &mut G,
    ctx: &Context,
) -> Result<Outcome, SearchError> {
    let start = grid.start();
    let goal = grid.goal();

    let mut visited: FxHashSet<Point> = FxHashSet::default();
    visited.insert(start);
    let mut stack = vec![start];
    let mut nbuf = Vec::with_capacity(8);

    while let Some(u) = stack.pop() {
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
            stack.push(v);
            visited.insert(v);
            grid.on_node_visited(v);
        }
        log::trace!("dfs: stack size {}", stack.len());
    }

    Ok(Outcome::Exhausted)
}

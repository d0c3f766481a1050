//! Iterative-deepening depth-first search.
//!
//! Runs a depth-bounded DFS with limits 1, 2, 3, … and resets the grid
//! between attempts. The first limit that reaches the goal equals the
//! shortest distance in edges, so the path found is optimal while the
//! frontier stays linear in the limit. The price is repeated work: every
//! attempt re-explores everything the previous one did, so a goal at
//! distance `d` costs roughly `d` bounded searches.

use gridsearch_core::{Context, Point};
use rustc_hash::FxHashSet;

use crate::traits::SearchGrid;
use crate::{Outcome, SearchError};

/// How a single bounded attempt ended.
enum Attempt {
    Finished(Outcome),
    /// No goal, but the limit cut off at least one node, so a deeper
    /// attempt may still succeed.
    Pruned,
}

/// Iterative-deepening DFS. Expects a freshly reset grid.
///
/// Returns [`Outcome::Exhausted`] once an attempt explores the whole
/// reachable component without the limit pruning anything.
pub fn iterative_deepening<G: SearchGrid + ?Sized>(
    grid: &mut G,
    ctx: &Context,
) -> Result<Outcome, SearchError> {
    let mut limit = 1;
    loop {
        match bounded(grid, ctx, limit) {
            Attempt::Finished(outcome) => return Ok(outcome),
            Attempt::Pruned => {
                log::debug!("idfs: nothing within {limit} steps, deepening");
                grid.reset();
                limit += 1;
            }
        }
    }
}

fn bounded<G: SearchGrid + ?Sized>(grid: &mut G, ctx: &Context, limit: i32) -> Attempt {
    let start = grid.start();
    let goal = grid.goal();

    let mut visited: FxHashSet<Point> = FxHashSet::default();
    visited.insert(start);
    let mut stack = vec![start];
    let mut nbuf = Vec::with_capacity(8);
    let mut pruned = false;

    while let Some(u) = stack.pop() {
        if ctx.is_done() {
            return Attempt::Finished(Outcome::Cancelled);
        }

        let next_depth = grid.depth(u) + 1;
        nbuf.clear();
        grid.neighbors(u, &mut nbuf);

        for &v in &nbuf {
            // Re-entry only along a strictly shorter path.
            if visited.contains(&v) && grid.depth(v) <= next_depth {
                continue;
            }
            if next_depth > limit {
                pruned = true;
                continue;
            }
            grid.set_parent(v, Some(u));
            grid.set_depth(v, next_depth);
            if v == goal {
                grid.on_path_found(v);
                return Attempt::Finished(Outcome::Found(v));
            }
            stack.push(v);
            if visited.insert(v) {
                grid.on_node_visited(v);
            }
        }
        log::trace!("idfs: limit {limit}, stack size {}", stack.len());
    }

    if pruned {
        Attempt::Pruned
    } else {
        Attempt::Finished(Outcome::Exhausted)
    }
}

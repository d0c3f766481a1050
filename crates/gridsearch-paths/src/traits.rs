use gridsearch_core::Point;

use crate::SearchError;

/// Everything a search strategy needs from its environment.
///
/// Nodes are identified by their [`Point`]. Besides topology, the grid
/// stores the per-run state strategies write (`parent`, `depth`) so that a
/// caller can walk the result after the run, and it receives the two
/// observational hooks. Strategies never branch on what the hooks do.
pub trait SearchGrid {
    fn start(&self) -> Point;

    fn goal(&self) -> Point;

    /// Append the in-bounds, non-obstacle neighbors of `p` into `buf`.
    /// The caller clears `buf` before calling. The order must be
    /// deterministic for a given grid state.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);

    /// Distance between two nodes. Must never overestimate the true
    /// remaining path cost (admissible) for A* to stay optimal.
    fn distance(&self, a: Point, b: Point) -> i32;

    fn parent(&self, p: Point) -> Option<Point>;

    fn set_parent(&mut self, p: Point, parent: Option<Point>);

    /// Cost-so-far from the start, used by iterative deepening and A*.
    fn depth(&self, p: Point) -> i32;

    fn set_depth(&mut self, p: Point, depth: i32);

    /// Called once for every node the moment it first enters the visited
    /// set. May block (pacing, I/O).
    fn on_node_visited(&mut self, p: Point);

    /// Called exactly once when a run succeeds, before the run returns.
    fn on_path_found(&mut self, goal: Point);

    /// Clear per-run state (parent, depth, visitation marks) on every node
    /// without touching obstacles, start or goal.
    fn reset(&mut self);

    /// Check that a run may start. The default only rejects a start that
    /// coincides with the goal.
    fn validate(&self) -> Result<(), SearchError> {
        if self.start() == self.goal() {
            return Err(SearchError::InvalidGridState(format!(
                "start and goal cannot both be {}",
                self.start()
            )));
        }
        Ok(())
    }
}

/// Receives presentation events from a [`Board`](crate::Board).
pub trait Observer {
    /// A node entered the visited set.
    fn on_visit(&mut self, p: Point);

    /// A node was marked as part of the traceback, goal first.
    fn on_path_step(&mut self, p: Point);

    /// The board's per-run state was cleared.
    fn on_reset(&mut self) {}
}

/// The silent observer.
impl Observer for () {
    fn on_visit(&mut self, _p: Point) {}
    fn on_path_step(&mut self, _p: Point) {}
}

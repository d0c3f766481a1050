//! A concrete rectangular grid implementing [`SearchGrid`].
//!
//! Nodes live in a flat arena indexed by `y * width + x`; parent links are
//! arena indices, so the parent forest built by a run owns nothing.

use std::fmt;

use gridsearch_core::{Point, Range};
use rand::Rng;

use crate::neighbors::Adjacency;
use crate::traceback;
use crate::traits::{Observer, SearchGrid};
use crate::SearchError;

/// Transient per-run visualization state of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mark {
    #[default]
    Clear,
    Visited,
    Path,
}

/// A single grid cell.
#[derive(Clone, Debug, Default)]
pub struct Node {
    obstacle: bool,
    parent: Option<usize>,
    depth: i32,
    mark: Mark,
}

impl Node {
    #[inline]
    pub fn is_obstacle(&self) -> bool {
        self.obstacle
    }

    #[inline]
    pub fn depth(&self) -> i32 {
        self.depth
    }

    #[inline]
    pub fn mark(&self) -> Mark {
        self.mark
    }
}

/// A fixed-size grid with one start, one goal and any number of obstacles.
///
/// `O` receives visit/traceback events; the default `()` ignores them.
#[derive(Clone, Debug)]
pub struct Board<O = ()> {
    nodes: Vec<Node>,
    bounds: Range,
    start: Point,
    goal: Point,
    adjacency: Adjacency,
    visited: usize,
    observer: O,
}

impl Board<()> {
    /// Create an obstacle-free board with the start in the top-left corner
    /// and the goal in the bottom-right corner.
    pub fn new(width: i32, height: i32) -> Result<Self, SearchError> {
        let Some(cells) = width.checked_mul(height) else {
            return Err(SearchError::InvalidGridState(format!(
                "a {width}x{height} board is too large"
            )));
        };
        if width < 1 || height < 1 || cells < 2 {
            return Err(SearchError::InvalidGridState(format!(
                "a {width}x{height} board cannot hold distinct start and goal"
            )));
        }
        let bounds = Range::new(0, 0, width, height);
        Ok(Self {
            nodes: vec![Node::default(); bounds.len()],
            bounds,
            start: Point::ZERO,
            goal: Point::new(width - 1, height - 1),
            adjacency: Adjacency::Cardinal,
            visited: 0,
            observer: (),
        })
    }

    /// Build a board from an ASCII map.
    ///
    /// `S` is the start, `G` the goal, `#` an obstacle; `.`, `o` and `*`
    /// are open cells (so [`Display`](fmt::Display) output parses back).
    /// Surrounding whitespace is trimmed; every line must have the same
    /// width and exactly one `S` and one `G` must appear.
    pub fn parse(s: &str) -> Result<Self, SearchError> {
        let lines: Vec<&str> = s.trim().lines().map(str::trim).collect();
        let height = lines.len() as i32;
        let width = lines.first().map_or(0, |l| l.chars().count()) as i32;
        if lines.iter().any(|l| l.chars().count() as i32 != width) {
            return Err(SearchError::InvalidGridState(
                "map lines have inconsistent widths".into(),
            ));
        }

        let mut board = Board::new(width, height)?;
        let mut start = None;
        let mut goal = None;
        for (y, line) in lines.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let p = Point::new(x as i32, y as i32);
                match ch {
                    '.' | 'o' | '*' => {}
                    '#' => {
                        let i = board.bounds_index(p);
                        board.nodes[i].obstacle = true;
                    }
                    'S' if start.is_none() => start = Some(p),
                    'G' if goal.is_none() => goal = Some(p),
                    'S' | 'G' => {
                        return Err(SearchError::InvalidGridState(format!(
                            "map has more than one \u{201c}{ch}\u{201d}"
                        )));
                    }
                    _ => {
                        return Err(SearchError::InvalidGridState(format!(
                            "map contains invalid character \u{201c}{ch}\u{201d} at {p}"
                        )));
                    }
                }
            }
        }
        match (start, goal) {
            (Some(start), Some(goal)) => {
                board.start = start;
                board.goal = goal;
                Ok(board)
            }
            _ => Err(SearchError::InvalidGridState(
                "map needs exactly one S and one G".into(),
            )),
        }
    }
}

impl<O> Board<O> {
    /// Replace the observer, keeping the board state.
    pub fn with_observer<P>(self, observer: P) -> Board<P> {
        Board {
            nodes: self.nodes,
            bounds: self.bounds,
            start: self.start,
            goal: self.goal,
            adjacency: self.adjacency,
            visited: self.visited,
            observer,
        }
    }

    /// Enable or disable diagonal movement (builder).
    pub fn with_diagonals(mut self, diagonals: bool) -> Self {
        self.set_diagonals(diagonals);
        self
    }

    pub fn set_diagonals(&mut self, diagonals: bool) {
        self.adjacency = Adjacency::from_diagonals(diagonals);
    }

    #[inline]
    pub fn diagonals(&self) -> bool {
        self.adjacency == Adjacency::Octile
    }

    #[inline]
    pub fn adjacency(&self) -> Adjacency {
        self.adjacency
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        self.contains(p)
            .then(|| (p.y * self.bounds.width() + p.x) as usize)
    }

    /// Index of a point already known to be in bounds.
    #[inline]
    fn bounds_index(&self, p: Point) -> usize {
        (p.y * self.bounds.width() + p.x) as usize
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        let w = self.bounds.width() as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    pub fn node(&self, p: Point) -> Option<&Node> {
        self.idx(p).map(|i| &self.nodes[i])
    }

    pub fn is_obstacle(&self, p: Point) -> bool {
        self.node(p).is_some_and(Node::is_obstacle)
    }

    /// In bounds and not an obstacle.
    pub fn is_passable(&self, p: Point) -> bool {
        self.node(p).is_some_and(|n| !n.obstacle)
    }

    pub fn mark(&self, p: Point) -> Option<Mark> {
        self.node(p).map(Node::mark)
    }

    /// Overwrite the mark at `p` without touching search state. Used to
    /// mirror events reported by a run on another copy of the board.
    pub fn set_mark(&mut self, p: Point, mark: Mark) {
        if let Some(i) = self.idx(p) {
            self.nodes[i].mark = mark;
        }
    }

    /// Number of nodes reported through `on_node_visited` since the last
    /// reset.
    #[inline]
    pub fn visited_count(&self) -> usize {
        self.visited
    }

    #[inline]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    #[inline]
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    fn check_in_bounds(&self, p: Point) -> Result<usize, SearchError> {
        self.idx(p).ok_or_else(|| {
            SearchError::InvalidGridState(format!("{p} is outside {}", self.bounds))
        })
    }

    /// Move the start to `p`. An obstacle at `p` is removed.
    pub fn set_start(&mut self, p: Point) -> Result<(), SearchError> {
        let i = self.check_in_bounds(p)?;
        if p == self.goal {
            return Err(SearchError::InvalidGridState(format!(
                "start and goal cannot both be {p}"
            )));
        }
        self.nodes[i].obstacle = false;
        self.start = p;
        Ok(())
    }

    /// Move the goal to `p`. An obstacle at `p` is removed.
    pub fn set_goal(&mut self, p: Point) -> Result<(), SearchError> {
        let i = self.check_in_bounds(p)?;
        if p == self.start {
            return Err(SearchError::InvalidGridState(format!(
                "start and goal cannot both be {p}"
            )));
        }
        self.nodes[i].obstacle = false;
        self.goal = p;
        Ok(())
    }

    /// Place or remove an obstacle. The start and goal cannot be blocked.
    pub fn set_obstacle(&mut self, p: Point, obstacle: bool) -> Result<(), SearchError> {
        let i = self.check_in_bounds(p)?;
        if obstacle && (p == self.start || p == self.goal) {
            return Err(SearchError::InvalidGridState(format!(
                "cannot place an obstacle on the start or goal at {p}"
            )));
        }
        self.nodes[i].obstacle = obstacle;
        Ok(())
    }

    /// Flip the obstacle flag at `p`, returning the new value.
    pub fn toggle_obstacle(&mut self, p: Point) -> Result<bool, SearchError> {
        let now = !self.is_obstacle(p);
        self.set_obstacle(p, now)?;
        Ok(now)
    }

    pub fn clear_obstacles(&mut self) {
        for n in &mut self.nodes {
            n.obstacle = false;
        }
    }

    /// Turn each cell other than start and goal into an obstacle with
    /// probability `density` (clamped to `0.0..=1.0`). Existing obstacles
    /// are kept. Returns the number of obstacles on the board.
    pub fn scatter_obstacles<R: Rng + ?Sized>(&mut self, density: f64, rng: &mut R) -> usize {
        let density = density.clamp(0.0, 1.0);
        let (start, goal) = (self.start, self.goal);
        let w = self.bounds.width() as usize;
        let mut count = 0;
        for (i, n) in self.nodes.iter_mut().enumerate() {
            let p = Point::new((i % w) as i32, (i / w) as i32);
            if p != start && p != goal && rng.random_bool(density) {
                n.obstacle = true;
            }
            if n.obstacle {
                count += 1;
            }
        }
        count
    }
}

impl<O: Observer> Board<O> {
    /// The path found by the last successful run, start first.
    pub fn path(&self) -> Option<Vec<Point>> {
        self.parent(self.goal)
            .map(|_| traceback::trace(self, self.goal))
    }
}

impl<O: Observer> SearchGrid for Board<O> {
    #[inline]
    fn start(&self) -> Point {
        self.start
    }

    #[inline]
    fn goal(&self) -> Point {
        self.goal
    }

    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        self.adjacency
            .push_neighbors(p, buf, |n| self.is_passable(n));
    }

    #[inline]
    fn distance(&self, a: Point, b: Point) -> i32 {
        self.adjacency.metric().between(a, b)
    }

    fn parent(&self, p: Point) -> Option<Point> {
        self.node(p)
            .and_then(|n| n.parent)
            .map(|i| self.point(i))
    }

    fn set_parent(&mut self, p: Point, parent: Option<Point>) {
        let parent = parent.and_then(|q| self.idx(q));
        if let Some(i) = self.idx(p) {
            self.nodes[i].parent = parent;
        }
    }

    fn depth(&self, p: Point) -> i32 {
        self.node(p).map_or(0, Node::depth)
    }

    fn set_depth(&mut self, p: Point, depth: i32) {
        if let Some(i) = self.idx(p) {
            self.nodes[i].depth = depth;
        }
    }

    fn on_node_visited(&mut self, p: Point) {
        if let Some(i) = self.idx(p) {
            self.nodes[i].mark = Mark::Visited;
            self.visited += 1;
            self.observer.on_visit(p);
        }
    }

    fn on_path_found(&mut self, goal: Point) {
        let path = traceback::trace(&*self, goal);
        // The root has no parent and keeps its own marking.
        for &p in path.iter().skip(1).rev() {
            let i = self.bounds_index(p);
            self.nodes[i].mark = Mark::Path;
            self.observer.on_path_step(p);
        }
    }

    fn reset(&mut self) {
        for n in &mut self.nodes {
            n.parent = None;
            n.depth = 0;
            n.mark = Mark::Clear;
        }
        self.visited = 0;
        self.observer.on_reset();
    }

    fn validate(&self) -> Result<(), SearchError> {
        for (what, p) in [("start", self.start), ("goal", self.goal)] {
            let node = self.node(p).ok_or_else(|| {
                SearchError::InvalidGridState(format!("{what} {p} is outside {}", self.bounds))
            })?;
            if node.obstacle {
                return Err(SearchError::InvalidGridState(format!(
                    "{what} {p} is an obstacle"
                )));
            }
        }
        if self.start == self.goal {
            return Err(SearchError::InvalidGridState(format!(
                "start and goal cannot both be {}",
                self.start
            )));
        }
        Ok(())
    }
}

impl<O> fmt::Display for Board<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for x in 0..self.width() {
                let p = Point::new(x, y);
                let n = &self.nodes[self.bounds_index(p)];
                let ch = if p == self.start {
                    'S'
                } else if p == self.goal {
                    'G'
                } else if n.obstacle {
                    '#'
                } else {
                    match n.mark {
                        Mark::Clear => '.',
                        Mark::Visited => 'o',
                        Mark::Path => '*',
                    }
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const WALLED: &str = "
        S.#..
        ..#..
        ..#.G";

    #[derive(Default)]
    struct Recorder {
        visits: Vec<Point>,
        steps: Vec<Point>,
        resets: usize,
    }

    impl Observer for Recorder {
        fn on_visit(&mut self, p: Point) {
            self.visits.push(p);
        }
        fn on_path_step(&mut self, p: Point) {
            self.steps.push(p);
        }
        fn on_reset(&mut self) {
            self.resets += 1;
        }
    }

    #[test]
    fn new_places_start_and_goal_in_corners() {
        let b = Board::new(40, 25).unwrap();
        assert_eq!(b.start(), Point::new(0, 0));
        assert_eq!(b.goal(), Point::new(39, 24));
        assert!(!b.diagonals());
        assert!(b.validate().is_ok());
        assert!(Board::new(1, 1).is_err());
        assert!(Board::new(0, 5).is_err());
        assert!(matches!(
            Board::new(70_000, 70_000),
            Err(SearchError::InvalidGridState(_))
        ));
    }

    #[test]
    fn parse_reads_layout() {
        let b = Board::parse(WALLED).unwrap();
        assert_eq!((b.width(), b.height()), (5, 3));
        assert_eq!(b.start(), Point::new(0, 0));
        assert_eq!(b.goal(), Point::new(4, 2));
        assert!(b.is_obstacle(Point::new(2, 1)));
        assert!(!b.is_obstacle(Point::new(3, 1)));
        assert_eq!(b.to_string(), "S.#..\n..#..\n..#.G");
    }

    #[test]
    fn parse_rejects_bad_maps() {
        assert!(Board::parse("S.\n.").is_err());
        assert!(Board::parse("S..").is_err());
        assert!(Board::parse("SSG").is_err());
        assert!(Board::parse("S?G").is_err());
    }

    #[test]
    fn neighbors_skip_obstacles_and_edges() {
        let b = Board::parse(WALLED).unwrap();
        let mut buf = Vec::new();
        b.neighbors(Point::new(1, 0), &mut buf);
        assert_eq!(buf, vec![Point::new(1, 1), Point::new(0, 0)]);

        let b = b.with_diagonals(true);
        buf.clear();
        b.neighbors(Point::new(1, 0), &mut buf);
        assert_eq!(buf, vec![Point::new(1, 1), Point::new(0, 1), Point::new(0, 0)]);
    }

    #[test]
    fn distance_follows_diagonal_flag() {
        let mut b = Board::new(5, 5).unwrap();
        let (a, z) = (Point::new(0, 0), Point::new(3, 2));
        assert_eq!(b.distance(a, z), 5);
        b.set_diagonals(true);
        assert_eq!(b.distance(a, z), 3);
    }

    #[test]
    fn start_goal_and_obstacles_are_exclusive() {
        let mut b = Board::new(4, 4).unwrap();
        let p = Point::new(2, 2);
        b.set_obstacle(p, true).unwrap();
        b.set_start(p).unwrap();
        assert!(!b.is_obstacle(p));
        assert!(b.set_obstacle(p, true).is_err());
        assert!(b.set_goal(p).is_err());
        assert!(b.set_goal(Point::new(9, 0)).is_err());
        assert_eq!(b.toggle_obstacle(Point::new(1, 1)), Ok(true));
        assert_eq!(b.toggle_obstacle(Point::new(1, 1)), Ok(false));
        assert!(b.validate().is_ok());
    }

    #[test]
    fn parent_links_are_arena_indices() {
        let mut b = Board::new(3, 3).unwrap();
        let (a, c) = (Point::new(0, 0), Point::new(1, 0));
        b.set_parent(c, Some(a));
        b.set_depth(c, 1);
        assert_eq!(b.parent(c), Some(a));
        assert_eq!(b.depth(c), 1);
        assert_eq!(b.parent(a), None);
        b.set_parent(Point::new(7, 7), Some(a));
        assert_eq!(b.parent(Point::new(7, 7)), None);
    }

    #[test]
    fn hooks_mark_nodes_and_reach_observer() {
        let mut b = Board::new(3, 1).unwrap().with_observer(Recorder::default());
        let (s, m, g) = (Point::new(0, 0), Point::new(1, 0), Point::new(2, 0));
        b.set_parent(m, Some(s));
        b.on_node_visited(m);
        b.set_parent(g, Some(m));
        b.on_path_found(g);

        assert_eq!(b.mark(m), Some(Mark::Path));
        assert_eq!(b.mark(s), Some(Mark::Clear));
        assert_eq!(b.visited_count(), 1);
        assert_eq!(b.observer().visits, vec![m]);
        assert_eq!(b.observer().steps, vec![g, m]);
        assert_eq!(b.path(), Some(vec![s, m, g]));

        b.reset();
        assert_eq!(b.mark(m), Some(Mark::Clear));
        assert_eq!(b.parent(g), None);
        assert_eq!(b.visited_count(), 0);
        assert_eq!(b.path(), None);
        assert_eq!(b.observer().resets, 1);
    }

    #[test]
    fn set_mark_leaves_search_state_alone() {
        let mut b = Board::new(3, 1).unwrap();
        let p = Point::new(1, 0);
        b.set_mark(p, Mark::Path);
        b.set_mark(Point::new(5, 5), Mark::Visited);
        assert_eq!(b.mark(p), Some(Mark::Path));
        assert_eq!(b.visited_count(), 0);
        assert_eq!(b.to_string(), "S*G");
    }

    #[test]
    fn reset_keeps_layout() {
        let mut b = Board::parse(WALLED).unwrap();
        b.set_depth(Point::new(1, 1), 4);
        b.reset();
        assert_eq!(b.depth(Point::new(1, 1)), 0);
        assert!(b.is_obstacle(Point::new(2, 0)));
        assert_eq!(b.goal(), Point::new(4, 2));
    }

    #[test]
    fn scatter_never_blocks_endpoints() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let mut b = Board::new(10, 10).unwrap();
        let n = b.scatter_obstacles(1.0, &mut rng);
        assert_eq!(n, 98);
        assert!(b.validate().is_ok());

        b.clear_obstacles();
        assert_eq!(b.scatter_obstacles(0.0, &mut rng), 0);
    }
}

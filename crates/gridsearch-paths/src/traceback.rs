//! Path reconstruction over parent links.

use gridsearch_core::Point;

use crate::traits::SearchGrid;

/// Walk parent links from `goal` towards the root, calling `f` on `goal`
/// and on every ancestor that itself has a parent. The root (the node with
/// no parent, normally the start) is not passed to `f`.
///
/// Returns the number of nodes passed to `f`, i.e. the path length in
/// edges.
pub fn walk<G: SearchGrid + ?Sized>(grid: &G, goal: Point, mut f: impl FnMut(Point)) -> usize {
    let mut steps = 0;
    let mut cur = goal;
    while let Some(parent) = grid.parent(cur) {
        f(cur);
        steps += 1;
        cur = parent;
    }
    steps
}

/// The full path ending at `goal`, root first.
///
/// A `goal` without a parent yields `[goal]`.
pub fn trace<G: SearchGrid + ?Sized>(grid: &G, goal: Point) -> Vec<Point> {
    let mut path = vec![];
    walk(grid, goal, |p| path.push(p));
    let root = path
        .last()
        .and_then(|&p| grid.parent(p))
        .unwrap_or(goal);
    path.push(root);
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Board;

    fn chain(board: &mut Board, pts: &[Point]) {
        for w in pts.windows(2) {
            board.set_parent(w[1], Some(w[0]));
        }
    }

    #[test]
    fn walk_skips_the_root() {
        let mut b = Board::new(4, 1).unwrap();
        let pts: Vec<Point> = (0..4).map(|x| Point::new(x, 0)).collect();
        chain(&mut b, &pts);

        let mut seen = Vec::new();
        let steps = walk(&b, pts[3], |p| seen.push(p));
        assert_eq!(steps, 3);
        assert_eq!(seen, vec![pts[3], pts[2], pts[1]]);
    }

    #[test]
    fn trace_is_root_first_and_visits_each_node_once() {
        let mut b = Board::new(3, 3).unwrap();
        let pts = [
            Point::new(0, 0),
            Point::new(0, 1),
            Point::new(1, 1),
            Point::new(2, 1),
            Point::new(2, 2),
        ];
        chain(&mut b, &pts);
        let path = trace(&b, Point::new(2, 2));
        assert_eq!(path, pts.to_vec());
        assert_eq!(b.parent(path[0]), None);
    }

    #[test]
    fn trace_without_parent_is_the_node_itself() {
        let b = Board::new(2, 2).unwrap();
        assert_eq!(trace(&b, Point::new(1, 1)), vec![Point::new(1, 1)]);
        assert_eq!(walk(&b, Point::new(1, 1), |_| {}), 0);
    }
}

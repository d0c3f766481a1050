use gridsearch_core::Point;

use crate::distance::Metric;

/// Which adjacent cells count as neighbors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Adjacency {
    /// 4-directional: up, right, down, left.
    Cardinal,
    /// 8-directional: cardinal plus diagonals, clockwise from up.
    Octile,
}

const CARDINAL: [Point; 4] = [
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
];

const OCTILE: [Point; 8] = [
    Point::new(0, -1),
    Point::new(1, -1),
    Point::new(1, 0),
    Point::new(1, 1),
    Point::new(0, 1),
    Point::new(-1, 1),
    Point::new(-1, 0),
    Point::new(-1, -1),
];

impl Adjacency {
    /// Cardinal when `diagonals` is false, octile otherwise.
    #[inline]
    pub fn from_diagonals(diagonals: bool) -> Self {
        if diagonals { Self::Octile } else { Self::Cardinal }
    }

    /// Unit offsets, in the fixed order neighbors are produced.
    #[inline]
    pub fn offsets(self) -> &'static [Point] {
        match self {
            Self::Cardinal => &CARDINAL,
            Self::Octile => &OCTILE,
        }
    }

    /// The admissible step-count metric for this adjacency.
    #[inline]
    pub fn metric(self) -> Metric {
        match self {
            Self::Cardinal => Metric::Manhattan,
            Self::Octile => Metric::Chebyshev,
        }
    }

    /// Append the neighbors of `p` for which `keep` returns `true`.
    pub fn push_neighbors(self, p: Point, buf: &mut Vec<Point>, keep: impl Fn(Point) -> bool) {
        for &d in self.offsets() {
            let n = p + d;
            if keep(n) {
                buf.push(n);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_order_is_fixed() {
        let mut buf = Vec::new();
        Adjacency::Cardinal.push_neighbors(Point::new(5, 5), &mut buf, |_| true);
        assert_eq!(
            buf,
            vec![
                Point::new(5, 4),
                Point::new(6, 5),
                Point::new(5, 6),
                Point::new(4, 5)
            ]
        );
    }

    #[test]
    fn octile_filters_and_appends() {
        let mut buf = vec![Point::new(-9, -9)];
        Adjacency::Octile.push_neighbors(Point::ZERO, &mut buf, |n| n.x >= 0 && n.y >= 0);
        assert_eq!(
            buf,
            vec![
                Point::new(-9, -9),
                Point::new(1, 0),
                Point::new(1, 1),
                Point::new(0, 1)
            ]
        );
    }

    #[test]
    fn metric_follows_adjacency() {
        assert_eq!(Adjacency::from_diagonals(false).metric(), Metric::Manhattan);
        assert_eq!(Adjacency::from_diagonals(true).metric(), Metric::Chebyshev);
    }
}

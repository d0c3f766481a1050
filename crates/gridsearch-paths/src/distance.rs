use gridsearch_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Distance metric matching an [`Adjacency`](crate::Adjacency).
///
/// Each metric equals the obstacle-free step count under its adjacency,
/// which makes it an admissible heuristic on any obstacle layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Metric {
    Manhattan,
    Chebyshev,
}

impl Metric {
    #[inline]
    pub fn between(self, a: Point, b: Point) -> i32 {
        match self {
            Self::Manhattan => manhattan(a, b),
            Self::Chebyshev => chebyshev(a, b),
        }
    }
}

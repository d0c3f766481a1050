//! The strategy registry: a closed set of algorithms selectable by name.

use std::fmt;
use std::str::FromStr;

use gridsearch_core::{Context, Point};

use crate::traits::SearchGrid;
use crate::{SearchError, astar, bfs, dfs, greedy, idfs};

/// How a search run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The goal was reached; its parent chain leads back to the start.
    Found(Point),
    /// The frontier emptied: no path exists.
    Exhausted,
    /// The run's [`Context`] was cancelled.
    Cancelled,
}

impl Outcome {
    #[inline]
    pub fn found(self) -> Option<Point> {
        match self {
            Self::Found(p) => Some(p),
            _ => None,
        }
    }
}

/// One of the five supported traversal strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[default]
    DepthFirst,
    BreadthFirst,
    IterativeDeepening,
    BestFirst,
    AStar,
}

impl Algorithm {
    /// Every strategy, in registry order.
    pub const ALL: [Algorithm; 5] = [
        Self::DepthFirst,
        Self::BreadthFirst,
        Self::IterativeDeepening,
        Self::BestFirst,
        Self::AStar,
    ];

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::DepthFirst => "Depth First Search (blind)",
            Self::BreadthFirst => "Breadth First Search (blind, optimal)",
            Self::IterativeDeepening => "Iterative DFS (blind, optimal)",
            Self::BestFirst => "Best First Search (aware)",
            Self::AStar => "A Star (aware, optimal)",
        }
    }

    /// Short command-line name.
    pub fn slug(self) -> &'static str {
        match self {
            Self::DepthFirst => "dfs",
            Self::BreadthFirst => "bfs",
            Self::IterativeDeepening => "idfs",
            Self::BestFirst => "greedy",
            Self::AStar => "astar",
        }
    }

    /// Whether the path found is always a shortest one.
    pub fn is_optimal(self) -> bool {
        matches!(
            self,
            Self::BreadthFirst | Self::IterativeDeepening | Self::AStar
        )
    }

    /// Whether the strategy consults the distance heuristic.
    pub fn is_informed(self) -> bool {
        matches!(self, Self::BestFirst | Self::AStar)
    }

    /// The next strategy in registry order, wrapping around.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&a| a == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Look a strategy up by its [`name`](Self::name) or
    /// [`slug`](Self::slug). Slugs are matched case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.name() == name || a.slug().eq_ignore_ascii_case(name))
    }

    /// Run the strategy and return the goal if it was reached.
    ///
    /// Errors are logged and reported as `None`; use
    /// [`run_with`](Self::run_with) to tell them apart from exhaustion.
    pub fn run<G: SearchGrid + ?Sized>(self, grid: &mut G) -> Option<Point> {
        match self.run_with(grid, &Context::new()) {
            Ok(outcome) => outcome.found(),
            Err(err) => {
                log::error!("{}: {err}", self.name());
                None
            }
        }
    }

    /// Validate and reset `grid`, then run the strategy until it finds the
    /// goal, exhausts the frontier, or `ctx` is cancelled.
    pub fn run_with<G: SearchGrid + ?Sized>(
        self,
        grid: &mut G,
        ctx: &Context,
    ) -> Result<Outcome, SearchError> {
        grid.validate()?;
        grid.reset();
        log::debug!(
            "{}: searching {} -> {}",
            self.name(),
            grid.start(),
            grid.goal()
        );

        let outcome = match self {
            Self::DepthFirst => dfs::depth_first(grid, ctx),
            Self::BreadthFirst => bfs::breadth_first(grid, ctx),
            Self::IterativeDeepening => idfs::iterative_deepening(grid, ctx),
            Self::BestFirst => greedy::best_first(grid, ctx),
            Self::AStar => astar::astar(grid, ctx),
        }?;

        log::debug!("{}: {outcome:?}", self.name());
        Ok(outcome)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| SearchError::UnknownAlgorithm(s.to_string()))
    }
}

/// `(name, strategy)` pairs in registry order.
pub fn registry() -> impl Iterator<Item = (&'static str, Algorithm)> {
    Algorithm::ALL.into_iter().map(|a| (a.name(), a))
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn algorithm_and_outcome_round_trip() {
        let json = serde_json::to_string(&Algorithm::IterativeDeepening).unwrap();
        let back: Algorithm = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Algorithm::IterativeDeepening);

        let outcome = Outcome::Found(Point::new(2, 3));
        let json = serde_json::to_string(&outcome).unwrap();
        let back: Outcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
    }
}

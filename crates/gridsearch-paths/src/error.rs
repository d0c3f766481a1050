use std::fmt;

/// Errors raised by the search engine.
///
/// Failing to find a path is not an error: strategies report it as
/// [`Outcome::Exhausted`](crate::Outcome::Exhausted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// `pop_min` on an empty [`PriorityQueue`](crate::PriorityQueue).
    /// Strategies check frontier emptiness first, so seeing this means an
    /// engine bug.
    EmptyQueue,
    /// The grid is not searchable: start/goal out of bounds, on an
    /// obstacle, or coinciding.
    InvalidGridState(String),
    /// No strategy is registered under this name.
    UnknownAlgorithm(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyQueue => f.write_str("pop from an empty priority queue"),
            Self::InvalidGridState(why) => write!(f, "invalid grid state: {why}"),
            Self::UnknownAlgorithm(name) => write!(f, "unknown algorithm \u{201c}{name}\u{201d}"),
        }
    }
}

impl std::error::Error for SearchError {}

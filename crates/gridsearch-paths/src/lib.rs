//! Search strategies for 2D grids with a start, a goal and obstacles.
//!
//! Five strategies share one engine seam, the [`SearchGrid`] trait:
//!
//! | Strategy | Frontier | Informed | Optimal |
//! |---|---|---|---|
//! | [`depth_first`] | stack | no | no |
//! | [`breadth_first`] | FIFO queue | no | yes |
//! | [`iterative_deepening`] | bounded stack | no | yes |
//! | [`best_first`] | min-heap on `h` | yes | no |
//! | [`astar`] | min-heap on `(depth + h, h)` | yes | yes |
//!
//! Strategies write parent links and depths into the grid and report
//! progress through its hooks; [`Board`] is the concrete grid, forwarding
//! those events to an [`Observer`]. Pick a strategy at runtime through
//! [`Algorithm`] and [`registry`].

mod astar;
mod bfs;
mod board;
mod dfs;
mod distance;
mod error;
mod greedy;
mod idfs;
mod neighbors;
mod queue;
mod strategy;
pub mod traceback;
mod traits;

pub use astar::astar;
pub use bfs::breadth_first;
pub use board::{Board, Mark, Node};
pub use dfs::depth_first;
pub use distance::{Metric, chebyshev, manhattan};
pub use error::SearchError;
pub use greedy::best_first;
pub use idfs::iterative_deepening;
pub use neighbors::Adjacency;
pub use queue::PriorityQueue;
pub use strategy::{Algorithm, Outcome, registry};
pub use traits::{Observer, SearchGrid};

//! Foundational types for the grid search visualizer.
//!
//! Geometry primitives, a cooperative cancellation token shared with search
//! workers, input events, a drawable canvas with frame diffing, and the
//! [`Driver`] contract implemented by presentation back-ends.

pub mod canvas;
pub mod context;
pub mod driver;
pub mod geom;
pub mod input;

pub use canvas::{Canvas, Color, Frame, FrameCell, Glyph, compute_frame};
pub use context::Context;
pub use driver::Driver;
pub use geom::{Point, Range};
pub use input::{Input, Key, MouseAction};

//! # grid_dispatch
//!
//! Dispatch routing on a small editable grid. A user places obstacles and a
//! hazard, then a vehicle starting at the top-left [ORIGIN] is routed to the
//! hazard along a shortest 4-connected path found with
//! [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search).
//! The route can be replayed one step at a time, marking every visited cell.
//!
//! The crate does no I/O. A presentation layer feeds edits into a [Session],
//! triggers [Session::run_search], and pulls [StepEvent]s out of a
//! [ReplayDriver] at whatever pace it likes.
//!
//! Coordinates are [Point]s with `x` the column and `y` the row; use [cell] to
//! build one from a `(row, col)` pair.
mod bfs;
pub mod edit;
pub mod error;
pub mod grid_model;
pub mod replay;
pub mod session;
pub mod solver;

pub use bfs::bfs;
pub use edit::{EditController, EditMode, EditOutcome};
pub use error::GridError;
pub use grid_model::{CellState, GridModel};
pub use grid_util::Point;
pub use replay::{replay, ReplayDriver, StepEvent};
pub use session::Session;
pub use solver::{describe_path, find_path, is_valid_path, BfsSolver, GridSolver, Path};

/// Side length of the grid when none is given.
pub const DEFAULT_GRID_SIZE: usize = 10;
/// `(row, col)` of the cell the vehicle always starts from.
pub const ORIGIN: (usize, usize) = (0, 0);
/// Neighbourhood lists never hold more than the four cardinal neighbours.
pub(crate) const N_SMALLVEC_SIZE: usize = 4;

/// Builds the [Point] for a `(row, col)` grid coordinate.
pub fn cell(row: usize, col: usize) -> Point {
    Point::new(col as i32, row as i32)
}

/// The [ORIGIN] as a [Point].
pub fn origin() -> Point {
    cell(ORIGIN.0, ORIGIN.1)
}

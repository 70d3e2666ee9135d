//! Errors surfaced by the grid engine.

use thiserror::Error;

/// Errors returned by grid accessors, edits, searches and replays.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// A coordinate outside `[0, size)` on either axis. Only reachable through a
    /// bug in the caller's input translation.
    #[error("cell ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfBounds {
        /// Requested row.
        row: i64,
        /// Requested column.
        col: i64,
        /// Side length of the grid.
        size: usize,
    },

    /// A search was requested before any hazard was placed.
    #[error("no hazard set: place a hazard first")]
    NoHazardSet,
}

impl GridError {
    /// Creates an out-of-bounds error.
    #[must_use]
    pub fn out_of_bounds(row: i64, col: i64, size: usize) -> Self {
        Self::OutOfBounds { row, col, size }
    }
}

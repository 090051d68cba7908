//! Error types for grid queries and path searches.
//!
//! The absence of a path is deliberately not represented here: a search that
//! finds nothing returns `Ok(None)`, while these errors mark malformed
//! requests that no amount of searching could satisfy.
use grid_util::point::Point;
use thiserror::Error;

/// Errors produced by terrain queries on a grid.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// The queried coordinate lies outside the grid.
    #[error("coordinate {coord} lies outside the {width}x{height} grid")]
    OutOfBounds {
        coord: Point,
        width: usize,
        height: usize,
    },
}

/// Errors produced by a path search before any searching takes place.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The start coordinate does not exist on the grid.
    #[error("invalid start coordinate: {0}")]
    InvalidStart(GridError),

    /// The goal coordinate does not exist on the grid.
    #[error("invalid goal coordinate: {0}")]
    InvalidGoal(GridError),
}

//! Common types: shot outcomes and the errors returned by grid and sampler
//! operations.

use serde::Serialize;
use thiserror::Error;

/// Result of a shot on a previously untargeted cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShotOutcome {
    /// The shot struck an unresolved ship cell.
    Hit,
    /// The shot landed in open water.
    Miss,
}

/// Errors returned by grid, placement and shot operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Coordinates fall outside the grid.
    #[error("coordinates ({row}, {col}) are outside the grid")]
    OutOfBounds { row: isize, col: isize },
    /// Linear index falls outside the grid.
    #[error("cell index {index} is outside the grid")]
    IndexOutOfBounds { index: usize },
    /// Placement overlaps a ship, an exclusion zone, a miss or a sunk cell.
    #[error("cell ({row}, {col}) is occupied or excluded")]
    CellOccupiedOrExcluded { row: usize, col: usize },
    /// The cell was already hit, missed or sunk.
    #[error("cell {index} was already targeted")]
    AlreadyTargeted { index: usize },
    /// Ships must be at least one cell long.
    #[error("invalid ship length {length}")]
    InvalidLength { length: usize },
    /// Random placement gave up on a ship.
    #[error("unable to place ship of length {length}")]
    UnableToPlaceShip { length: usize },
}

/// Errors surfaced by a Monte-Carlo sampling round.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SampleError {
    /// No placement of a live ship is consistent with the evidence.
    #[error("no valid placement for ship of length {length}")]
    NoValidPlacement { length: usize },
    /// Conflict retries ran out before enough configurations were accepted.
    #[error("sampling exhausted after {attempts} attempts ({accepted}/{requested} configurations)")]
    Exhausted {
        requested: usize,
        accepted: usize,
        attempts: usize,
    },
}

//! Two-grid naval combat with a Monte-Carlo targeting AI.
//!
//! Ships are placed on a [`Grid`] without overlapping or touching. The
//! [`Sampler`] draws fleet layouts consistent with the hits, misses and sunk
//! ships recorded on a grid, and the [`Heatmap`] turns them into a per-cell
//! occupancy tally whose peak is the next shot.

mod common;
mod config;
mod game;
mod grid;
mod heatmap;
mod logging;
mod placement;
mod player;
mod sampler;
mod ship;
mod sunk;

pub use common::*;
pub use config::*;
pub use game::*;
pub use grid::*;
pub use heatmap::*;
pub use logging::{init_logging, LOG_ENV};
pub use placement::*;
pub use player::*;
pub use sampler::*;
pub use ship::*;

//! Sunk-ship detection from hit evidence.
//!
//! A ship counts as sunk when some span of its shape is entirely hit and,
//! unless the ship is one of the longest still afloat, every cell bounding the
//! span is a miss or off the grid. The first matching anchor wins; this is a
//! heuristic and does not prove the match is unique.

use log::info;

use crate::grid::Grid;
use crate::ship::ShipShape;

impl Grid {
    /// First span, in row-major anchor order and horizontal before vertical,
    /// that shows a sunk ship of `length` when the longest live ship has
    /// `max_length` cells.
    pub fn find_sunk(&self, length: usize, max_length: usize) -> Option<Vec<usize>> {
        if length == 0 {
            return None;
        }
        // Nothing longer than the longest live ship can extend a full span.
        let bounded = length != max_length;
        let shapes = ShipShape::candidates(length);
        (0..self.len()).find_map(|anchor| {
            shapes
                .iter()
                .find_map(|&shape| self.sunk_span(shape, anchor, bounded))
        })
    }

    fn sunk_span(&self, shape: ShipShape, anchor: usize, bounded: bool) -> Option<Vec<usize>> {
        let (row, col) = self.coords(anchor);
        let span = self.span(shape, row, col).ok()?;
        if !span.iter().all(|i| self.hit_positions().contains(i)) {
            return None;
        }
        if bounded {
            let closed = shape.boundary().into_iter().all(|(dr, dc)| {
                self.offset(anchor, dr, dc)
                    .map_or(true, |i| self.miss_positions().contains(&i))
            });
            if !closed {
                return None;
            }
        }
        Some(span)
    }

    /// If a ship of `length` shows as sunk, move its hit cells into the sunk
    /// set and return `true`. The move is irreversible.
    pub fn resolve_sunk(&mut self, length: usize, max_length: usize) -> bool {
        match self.find_sunk(length, max_length) {
            Some(span) => {
                self.mark_sunk(&span);
                info!("ship of length {} sunk at {:?}", length, self.coords(span[0]));
                true
            }
            None => false,
        }
    }
}

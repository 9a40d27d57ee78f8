//! Placement engine: candidate placements of a ship with overlap and
//! adjacency exclusion.
//!
//! Provisional markers live in a [`Scratch`] buffer owned by the caller, never
//! on the grid's cells, so a scan leaves no state behind.

use log::debug;

use crate::common::GridError;
use crate::grid::Grid;
use crate::ship::ShipShape;

/// Provisional marker of a cell during a placement scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mark {
    #[default]
    Clear,
    /// Neighbour already emitted by the current adjacency scan.
    Visited,
    /// Cell occupied by a tentatively placed ship.
    ShipBody,
    /// Cell touching a tentatively placed ship.
    Exclusion,
}

/// Per-scan marker buffer, one slot per grid cell.
#[derive(Debug, Clone, Default)]
pub struct Scratch {
    marks: Vec<Mark>,
    touched: Vec<usize>,
}

impl Scratch {
    pub fn new(len: usize) -> Self {
        Self {
            marks: vec![Mark::Clear; len],
            touched: Vec::new(),
        }
    }

    pub fn mark(&self, index: usize) -> Mark {
        self.marks.get(index).copied().unwrap_or_default()
    }

    pub fn set(&mut self, index: usize, mark: Mark) {
        if let Some(slot) = self.marks.get_mut(index) {
            if *slot == Mark::Clear {
                self.touched.push(index);
            }
            *slot = mark;
        }
    }

    /// Returns `true` if a ship may not occupy `index`.
    pub fn is_blocked(&self, index: usize) -> bool {
        matches!(self.mark(index), Mark::ShipBody | Mark::Exclusion)
    }

    /// Reset every marked slot.
    pub fn clear(&mut self) {
        for index in self.touched.drain(..) {
            self.marks[index] = Mark::Clear;
        }
    }
}

/// Cells a ship would occupy and the halo of cells it would touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub shape: ShipShape,
    pub positions: Vec<usize>,
    pub adjacent: Vec<usize>,
}

impl Grid {
    /// Try to put `shape` with its first cell at (`row`, `col`).
    ///
    /// Every covered cell must be on the grid, not missed or sunk, and not a
    /// ship body or exclusion cell in `scratch`. On success the covered cells
    /// are marked as ship body and their halo as exclusion in `scratch`. On
    /// failure `scratch` is left untouched.
    pub fn try_place(
        &self,
        shape: ShipShape,
        row: usize,
        col: usize,
        scratch: &mut Scratch,
    ) -> Result<Placement, GridError> {
        let positions = self.span(shape, row, col)?;
        if let Some(&index) = positions.iter().find(|&&i| {
            scratch.is_blocked(i)
                || self.miss_positions().contains(&i)
                || self.sunk_positions().contains(&i)
        }) {
            let (row, col) = self.coords(index);
            return Err(GridError::CellOccupiedOrExcluded { row, col });
        }

        for &index in &positions {
            scratch.set(index, Mark::ShipBody);
        }
        let adjacent = self.adjacent_indices(&positions, scratch);
        for &index in &adjacent {
            scratch.set(index, Mark::Exclusion);
        }
        Ok(Placement {
            shape,
            positions,
            adjacent,
        })
    }

    /// Every legal placement of a ship of `length`, anchored at each cell in
    /// row-major order, horizontal before vertical.
    pub fn enumerate_placements(&self, length: usize) -> Vec<Placement> {
        let mut scratch = self.scratch();
        let mut placements = Vec::new();
        if length == 0 {
            return placements;
        }
        let shapes = ShipShape::candidates(length);
        for index in 0..self.len() {
            let (row, col) = self.coords(index);
            for &shape in &shapes {
                if let Ok(placement) = self.try_place(shape, row, col, &mut scratch) {
                    placements.push(placement);
                }
                scratch.clear();
            }
        }
        debug!("{} placements for ship of length {}", placements.len(), length);
        placements
    }
}

//! One player's board: cell states, position sets, shots and fleet placement.

use core::fmt;
use core::mem;
use std::collections::BTreeSet;

use log::debug;
use rand::Rng;

use crate::common::{GridError, ShotOutcome};
use crate::config::MAX_PLACEMENT_ATTEMPTS;
use crate::placement::{Mark, Scratch};
use crate::ship::{Orientation, Ship, ShipShape};

/// Offsets of the eight cells surrounding a cell.
const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Displayable status of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellStatus {
    #[default]
    Empty,
    /// Unresolved ship cell, only shown when ships are revealed.
    Ship,
    Hit,
    Miss,
    Sunk,
}

/// A single cell, addressed by `row * width + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub status: CellStatus,
}

/// Board of one player.
///
/// The four position sets are the source of truth: `ship_positions` holds
/// ship cells that have not been shot, `hit_positions` holds hit cells not yet
/// attributed to a sunk ship, `sunk_positions` holds resolved ship cells and
/// `miss_positions` holds shots into open water. An index is in at most one
/// of them. Cell statuses are derived from the sets.
#[derive(Debug, Clone)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
    ship_positions: BTreeSet<usize>,
    hit_positions: BTreeSet<usize>,
    miss_positions: BTreeSet<usize>,
    sunk_positions: BTreeSet<usize>,
    /// Ship bodies and exclusion halos of the fleet placed on this grid.
    layout: Scratch,
}

impl Grid {
    /// Create an empty `height`×`width` grid.
    pub fn new(height: usize, width: usize) -> Self {
        let cells = (0..height * width)
            .map(|index| Cell {
                row: index / width,
                col: index % width,
                status: CellStatus::Empty,
            })
            .collect();
        Self {
            height,
            width,
            cells,
            ship_positions: BTreeSet::new(),
            hit_positions: BTreeSet::new(),
            miss_positions: BTreeSet::new(),
            sunk_positions: BTreeSet::new(),
            layout: Scratch::new(height * width),
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index / self.width, index % self.width)
    }

    /// A scratch buffer sized for this grid.
    pub fn scratch(&self) -> Scratch {
        Scratch::new(self.len())
    }

    pub fn ship_positions(&self) -> &BTreeSet<usize> {
        &self.ship_positions
    }

    pub fn hit_positions(&self) -> &BTreeSet<usize> {
        &self.hit_positions
    }

    pub fn miss_positions(&self) -> &BTreeSet<usize> {
        &self.miss_positions
    }

    pub fn sunk_positions(&self) -> &BTreeSet<usize> {
        &self.sunk_positions
    }

    /// Returns `true` when the cell was hit, missed or sunk.
    pub fn is_targeted(&self, index: usize) -> bool {
        self.hit_positions.contains(&index)
            || self.miss_positions.contains(&index)
            || self.sunk_positions.contains(&index)
    }

    /// Indices that have never been shot at, in ascending order.
    pub fn untargeted(&self) -> Vec<usize> {
        (0..self.len()).filter(|&i| !self.is_targeted(i)).collect()
    }

    /// Returns `true` if some hit is not yet attributed to a sunk ship.
    pub fn has_unresolved_hits(&self) -> bool {
        !self.hit_positions.is_empty()
    }

    /// Returns `true` when every ship cell on the grid has been hit.
    pub fn fleet_destroyed(&self) -> bool {
        self.ship_positions.is_empty()
    }

    /// Clear every cell to `Empty`. Position sets and the placement layout
    /// are kept, so ships placed afterwards still keep clear of the fleet
    /// already recorded. Callers reusing a grid across games build a new one.
    pub fn reset(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.status = CellStatus::Empty;
        }
    }

    /// Recompute every cell status from the position sets. Unresolved ship
    /// cells are shown only when `reveal_ships` is set.
    pub fn refresh(&mut self, reveal_ships: bool) {
        for cell in self.cells.iter_mut() {
            cell.status = CellStatus::Empty;
        }
        if reveal_ships {
            for &index in &self.ship_positions {
                self.cells[index].status = CellStatus::Ship;
            }
        }
        for &index in &self.miss_positions {
            self.cells[index].status = CellStatus::Miss;
        }
        for &index in &self.hit_positions {
            self.cells[index].status = CellStatus::Hit;
        }
        for &index in &self.sunk_positions {
            self.cells[index].status = CellStatus::Sunk;
        }
    }

    pub fn within_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }

    /// Index of the cell `(dr, dc)` away from `index`, if it is on the grid.
    pub fn offset(&self, index: usize, dr: isize, dc: isize) -> Option<usize> {
        let (row, col) = self.coords(index);
        let (r, c) = (row as isize + dr, col as isize + dc);
        if self.within_bounds(r, c) {
            Some(self.index(r as usize, c as usize))
        } else {
            None
        }
    }

    /// Cells covered by `shape` anchored at (`row`, `col`).
    pub fn span(&self, shape: ShipShape, row: usize, col: usize) -> Result<Vec<usize>, GridError> {
        shape
            .offsets()
            .map(|(dr, dc)| {
                let (r, c) = (row as isize + dr, col as isize + dc);
                if self.within_bounds(r, c) {
                    Ok(self.index(r as usize, c as usize))
                } else {
                    Err(GridError::OutOfBounds { row: r, col: c })
                }
            })
            .collect()
    }

    /// Collect the in-bounds neighbours of `positions` that are neither a
    /// ship body nor already visited in `scratch`. Every returned index is
    /// marked visited so a neighbour shared by two positions is emitted once.
    pub fn adjacent_indices(&self, positions: &[usize], scratch: &mut Scratch) -> Vec<usize> {
        let mut adjacent = Vec::new();
        for &index in positions {
            for (dr, dc) in NEIGHBOURS {
                let Some(neighbour) = self.offset(index, dr, dc) else {
                    continue;
                };
                if matches!(scratch.mark(neighbour), Mark::Visited | Mark::ShipBody) {
                    continue;
                }
                scratch.set(neighbour, Mark::Visited);
                adjacent.push(neighbour);
            }
        }
        adjacent
    }

    /// Place a ship of `length` with its first cell at (`row`, `col`).
    ///
    /// The ship may not overlap or touch a ship already placed on this grid,
    /// nor cover a cell that was shot at.
    pub fn place(
        &mut self,
        length: usize,
        orientation: Orientation,
        row: usize,
        col: usize,
    ) -> Result<Ship, GridError> {
        if length == 0 {
            return Err(GridError::InvalidLength { length });
        }
        let shape = ShipShape::new(length, orientation);
        if let Some(&index) = self
            .span(shape, row, col)?
            .iter()
            .find(|&&i| self.hit_positions.contains(&i))
        {
            let (row, col) = self.coords(index);
            return Err(GridError::CellOccupiedOrExcluded { row, col });
        }

        let mut layout = mem::take(&mut self.layout);
        let placed = self.try_place(shape, row, col, &mut layout);
        self.layout = layout;

        let placement = placed?;
        self.ship_positions.extend(placement.positions.iter().copied());
        Ok(Ship::new(orientation, placement.positions, placement.adjacent))
    }

    /// Place ships of the given lengths, in order, at random anchors and
    /// orientations. On failure the grid is left as it was before the call.
    pub fn place_fleet_randomly<R: Rng + ?Sized>(
        &mut self,
        lengths: &[usize],
        rng: &mut R,
    ) -> Result<Vec<Ship>, GridError> {
        let snapshot = self.clone();
        let placed = self.place_each_randomly(lengths, rng);
        if placed.is_err() {
            *self = snapshot;
        }
        placed
    }

    fn place_each_randomly<R: Rng + ?Sized>(
        &mut self,
        lengths: &[usize],
        rng: &mut R,
    ) -> Result<Vec<Ship>, GridError> {
        let mut choices: Vec<usize> = (0..self.len()).collect();
        let mut ships = Vec::with_capacity(lengths.len());
        for &length in lengths {
            if length == 0 {
                return Err(GridError::InvalidLength { length });
            }
            let mut attempts = 0;
            let ship = loop {
                if attempts == MAX_PLACEMENT_ATTEMPTS || choices.is_empty() {
                    return Err(GridError::UnableToPlaceShip { length });
                }
                attempts += 1;
                let pick = rng.random_range(0..choices.len());
                let (row, col) = self.coords(choices[pick]);
                let orientation = Orientation::ALL[rng.random_range(0..Orientation::ALL.len())];
                if let Ok(ship) = self.place(length, orientation, row, col) {
                    choices.swap_remove(pick);
                    break ship;
                }
            };
            debug!(
                "placed ship of length {} at {:?} ({})",
                length,
                self.coords(ship.positions()[0]),
                ship.orientation()
            );
            ships.push(ship);
        }
        Ok(ships)
    }

    /// Shoot at `index`. Re-shooting a hit, missed or sunk cell is rejected
    /// without touching the grid.
    pub fn shoot(&mut self, index: usize) -> Result<ShotOutcome, GridError> {
        if index >= self.len() {
            return Err(GridError::IndexOutOfBounds { index });
        }
        if self.is_targeted(index) {
            return Err(GridError::AlreadyTargeted { index });
        }
        if self.ship_positions.remove(&index) {
            self.hit_positions.insert(index);
            self.cells[index].status = CellStatus::Hit;
            debug!("shot at {:?}: hit", self.coords(index));
            Ok(ShotOutcome::Hit)
        } else {
            self.miss_positions.insert(index);
            self.cells[index].status = CellStatus::Miss;
            debug!("shot at {:?}: miss", self.coords(index));
            Ok(ShotOutcome::Miss)
        }
    }

    /// Move hit cells into the sunk set.
    /// Record the outcome of a shot observed on another grid. Used by boards
    /// that track evidence without knowing where the ships are.
    pub fn record(&mut self, index: usize, outcome: ShotOutcome) -> Result<(), GridError> {
        if index >= self.len() {
            return Err(GridError::IndexOutOfBounds { index });
        }
        if self.is_targeted(index) {
            return Err(GridError::AlreadyTargeted { index });
        }
        self.ship_positions.remove(&index);
        let status = match outcome {
            ShotOutcome::Hit => {
                self.hit_positions.insert(index);
                CellStatus::Hit
            }
            ShotOutcome::Miss => {
                self.miss_positions.insert(index);
                CellStatus::Miss
            }
        };
        self.cells[index].status = status;
        Ok(())
    }

    /// Copy the public evidence of `other` (hits, misses and sunk cells) that
    /// this grid has not recorded yet. Sunk cells arrive as hits. Ship
    /// positions of `other` are never read.
    pub fn observe(&mut self, other: &Grid) -> Result<(), GridError> {
        let misses = other.miss_positions.iter().map(|&i| (i, ShotOutcome::Miss));
        let hits = other
            .hit_positions
            .iter()
            .chain(&other.sunk_positions)
            .map(|&i| (i, ShotOutcome::Hit));
        for (index, outcome) in misses.chain(hits) {
            if !self.is_targeted(index) {
                self.record(index, outcome)?;
            }
        }
        Ok(())
    }

    pub(crate) fn mark_sunk(&mut self, indices: &[usize]) {
        for &index in indices {
            if self.hit_positions.remove(&index) {
                self.sunk_positions.insert(index);
                self.cells[index].status = CellStatus::Sunk;
            }
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for c in 0..self.width {
            write!(f, " {}", (b'A' + (c % 26) as u8) as char)?;
        }
        writeln!(f)?;
        for r in 0..self.height {
            write!(f, "{:2} ", r + 1)?;
            for c in 0..self.width {
                let ch = match self.cells[self.index(r, c)].status {
                    CellStatus::Empty => '.',
                    CellStatus::Ship => 'S',
                    CellStatus::Hit => 'X',
                    CellStatus::Miss => 'o',
                    CellStatus::Sunk => '#',
                };
                write!(f, " {}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

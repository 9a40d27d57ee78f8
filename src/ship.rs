//! Ship geometry: orientation, shape and placed ships.

use core::fmt;

/// Orientation of a ship on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    /// Row/column step taken when walking along this orientation.
    pub fn step(self) -> (isize, isize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => write!(f, "H"),
            Orientation::Vertical => write!(f, "V"),
        }
    }
}

/// Footprint of a ship, independent of where it sits.
///
/// Single-cell ships have no orientation; their boundary is all four
/// orthogonal neighbours. Linear ships are bounded by the cell before their
/// first segment and the cell after their last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShipShape {
    Single,
    Linear {
        length: usize,
        orientation: Orientation,
    },
}

impl ShipShape {
    pub fn new(length: usize, orientation: Orientation) -> Self {
        if length == 1 {
            ShipShape::Single
        } else {
            ShipShape::Linear {
                length,
                orientation,
            }
        }
    }

    /// Every shape a ship of `length` can take.
    pub fn candidates(length: usize) -> Vec<ShipShape> {
        if length == 1 {
            vec![ShipShape::Single]
        } else {
            Orientation::ALL
                .iter()
                .map(|&orientation| ShipShape::new(length, orientation))
                .collect()
        }
    }

    pub fn length(&self) -> usize {
        match self {
            ShipShape::Single => 1,
            ShipShape::Linear { length, .. } => *length,
        }
    }

    pub fn orientation(&self) -> Orientation {
        match self {
            ShipShape::Single => Orientation::Horizontal,
            ShipShape::Linear { orientation, .. } => *orientation,
        }
    }

    /// Offsets, relative to the anchor, of the cells occupied by the shape.
    pub fn offsets(&self) -> impl Iterator<Item = (isize, isize)> {
        let (dr, dc) = self.orientation().step();
        (0..self.length() as isize).map(move |k| (dr * k, dc * k))
    }

    /// Offsets, relative to the anchor, of the cells bounding the shape.
    pub fn boundary(&self) -> Vec<(isize, isize)> {
        match self {
            ShipShape::Single => vec![(0, -1), (0, 1), (-1, 0), (1, 0)],
            ShipShape::Linear {
                length,
                orientation,
            } => {
                let (dr, dc) = orientation.step();
                let len = *length as isize;
                vec![(-dr, -dc), (dr * len, dc * len)]
            }
        }
    }
}

/// A ship placed on a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    length: usize,
    orientation: Orientation,
    positions: Vec<usize>,
    adjacent: Vec<usize>,
    hits_remaining: usize,
}

impl Ship {
    pub fn new(orientation: Orientation, positions: Vec<usize>, adjacent: Vec<usize>) -> Self {
        let length = positions.len();
        Self {
            length,
            orientation,
            positions,
            adjacent,
            hits_remaining: length,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn shape(&self) -> ShipShape {
        ShipShape::new(self.length, self.orientation)
    }

    /// Linear indices occupied by the ship.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Linear indices of the exclusion halo around the ship.
    pub fn adjacent(&self) -> &[usize] {
        &self.adjacent
    }

    pub fn contains(&self, index: usize) -> bool {
        self.positions.contains(&index)
    }

    /// Segments not yet hit.
    pub fn hits_remaining(&self) -> usize {
        self.hits_remaining
    }

    /// Record a hit at `index`. Returns `true` if the index belongs to the ship.
    pub fn register_hit(&mut self, index: usize) -> bool {
        if self.contains(index) {
            self.hits_remaining = self.hits_remaining.saturating_sub(1);
            true
        } else {
            false
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.hits_remaining == 0
    }
}

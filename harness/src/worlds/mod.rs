//! Concrete state spaces used by tests, benchmarks and the runner.
//!
//! Worlds provide domain data only: membership, actions, transitions, costs
//! and predecessors. They never drive a search themselves.

pub mod grid_world;
pub mod hill_climber;
pub mod weighted_graph;

pub use grid_world::GridWorld;
pub use hill_climber::HillClimber;
pub use weighted_graph::WeightedGraph;

use serde::{Deserialize, Serialize};

/// A cell of a rectangular lattice. `x` grows to the right, `y` grows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in direction `m`. No bounds check.
    #[must_use]
    pub const fn step(self, m: Move) -> Self {
        let (dx, dy) = m.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Euclidean distance in the plane.
    #[must_use]
    pub fn distance(self, other: Cell) -> f64 {
        f64::from(self.x - other.x).hypot(f64::from(self.y - other.y))
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A 4-connected lattice move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Right,
    Up,
    Left,
    Down,
}

impl Move {
    /// All moves in enumeration order.
    pub const ALL: [Move; 4] = [Move::Right, Move::Up, Move::Left, Move::Down];

    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Right => (1, 0),
            Self::Up => (0, 1),
            Self::Left => (-1, 0),
            Self::Down => (0, -1),
        }
    }

    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Left => Self::Right,
            Self::Down => Self::Up,
        }
    }
}

/// Error building a world.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldError {
    #[error("lattice dimensions must be positive, got {width}x{height}")]
    EmptyLattice { width: i32, height: i32 },

    #[error("cell {cell} is outside the {width}x{height} lattice")]
    CellOutOfBounds { cell: Cell, width: i32, height: i32 },

    #[error("height at {cell} is not finite: {value}")]
    NonFiniteHeight { cell: Cell, value: f64 },

    #[error("entry cost at {cell} must be finite and non-negative, got {value}")]
    InvalidCellCost { cell: Cell, value: f64 },
}

/// Bounds check shared by the lattice worlds.
pub(crate) fn in_bounds(cell: Cell, width: i32, height: i32) -> bool {
    (0..width).contains(&cell.x) && (0..height).contains(&cell.y)
}

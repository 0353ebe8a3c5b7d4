//! `GridWorld`: a rectangular 4-connected lattice with optional obstacles and
//! per-cell entry costs.
//!
//! Moving into a cell costs that cell's entry cost (1.0 unless overridden), so
//! with all costs at least 1.0 the straight-line distance to the goal is an
//! admissible heuristic.

use std::collections::{HashMap, HashSet};

use wayfinder_kernel::problem::StateSpace;

use super::{in_bounds, Cell, Move, WorldError};

const DEFAULT_ENTRY_COST: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct GridWorld {
    width: i32,
    height: i32,
    blocked: HashSet<Cell>,
    entry_costs: HashMap<Cell, f64>,
}

impl GridWorld {
    /// An open `width x height` lattice with unit entry costs.
    ///
    /// # Errors
    ///
    /// [`WorldError::EmptyLattice`] if either dimension is not positive.
    pub fn new(width: i32, height: i32) -> Result<Self, WorldError> {
        if width <= 0 || height <= 0 {
            return Err(WorldError::EmptyLattice { width, height });
        }
        Ok(Self {
            width,
            height,
            blocked: HashSet::new(),
            entry_costs: HashMap::new(),
        })
    }

    /// Mark `cell` as an obstacle; it leaves the state space.
    ///
    /// # Errors
    ///
    /// [`WorldError::CellOutOfBounds`] if `cell` is outside the lattice.
    pub fn block(&mut self, cell: Cell) -> Result<&mut Self, WorldError> {
        self.check_bounds(cell)?;
        self.blocked.insert(cell);
        Ok(self)
    }

    /// Override the cost of moving into `cell`.
    ///
    /// # Errors
    ///
    /// - [`WorldError::CellOutOfBounds`] if `cell` is outside the lattice.
    /// - [`WorldError::InvalidCellCost`] for a negative or non-finite cost.
    pub fn set_entry_cost(&mut self, cell: Cell, cost: f64) -> Result<&mut Self, WorldError> {
        self.check_bounds(cell)?;
        if !cost.is_finite() || cost < 0.0 {
            return Err(WorldError::InvalidCellCost { cell, value: cost });
        }
        self.entry_costs.insert(cell, cost);
        Ok(self)
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.blocked.contains(&cell)
    }

    #[must_use]
    pub fn entry_cost(&self, cell: Cell) -> f64 {
        self.entry_costs
            .get(&cell)
            .copied()
            .unwrap_or(DEFAULT_ENTRY_COST)
    }

    /// Straight-line distance to `goal`, usable as an A* heuristic.
    #[must_use]
    pub fn euclidean_to(goal: Cell) -> impl Fn(&Cell) -> f64 + Clone + 'static {
        move |cell: &Cell| cell.distance(goal)
    }

    fn check_bounds(&self, cell: Cell) -> Result<(), WorldError> {
        if in_bounds(cell, self.width, self.height) {
            Ok(())
        } else {
            Err(WorldError::CellOutOfBounds {
                cell,
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl StateSpace for GridWorld {
    type State = Cell;
    type Action = Move;

    fn contains(&self, state: &Cell) -> bool {
        in_bounds(*state, self.width, self.height) && !self.blocked.contains(state)
    }

    fn actions(&self, state: &Cell) -> Vec<Move> {
        Move::ALL
            .into_iter()
            .filter(|m| self.contains(&state.step(*m)))
            .collect()
    }

    fn transition(&self, state: &Cell, action: &Move) -> Cell {
        state.step(*action)
    }

    fn has_cost_function(&self) -> bool {
        true
    }

    fn step_cost(&self, state: &Cell, action: &Move) -> Option<f64> {
        Some(self.entry_cost(state.step(*action)))
    }

    fn predecessors(&self, state: &Cell) -> Option<Vec<(Cell, Move)>> {
        Some(
            Move::ALL
                .into_iter()
                .map(|m| (state.step(m.reverse()), m))
                .filter(|(pred, _)| self.contains(pred))
                .collect(),
        )
    }

    fn action_space(&self) -> Option<Vec<Move>> {
        Some(Move::ALL.to_vec())
    }
}

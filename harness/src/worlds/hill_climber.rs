//! `HillClimber`: a height field sampled on a lattice.
//!
//! Each lattice point `(x, y)` is lifted to `(x, y, f(x, y))`. Moving between
//! neighbours costs the 3-D Euclidean distance between their lifted points,
//! so climbing steep slopes is expensive and the straight 3-D line to the goal
//! never overestimates.

use std::sync::Arc;

use wayfinder_kernel::problem::StateSpace;

use super::{in_bounds, Cell, Move, WorldError};

#[derive(Debug, Clone)]
pub struct HillClimber {
    width: i32,
    height: i32,
    /// Row-major samples, `heights[y * width + x]`.
    heights: Arc<[f64]>,
}

impl HillClimber {
    /// Sample `height_fn` over a `width x height` lattice.
    ///
    /// # Errors
    ///
    /// - [`WorldError::EmptyLattice`] if either dimension is not positive.
    /// - [`WorldError::NonFiniteHeight`] if any sample is NaN or infinite.
    pub fn new<F>(width: i32, height: i32, height_fn: F) -> Result<Self, WorldError>
    where
        F: Fn(i32, i32) -> f64,
    {
        if width <= 0 || height <= 0 {
            return Err(WorldError::EmptyLattice { width, height });
        }
        let mut heights = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let value = height_fn(x, y);
                if !value.is_finite() {
                    return Err(WorldError::NonFiniteHeight {
                        cell: Cell::new(x, y),
                        value,
                    });
                }
                heights.push(value);
            }
        }
        Ok(Self {
            width,
            height,
            heights: heights.into(),
        })
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Sampled height at `cell`, `None` outside the lattice.
    #[must_use]
    pub fn elevation(&self, cell: Cell) -> Option<f64> {
        elevation(&self.heights, self.width, self.height, cell)
    }

    /// 3-D distance between the lifted points of `a` and `b`.
    #[must_use]
    pub fn lifted_distance(&self, a: Cell, b: Cell) -> Option<f64> {
        let dz = self.elevation(b)? - self.elevation(a)?;
        Some(a.distance(b).hypot(dz))
    }

    /// Straight 3-D line to `goal`; admissible for this world.
    ///
    /// Returns 0 for cells outside the lattice or when `goal` is outside it.
    #[must_use]
    pub fn straight_line_heuristic(&self, goal: Cell) -> impl Fn(&Cell) -> f64 + Clone + 'static {
        let heights = Arc::clone(&self.heights);
        let (width, height) = (self.width, self.height);
        let goal_z = self.elevation(goal);
        move |cell: &Cell| match (goal_z, elevation(&heights, width, height, *cell)) {
            (Some(gz), Some(z)) => cell.distance(goal).hypot(gz - z),
            _ => 0.0,
        }
    }
}

fn elevation(heights: &[f64], width: i32, height: i32, cell: Cell) -> Option<f64> {
    if !in_bounds(cell, width, height) {
        return None;
    }
    let index = usize::try_from(cell.y * width + cell.x).ok()?;
    heights.get(index).copied()
}

impl StateSpace for HillClimber {
    type State = Cell;
    type Action = Move;

    fn contains(&self, state: &Cell) -> bool {
        in_bounds(*state, self.width, self.height)
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
        self.lifted_distance(*state, state.step(*action))
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

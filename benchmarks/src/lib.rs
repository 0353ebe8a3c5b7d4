//! Shared regimes for the wayfinder benchmark suites.
//!
//! A regime is a named grid problem plus the heuristic A* should use on it.
//! The grids are larger than the lock fixtures so the frontier, not setup,
//! dominates timing.

use wayfinder_harness::worlds::{Cell, GridWorld, HillClimber};
use wayfinder_kernel::problem::{PlanningProblem, StateSpace};

/// A named grid problem with its goal, for building heuristics.
pub struct Regime<W: StateSpace> {
    pub name: &'static str,
    pub problem: PlanningProblem<W>,
    pub goal: Cell,
}

/// Open `size × size` grid, corner to corner.
///
/// # Panics
///
/// Panics if `size` is not positive.
#[must_use]
pub fn open_field(size: i32) -> Regime<GridWorld> {
    let world = GridWorld::new(size, size).expect("open field");
    let goal = Cell::new(size - 1, size - 1);
    Regime {
        name: "open_field",
        problem: PlanningProblem::new(world, Cell::new(0, 0), [goal]).expect("open field"),
        goal,
    }
}

/// Serpentine maze: full-height walls every other column, alternately open
/// at the top and the bottom. The only route visits almost every cell.
///
/// # Panics
///
/// Panics if `size` is below 3.
#[must_use]
pub fn serpentine(size: i32) -> Regime<GridWorld> {
    let mut world = GridWorld::new(size, size).expect("serpentine");
    for x in (1..size - 1).step_by(2) {
        let gap = if (x / 2) % 2 == 0 { size - 1 } else { 0 };
        for y in (0..size).filter(|&y| y != gap) {
            world.block(Cell::new(x, y)).expect("serpentine");
        }
    }
    let goal = Cell::new(size - 1, 0);
    Regime {
        name: "serpentine",
        problem: PlanningProblem::new(world, Cell::new(0, 0), [goal]).expect("serpentine"),
        goal,
    }
}

/// Rolling terrain: a sum of sines, steep enough that the cheapest path
/// bends around the peaks.
///
/// # Panics
///
/// Panics if `size` is not positive.
#[must_use]
pub fn rolling_hills(size: i32) -> Regime<HillClimber> {
    let world = HillClimber::new(size, size, |x, y| {
        let (x, y) = (f64::from(x), f64::from(y));
        3.0 * (x / 3.0).sin() + 3.0 * (y / 4.0).cos()
    })
    .expect("rolling hills");
    let goal = Cell::new(size - 1, size - 1);
    Regime {
        name: "rolling_hills",
        problem: PlanningProblem::new(world, Cell::new(0, 0), [goal]).expect("rolling hills"),
        goal,
    }
}

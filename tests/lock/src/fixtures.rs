//! Canonical problems shared by the lock tests, the fixture binary and the
//! benchmarks.
//!
//! Each builder returns a fresh, validated [`PlanningProblem`]. The worlds are
//! small enough that optimal answers can be checked by brute force.

use std::collections::BTreeMap;

use wayfinder_harness::worlds::{Cell, GridWorld, WeightedGraph};
use wayfinder_kernel::problem::{PlanningProblem, StateSpace};

/// Undirected 3×3 lattice of named vertices:
///
/// ```text
/// A -2- B -2- C
/// 1     3     2
/// D -4- E -1- F
/// 2     2     3
/// G -3- H -2- I
/// ```
pub const LATTICE_EDGES: [(&str, &str, f64); 12] = [
    ("A", "B", 2.0),
    ("A", "D", 1.0),
    ("B", "C", 2.0),
    ("B", "E", 3.0),
    ("C", "F", 2.0),
    ("D", "E", 4.0),
    ("D", "G", 2.0),
    ("E", "F", 1.0),
    ("E", "H", 2.0),
    ("F", "I", 3.0),
    ("G", "H", 3.0),
    ("H", "I", 2.0),
];

/// Cheapest `A` to `I` cost on the lattice graph (`A-D-G-H-I`).
pub const LATTICE_OPTIMUM: f64 = 8.0;

/// The lattice graph, searching from `A` to `I`.
///
/// # Panics
///
/// Panics if the fixture itself is malformed.
#[must_use]
pub fn lattice_graph() -> PlanningProblem<WeightedGraph> {
    let graph = WeightedGraph::from_undirected_edges(LATTICE_EDGES);
    PlanningProblem::new(graph, "A".to_string(), ["I".to_string()]).expect("lattice fixture")
}

/// Directed line `A -> B <-> C <-> D` with goals `{B, D}`.
///
/// # Panics
///
/// Panics if the fixture itself is malformed.
#[must_use]
pub fn line_graph() -> PlanningProblem<WeightedGraph> {
    let mut graph = WeightedGraph::directed();
    graph
        .add_edge("A", "B", 1.0)
        .add_edge("B", "C", 1.0)
        .add_edge("C", "B", 1.0)
        .add_edge("C", "D", 1.0)
        .add_edge("D", "C", 1.0);
    PlanningProblem::new(graph, "A".to_string(), ["B".to_string(), "D".to_string()])
        .expect("line fixture")
}

/// Open `size × size` grid from the bottom-left to the top-right corner.
///
/// # Panics
///
/// Panics if `size` is not positive.
#[must_use]
pub fn open_grid(size: i32) -> PlanningProblem<GridWorld> {
    let world = GridWorld::new(size, size).expect("grid fixture");
    PlanningProblem::new(world, Cell::new(0, 0), [corner(size)]).expect("grid fixture")
}

/// 6×6 grid with a wall at `x = 3` open only at the top row.
///
/// ```text
/// . . . . . G
/// . . . # . .
/// . . . # . .
/// . . . # . .
/// . . . # . .
/// S . . # . .
/// ```
///
/// # Panics
///
/// Panics if the fixture itself is malformed.
#[must_use]
pub fn barrier_grid() -> PlanningProblem<GridWorld> {
    let mut world = GridWorld::new(6, 6).expect("barrier fixture");
    for y in 0..5 {
        world.block(Cell::new(3, y)).expect("barrier fixture");
    }
    PlanningProblem::new(world, Cell::new(0, 0), [corner(6)]).expect("barrier fixture")
}

/// Top-right cell of a `size × size` grid.
#[must_use]
pub fn corner(size: i32) -> Cell {
    Cell::new(size - 1, size - 1)
}

/// Cheapest cost from the initial state to every reachable state, computed
/// by Bellman-Ford relaxation over the full transition relation.
///
/// `states` must list every state of the space. Used as an oracle for the
/// cost-ordered frontiers.
///
/// # Panics
///
/// Panics if a query on the problem fails.
#[must_use]
pub fn brute_force_costs<P>(problem: &PlanningProblem<P>, states: &[P::State]) -> BTreeMap<usize, f64>
where
    P: StateSpace,
{
    relax_all(problem, states, |state, action| {
        problem.cost(state, action).expect("cost")
    })
}

/// Fewest edges from the initial state to every reachable state, keyed like
/// [`brute_force_costs`]. Oracle for breadth-first search.
///
/// # Panics
///
/// Panics if a query on the problem fails.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn brute_force_edges<P>(problem: &PlanningProblem<P>, states: &[P::State]) -> BTreeMap<usize, usize>
where
    P: StateSpace,
{
    relax_all(problem, states, |_, _| 1.0)
        .into_iter()
        .map(|(i, edges)| (i, edges as usize))
        .collect()
}

fn relax_all<P, F>(problem: &PlanningProblem<P>, states: &[P::State], step_cost: F) -> BTreeMap<usize, f64>
where
    P: StateSpace,
    F: Fn(&P::State, &P::Action) -> f64,
{
    let index = |s: &P::State| states.iter().position(|t| t == s);
    let mut dist: BTreeMap<usize, f64> = BTreeMap::new();
    if let Some(start) = index(problem.initial_state()) {
        dist.insert(start, 0.0);
    }
    for _ in 0..states.len() {
        let mut changed = false;
        for (i, state) in states.iter().enumerate() {
            let Some(&base) = dist.get(&i) else { continue };
            for (action, next) in problem.transitions(state).expect("transitions") {
                let Some(j) = index(&next) else { continue };
                let cost = base + step_cost(state, &action);
                if dist.get(&j).map_or(true, |&d| cost < d) {
                    dist.insert(j, cost);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    dist
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oracle_agrees_with_lattice_optimum() {
        let p = lattice_graph();
        let names: Vec<String> = p.space().vertices().map(str::to_string).collect();
        let dist = brute_force_costs(&p, &names);
        let goal = names.iter().position(|n| n == "I").unwrap();
        assert!((dist[&goal] - LATTICE_OPTIMUM).abs() < 1e-9);
    }

    #[test]
    fn edge_oracle_counts_hops_not_weights() {
        let p = lattice_graph();
        let names: Vec<String> = p.space().vertices().map(str::to_string).collect();
        let edges = brute_force_edges(&p, &names);
        let at = |n: &str| edges[&names.iter().position(|v| v == n).unwrap()];
        assert_eq!(at("A"), 0);
        assert_eq!(at("E"), 2);
        assert_eq!(at("I"), 4);
    }
}

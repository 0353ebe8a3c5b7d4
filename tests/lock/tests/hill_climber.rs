//! Hill climber lock tests: 3-D step costs over a height field, and A* with
//! the straight-line heuristic against uniform-cost search.

use wayfinder_harness::worlds::{Cell, HillClimber, WorldError};
use wayfinder_kernel::problem::PlanningProblem;
use wayfinder_search::priority::CostOrderedFrontier;
use wayfinder_search::search::SearchEngine;

/// A ridge along `x = 2` that is cheaper to walk around than over.
fn ridge() -> HillClimber {
    HillClimber::new(5, 5, |x, y| if x == 2 && y < 4 { 6.0 } else { 0.0 }).unwrap()
}

#[test]
fn rejects_non_finite_heights() {
    let err = HillClimber::new(2, 2, |x, _| if x == 1 { f64::INFINITY } else { 0.0 }).unwrap_err();
    assert!(matches!(err, WorldError::NonFiniteHeight { .. }));
}

#[test]
fn astar_matches_uniform_cost_over_a_ridge() {
    let world = ridge();
    let start = Cell::new(0, 0);
    let goal = Cell::new(4, 0);
    let h = world.straight_line_heuristic(goal);
    let p = PlanningProblem::new(world, start, [goal]).unwrap();

    let mut ucs = SearchEngine::new(&p, CostOrderedFrontier::uniform_cost()).unwrap();
    let ucs_path = ucs.generate_solution().unwrap().into_path().unwrap();
    let mut astar = SearchEngine::new(&p, CostOrderedFrontier::astar(h)).unwrap();
    let astar_path = astar.generate_solution().unwrap().into_path().unwrap();

    let ucs_cost = ucs_path.total_cost(&p).unwrap();
    let astar_cost = astar_path.total_cost(&p).unwrap();
    assert!((ucs_cost - astar_cost).abs() < 1e-9, "{ucs_cost} vs {astar_cost}");
    assert!(astar.stats().expansions <= ucs.stats().expansions);
    assert!(astar_path.validate(&p).unwrap());
}

#[test]
fn detour_is_cheaper_than_climbing() {
    let world = ridge();
    let p = PlanningProblem::new(world, Cell::new(0, 0), [Cell::new(4, 0)]).unwrap();
    let mut engine = SearchEngine::new(&p, CostOrderedFrontier::uniform_cost()).unwrap();
    let path = engine.generate_solution().unwrap().into_path().unwrap();
    // Crossing the ridge costs two 6-high climbs; walking around is 12 flat steps.
    assert!(path.states().contains(&Cell::new(2, 4)));
    assert!((path.total_cost(&p).unwrap() - 12.0).abs() < 1e-9);
}

#[test]
fn flat_world_costs_are_planar() {
    let world = HillClimber::new(3, 3, |_, _| 1.5).unwrap();
    let p = PlanningProblem::new(world, Cell::new(0, 0), [Cell::new(2, 2)]).unwrap();
    let mut engine = SearchEngine::new(&p, CostOrderedFrontier::uniform_cost()).unwrap();
    let path = engine.generate_solution().unwrap().into_path().unwrap();
    assert!((path.total_cost(&p).unwrap() - 4.0).abs() < 1e-9);
}

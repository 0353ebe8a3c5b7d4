//! A* lock tests: optimality with an admissible heuristic, expansion counts
//! against uniform-cost search, and tolerance of bad estimates.

use lock_tests::fixtures::{barrier_grid, corner, open_grid};
use wayfinder_harness::worlds::{Cell, GridWorld};
use wayfinder_kernel::problem::PlanningProblem;
use wayfinder_search::heuristic::ZeroHeuristic;
use wayfinder_search::observer::RecordingObserver;
use wayfinder_search::priority::CostOrderedFrontier;
use wayfinder_search::search::{SearchEngine, SearchStats};
use wayfinder_search::solution::SolutionPath;

fn dijkstra(p: &PlanningProblem<GridWorld>) -> (SolutionPath<Cell>, SearchStats) {
    let mut engine = SearchEngine::new(p, CostOrderedFrontier::uniform_cost()).unwrap();
    let path = engine.generate_solution().unwrap().into_path().unwrap();
    (path, engine.stats())
}

fn astar<H>(p: &PlanningProblem<GridWorld>, h: H) -> (SolutionPath<Cell>, SearchStats)
where
    H: Fn(&Cell) -> f64,
{
    let mut engine = SearchEngine::new(p, CostOrderedFrontier::astar(h)).unwrap();
    let path = engine.generate_solution().unwrap().into_path().unwrap();
    (path, engine.stats())
}

#[test]
fn open_grid_astar_is_optimal_and_no_worse_than_dijkstra() {
    let p = open_grid(3);
    let (ucs_path, ucs_stats) = dijkstra(&p);
    let (path, stats) = astar(&p, GridWorld::euclidean_to(corner(3)));
    assert_eq!(ucs_path.edge_count(), 4);
    assert_eq!(path.edge_count(), 4);
    assert!(path.validate(&p).unwrap());
    assert!(
        stats.expansions <= ucs_stats.expansions,
        "A* expanded {} states, Dijkstra {}",
        stats.expansions,
        ucs_stats.expansions
    );
}

#[test]
fn barrier_grid_astar_matches_dijkstra_cost() {
    let p = barrier_grid();
    let (ucs_path, ucs_stats) = dijkstra(&p);
    let (path, stats) = astar(&p, GridWorld::euclidean_to(corner(6)));
    let ucs_cost = ucs_path.total_cost(&p).unwrap();
    let cost = path.total_cost(&p).unwrap();
    assert!((cost - ucs_cost).abs() < 1e-9);
    assert!((cost - 10.0).abs() < 1e-9);
    assert!(stats.expansions <= ucs_stats.expansions);
}

#[test]
fn zero_heuristic_orders_like_uniform_cost() {
    let p = barrier_grid();

    let mut ucs_log = RecordingObserver::new();
    SearchEngine::new(&p, CostOrderedFrontier::uniform_cost())
        .unwrap()
        .generate_solution_observed(&mut ucs_log)
        .unwrap();

    let mut astar_log = RecordingObserver::new();
    SearchEngine::new(&p, CostOrderedFrontier::astar(ZeroHeuristic))
        .unwrap()
        .generate_solution_observed(&mut astar_log)
        .unwrap();

    assert_eq!(ucs_log.extracted(), astar_log.extracted());
    assert_eq!(ucs_log.outcomes(), astar_log.outcomes());
}

#[test]
fn inadmissible_heuristic_still_returns_a_valid_path() {
    let p = barrier_grid();
    let goal = corner(6);
    let (path, _) = astar(&p, move |c: &Cell| 50.0 * c.distance(goal));
    assert!(path.validate(&p).unwrap());
    assert!(path.total_cost(&p).unwrap() >= 10.0);
}

#[test]
fn non_finite_estimates_are_treated_as_zero() {
    let p = open_grid(3);
    let (path, _) = astar(&p, |c: &Cell| if c.x == 1 { f64::NAN } else { -3.0 });
    assert_eq!(path.edge_count(), 4);
    assert!((path.total_cost(&p).unwrap() - 4.0).abs() < 1e-9);
}

#[test]
fn heuristic_does_not_enter_path_cost() {
    let p = open_grid(4);
    let (path, _) = astar(&p, |_: &Cell| 100.0);
    assert!((path.total_cost(&p).unwrap() - 6.0).abs() < 1e-9);
}

#[test]
fn diagonal_toll_grid_astar_matches_dijkstra() {
    // Every route from (0,0) to (5,5) must enter one cell of the x + y = 5
    // anti-diagonal, and each of those costs 20 to enter.
    let mut world = GridWorld::new(6, 6).unwrap();
    for x in 0..6 {
        world.set_entry_cost(Cell::new(x, 5 - x), 20.0).unwrap();
    }
    let p = PlanningProblem::new(world, Cell::new(0, 0), [corner(6)]).unwrap();
    let (ucs_path, _) = dijkstra(&p);
    let (path, _) = astar(&p, GridWorld::euclidean_to(corner(6)));
    let cost = path.total_cost(&p).unwrap();
    assert!((cost - ucs_path.total_cost(&p).unwrap()).abs() < 1e-9);
    assert!((cost - 29.0).abs() < 1e-9);
}

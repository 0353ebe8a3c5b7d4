//! Uniform-cost lock tests: optimality against a brute-force oracle,
//! relaxation of cheaper duplicates, and cost-function error propagation.

use std::collections::HashMap;

use lock_tests::fixtures::{brute_force_costs, lattice_graph, open_grid, LATTICE_OPTIMUM};
use wayfinder_harness::worlds::{Cell, GridWorld, WeightedGraph};
use wayfinder_kernel::problem::{PlanningProblem, ProblemError, StateSpace};
use wayfinder_search::error::SearchError;
use wayfinder_search::observer::{SearchEvent, SearchObserver, SuccessorOutcome};
use wayfinder_search::priority::CostOrderedFrontier;
use wayfinder_search::search::SearchEngine;

#[test]
fn lattice_cost_is_the_true_minimum() {
    let p = lattice_graph();
    let mut engine = SearchEngine::new(&p, CostOrderedFrontier::uniform_cost()).unwrap();
    let path = engine.generate_solution().unwrap().into_path().unwrap();
    let cost = path.total_cost(&p).unwrap();
    assert!((cost - LATTICE_OPTIMUM).abs() < 1e-9, "cost {cost}");
    assert!(path.validate(&p).unwrap());
}

#[test]
fn every_lattice_vertex_matches_the_oracle() {
    let mut p = lattice_graph();
    let names: Vec<String> = p.space().vertices().map(str::to_string).collect();
    let oracle = brute_force_costs(&p, &names);

    for (i, name) in names.iter().enumerate() {
        p.set_goal_states([name.clone()]);
        let mut engine = SearchEngine::new(&p, CostOrderedFrontier::uniform_cost()).unwrap();
        let path = engine.generate_solution().unwrap().into_path().unwrap();
        let cost = path.total_cost(&p).unwrap();
        assert!((cost - oracle[&i]).abs() < 1e-9, "{name}: {cost} vs {}", oracle[&i]);
    }
}

#[test]
fn open_grid_takes_four_unit_steps() {
    let p = open_grid(3);
    let mut engine = SearchEngine::new(&p, CostOrderedFrontier::uniform_cost()).unwrap();
    let path = engine.generate_solution().unwrap().into_path().unwrap();
    assert_eq!(path.edge_count(), 4);
    assert!((path.total_cost(&p).unwrap() - 4.0).abs() < 1e-9);
}

#[test]
fn expensive_cells_are_routed_around() {
    // The middle column is expensive except at the top.
    let mut world = GridWorld::new(3, 3).unwrap();
    world
        .set_entry_cost(Cell::new(1, 0), 10.0)
        .unwrap()
        .set_entry_cost(Cell::new(1, 1), 10.0)
        .unwrap();
    let p = PlanningProblem::new(world, Cell::new(0, 0), [Cell::new(2, 0)]).unwrap();
    let mut engine = SearchEngine::new(&p, CostOrderedFrontier::uniform_cost()).unwrap();
    let path = engine.generate_solution().unwrap().into_path().unwrap();
    assert!(path.states().contains(&Cell::new(1, 2)));
    assert!((path.total_cost(&p).unwrap() - 6.0).abs() < 1e-9);
}

#[test]
fn cheaper_late_route_relaxes_the_first() {
    // S -> G costs 10; S -> A -> B -> G costs 3.
    let mut g = WeightedGraph::directed();
    g.add_edge("S", "G", 10.0)
        .add_edge("S", "A", 1.0)
        .add_edge("A", "B", 1.0)
        .add_edge("B", "G", 1.0);
    let p = PlanningProblem::new(g, "S".to_string(), ["G".to_string()]).unwrap();
    let mut engine = SearchEngine::new(&p, CostOrderedFrontier::uniform_cost()).unwrap();
    let path = engine.generate_solution().unwrap().into_path().unwrap();
    assert_eq!(path.states(), ["S", "A", "B", "G"].map(String::from));
    let stats = engine.stats();
    assert_eq!(stats.relaxations, 1);
    assert_eq!(stats.stale_skipped, 0);
}

/// Tracks the best reported cost per state and checks every successor
/// outcome against it.
#[derive(Default)]
struct CostTableAudit {
    best: HashMap<String, f64>,
    relaxed: usize,
}

impl SearchObserver<String> for CostTableAudit {
    fn report(&mut self, event: &SearchEvent<'_, String>) {
        let SearchEvent::Successor { successor, cost, outcome, .. } = event else {
            return;
        };
        let cost = cost.expect("uniform cost tracks costs");
        match outcome {
            SuccessorOutcome::Discovered => {
                self.best.insert((*successor).clone(), cost);
            }
            SuccessorOutcome::Relaxed => {
                let known = self.best[*successor];
                assert!(cost < known, "{successor}: relaxed {known} to {cost}");
                self.best.insert((*successor).clone(), cost);
                self.relaxed += 1;
            }
            SuccessorOutcome::Ignored => {
                if let Some(&known) = self.best.get(*successor) {
                    assert!(cost >= known, "{successor}: ignored cheaper {cost} < {known}");
                }
            }
        }
    }
}

#[test]
fn relaxations_only_lower_costs() {
    let mut g = WeightedGraph::directed();
    g.add_edge("S", "G", 10.0)
        .add_edge("S", "A", 1.0)
        .add_edge("A", "B", 1.0)
        .add_edge("B", "G", 1.0)
        .add_edge("B", "S", 1.0);
    let mut audit = CostTableAudit::default();
    for p in [
        PlanningProblem::new(g, "S".to_string(), ["G".to_string()]).unwrap(),
        lattice_graph(),
    ] {
        let mut engine = SearchEngine::new(&p, CostOrderedFrontier::uniform_cost()).unwrap();
        engine.generate_solution_observed(&mut audit).unwrap();
        audit.best.clear();
    }
    assert!(audit.relaxed >= 1);
}

#[test]
fn zero_cost_edges_are_allowed() {
    let mut g = WeightedGraph::directed();
    g.add_edge("S", "A", 0.0).add_edge("A", "G", 0.0);
    let p = PlanningProblem::new(g, "S".to_string(), ["G".to_string()]).unwrap();
    let mut engine = SearchEngine::new(&p, CostOrderedFrontier::uniform_cost()).unwrap();
    let path = engine.generate_solution().unwrap().into_path().unwrap();
    assert_eq!(path.total_cost(&p).unwrap(), 0.0);
}

#[test]
fn negative_cost_fails_the_search() {
    let mut g = WeightedGraph::directed();
    g.add_edge("S", "A", 1.0).add_edge("A", "G", -2.0);
    let p = PlanningProblem::new(g, "S".to_string(), ["G".to_string()]).unwrap();
    let mut engine = SearchEngine::new(&p, CostOrderedFrontier::uniform_cost()).unwrap();
    let err = engine.generate_solution().unwrap_err();
    assert!(matches!(
        err,
        SearchError::Problem(ProblemError::InvalidCostValue { value, .. }) if value == -2.0
    ));
}

#[test]
fn costless_space_is_rejected_before_searching() {
    struct Costless;
    impl StateSpace for Costless {
        type State = i32;
        type Action = i32;
        fn contains(&self, s: &i32) -> bool {
            (0..5).contains(s)
        }
        fn actions(&self, s: &i32) -> Vec<i32> {
            if *s < 4 {
                vec![1]
            } else {
                Vec::new()
            }
        }
        fn transition(&self, s: &i32, a: &i32) -> i32 {
            s + a
        }
    }
    let p = PlanningProblem::new(Costless, 0, [4]).unwrap();
    let err = SearchEngine::new(&p, CostOrderedFrontier::uniform_cost()).unwrap_err();
    assert!(matches!(err, SearchError::MissingCostFunction { .. }));
    assert_eq!(
        err.to_string(),
        "uniform_cost search requires a cost function on the problem"
    );
}

//! Wayfinder Search: frontier-managed forward search over a planning problem.
//!
//! This crate depends only on `wayfinder_kernel`; it does NOT depend on
//! `wayfinder_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! wayfinder_kernel  ←  wayfinder_search  ←  wayfinder_harness
//! (problem, proof)     (engine, frontiers)  (worlds, event log, runner)
//! ```
//!
//! # Key types
//!
//! - [`search::SearchEngine`] -- the fixed exploration loop
//! - [`frontier::Frontier`] -- pluggable insertion/extraction/duplicate policy
//! - [`frontier::FifoFrontier`], [`frontier::LifoFrontier`] -- BFS and DFS
//! - [`priority::CostOrderedFrontier`] -- uniform-cost and A*
//! - [`heuristic::Heuristic`] -- remaining-cost estimate for A*
//! - [`solution::SolutionPath`] -- reconstruction, validation, formatting
//! - [`observer::SearchObserver`] -- side-channel event reporting

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod observer;
pub mod priority;
pub mod search;
pub mod solution;

pub use error::SearchError;
pub use frontier::{FifoFrontier, Frontier, FrontierKind, LifoFrontier};
pub use heuristic::{Heuristic, ZeroHeuristic};
pub use observer::{NullObserver, RecordingObserver, SearchEvent, SearchObserver, SuccessorOutcome};
pub use priority::{AStarFrontier, CostOrderedFrontier, UniformCostFrontier};
pub use search::{SearchEngine, SearchOutcome, SearchStats, StepOutcome};
pub use solution::{FormatOptions, SolutionPath};

//! Wayfinder Kernel: the problem side of discrete state-space search.
//!
//! # API Surface
//!
//! - [`problem::StateSpace`] -- the predicate set a concrete world implements
//!   (membership, actions, transition, optional cost and predecessors)
//! - [`problem::PlanningProblem`] -- a validated `(space, initial, goals)`
//!   triple answering successor, predecessor, cost and goal queries
//! - [`proof::canon::canonical_json_bytes`] and [`proof::hash::canonical_hash`]
//!   -- the single canonicalizer used for run digests
//!
//! # Module Dependency Direction
//!
//! `problem` and `proof` are independent. Nothing in the kernel knows about
//! frontiers or search engines.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod problem;
pub mod proof;

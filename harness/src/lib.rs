//! Wayfinder Harness: concrete worlds and run orchestration for the search engine.
//!
//! The harness owns everything around a search: the example worlds, the run
//! policy, the chunked JSON event log and its replay side.
//!
//! The harness does NOT implement search logic. It builds a frontier from the
//! policy, hands it to [`wayfinder_search::SearchEngine`], and records what
//! the engine reports.
//!
//! # Modules
//!
//! - [`worlds`] -- grid, weighted graph and hill-climber state spaces
//! - [`policy`] -- [`policy::RunPolicy`], loaded from JSON and content-hashed
//! - [`runner`] -- [`runner::run_search`], producing a [`runner::RunReport`]
//! - [`observer`] -- search events rendered as JSON for any [`observer::EventSink`]
//! - [`event_log`] -- pretty JSON array log with line-count rotation
//! - [`event_replay`] -- reading a rotated log back and dispatching it

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod event_log;
pub mod event_replay;
pub mod observer;
pub mod policy;
pub mod runner;
pub mod worlds;

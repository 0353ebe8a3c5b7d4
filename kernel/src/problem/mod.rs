//! Problem definition: the state-space capability trait and the validated
//! planning problem built on top of it.

pub mod error;
pub mod planning;
pub mod space;

pub use error::ProblemError;
pub use planning::PlanningProblem;
pub use space::StateSpace;

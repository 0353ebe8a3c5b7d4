//! `PlanningProblem`: a validated state space with an initial state and goal set.

use std::collections::HashSet;

use crate::problem::error::{detail, ProblemError};
use crate::problem::space::StateSpace;

/// A discrete planning problem: a [`StateSpace`], an initial state, and a set
/// of goal states.
///
/// The initial state and every goal are checked against the membership
/// predicate at construction. Queries validate their inputs on every call;
/// nothing is cached.
#[derive(Debug, Clone)]
pub struct PlanningProblem<P: StateSpace> {
    space: P,
    initial: P::State,
    goals: HashSet<P::State>,
}

impl<P: StateSpace> PlanningProblem<P> {
    /// Build a problem, validating `initial` and `goals` against `space`.
    ///
    /// Goals are validated in iteration order; the first offender is reported.
    ///
    /// # Errors
    ///
    /// - [`ProblemError::InvalidInitialState`] if `initial` is not in the space.
    /// - [`ProblemError::InvalidGoalState`] if any goal is not in the space.
    pub fn new(
        space: P,
        initial: P::State,
        goals: impl IntoIterator<Item = P::State>,
    ) -> Result<Self, ProblemError> {
        if !space.contains(&initial) {
            return Err(ProblemError::InvalidInitialState {
                detail: detail(&initial),
            });
        }
        let mut goal_set = HashSet::new();
        for goal in goals {
            if !space.contains(&goal) {
                return Err(ProblemError::InvalidGoalState {
                    detail: detail(&goal),
                });
            }
            goal_set.insert(goal);
        }
        Ok(Self {
            space,
            initial,
            goals: goal_set,
        })
    }

    /// The underlying state space.
    #[must_use]
    pub fn space(&self) -> &P {
        &self.space
    }

    /// The initial state.
    #[must_use]
    pub fn initial_state(&self) -> &P::State {
        &self.initial
    }

    /// The goal set.
    #[must_use]
    pub fn goal_states(&self) -> &HashSet<P::State> {
        &self.goals
    }

    /// Replace the goal set.
    ///
    /// The new goals are NOT validated against the membership predicate; a
    /// goal outside the space is simply unreachable.
    pub fn set_goal_states(&mut self, goals: impl IntoIterator<Item = P::State>) {
        self.goals = goals.into_iter().collect();
    }

    /// Union of all action sets, if the space provides it.
    #[must_use]
    pub fn action_space(&self) -> Option<Vec<P::Action>> {
        self.space.action_space()
    }

    /// Whether the space defines a cost function.
    #[must_use]
    pub fn has_cost_function(&self) -> bool {
        self.space.has_cost_function()
    }

    /// Goal test. Pure set membership; `state` is not checked against the space.
    #[must_use]
    pub fn is_goal(&self, state: &P::State) -> bool {
        self.goals.contains(state)
    }

    /// The states reachable from `state` in one step, in action order.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::StateNotInSpace`] if `state` fails membership.
    pub fn successors(&self, state: &P::State) -> Result<Vec<P::State>, ProblemError> {
        self.ensure_member(state)?;
        Ok(self
            .space
            .actions(state)
            .iter()
            .map(|action| self.space.transition(state, action))
            .collect())
    }

    /// `(action, successor)` pairs for `state`, in action order.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::StateNotInSpace`] if `state` fails membership.
    pub fn transitions(&self, state: &P::State) -> Result<Vec<(P::Action, P::State)>, ProblemError> {
        self.ensure_member(state)?;
        Ok(self
            .space
            .actions(state)
            .into_iter()
            .map(|action| {
                let next = self.space.transition(state, &action);
                (action, next)
            })
            .collect())
    }

    /// The states with a one-step transition into `state`.
    ///
    /// # Errors
    ///
    /// - [`ProblemError::StateNotInSpace`] if `state` fails membership.
    /// - [`ProblemError::PredecessorUndefined`] if the space has no predecessor function.
    pub fn predecessors(&self, state: &P::State) -> Result<Vec<P::State>, ProblemError> {
        self.ensure_member(state)?;
        let pairs = self
            .space
            .predecessors(state)
            .ok_or(ProblemError::PredecessorUndefined)?;
        Ok(pairs.into_iter().map(|(pred, _action)| pred).collect())
    }

    /// Validated cost of applying `action` in `state`.
    ///
    /// # Errors
    ///
    /// - [`ProblemError::StateNotInSpace`] if `state` fails membership.
    /// - [`ProblemError::ActionNotAvailable`] if `action` is not in `state`'s action set.
    /// - [`ProblemError::CostUndefined`] if the space has no cost function.
    /// - [`ProblemError::InvalidCostValue`] if the cost is negative, NaN or infinite.
    pub fn cost(&self, state: &P::State, action: &P::Action) -> Result<f64, ProblemError> {
        self.ensure_member(state)?;
        if !self.space.actions(state).contains(action) {
            return Err(ProblemError::ActionNotAvailable {
                state: detail(state),
                action: detail(action),
            });
        }
        self.checked_step_cost(state, action)
    }

    /// Cheapest single-step cost of moving from `from` to `to`.
    ///
    /// Returns `Ok(None)` when `to` is not a one-step successor of `from`.
    ///
    /// # Errors
    ///
    /// Propagates membership and cost-function errors from [`Self::cost`].
    pub fn transition_cost(
        &self,
        from: &P::State,
        to: &P::State,
    ) -> Result<Option<f64>, ProblemError> {
        let mut best: Option<f64> = None;
        for (action, next) in self.transitions(from)? {
            if &next != to {
                continue;
            }
            let cost = self.checked_step_cost(from, &action)?;
            best = Some(best.map_or(cost, |b| b.min(cost)));
        }
        Ok(best)
    }

    /// Cost lookup for an action already known to belong to `state`'s action set.
    ///
    /// The engine calls this on actions it just enumerated, so the membership
    /// and availability checks of [`Self::cost`] are skipped.
    ///
    /// # Errors
    ///
    /// [`ProblemError::CostUndefined`] or [`ProblemError::InvalidCostValue`].
    pub fn checked_step_cost(
        &self,
        state: &P::State,
        action: &P::Action,
    ) -> Result<f64, ProblemError> {
        let value = self
            .space
            .step_cost(state, action)
            .ok_or(ProblemError::CostUndefined)?;
        if !value.is_finite() || value < 0.0 {
            return Err(ProblemError::InvalidCostValue {
                state: detail(state),
                action: detail(action),
                value,
            });
        }
        Ok(value)
    }

    fn ensure_member(&self, state: &P::State) -> Result<(), ProblemError> {
        if self.space.contains(state) {
            Ok(())
        } else {
            Err(ProblemError::StateNotInSpace {
                detail: detail(state),
            })
        }
    }
}

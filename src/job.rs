//! Scheduled jobs
//!
//! A job pairs a termination-style expression with a state callback that
//! fires whenever the expression holds at the end of a cycle.

use crate::error::EvoResult;
use crate::expression::Expression;
use crate::state::EvolutionState;

/// The side effect a job runs when its expression holds
pub type JobAction = Box<dyn FnMut(&mut EvolutionState) + Send + Sync>;

/// A conditional callback evaluated once per cycle
pub struct Job {
    expression: Expression,
    action: JobAction,
}

impl Job {
    /// Create a job from an expression and a callback
    pub fn new<F>(expression: Expression, action: F) -> Self
    where
        F: FnMut(&mut EvolutionState) + Send + Sync + 'static,
    {
        Self {
            expression,
            action: Box::new(action),
        }
    }

    /// Replace the callback, keeping the expression
    pub fn set_callback<F>(&mut self, action: F)
    where
        F: FnMut(&mut EvolutionState) + Send + Sync + 'static,
    {
        self.action = Box::new(action);
    }

    /// Evaluate the expression and fire the callback when it holds
    pub fn handle(&mut self, state: &mut EvolutionState) -> EvoResult<()> {
        if self.expression.evaluate(state)? {
            (self.action)(state);
        }
        Ok(())
    }
}

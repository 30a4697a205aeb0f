//! Built-in termination conditions

use crate::error::EvoResult;
use crate::expression::Condition;
use crate::state::EvolutionState;

/// True once the generation that completes `max_epoch` cycles is running.
///
/// Termination is checked before the epoch counter advances, so a limit of
/// 5 runs exactly 5 full cycles.
#[derive(Clone, Debug)]
pub struct EpochCondition {
    /// Number of full cycles to run
    pub max_epoch: usize,
}

impl EpochCondition {
    /// Create a new epoch limit
    pub fn new(max_epoch: usize) -> Self {
        assert!(max_epoch > 0, "Epoch limit must be positive");
        Self { max_epoch }
    }
}

impl Condition for EpochCondition {
    fn evaluate(&self, state: &EvolutionState) -> EvoResult<bool> {
        Ok(state.current_epoch + 1 >= self.max_epoch)
    }
}

/// True once the best fitness reaches a threshold.
///
/// Direction-aware: when maximizing, best >= threshold; when minimizing,
/// best <= threshold. Never true while no individual is evaluated.
#[derive(Clone, Debug)]
pub struct FitnessThresholdCondition {
    /// The fitness level that ends the run
    pub threshold: f64,
}

impl FitnessThresholdCondition {
    /// Create a new fitness threshold
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Condition for FitnessThresholdCondition {
    fn evaluate(&self, state: &EvolutionState) -> EvoResult<bool> {
        Ok(match state.best_fitness() {
            Some(best) if state.maximize => best >= self.threshold,
            Some(best) => best <= self.threshold,
            None => false,
        })
    }
}

/// Adapter turning any closure over the state into a condition
pub struct FnCondition {
    predicate: Box<dyn Fn(&EvolutionState) -> bool + Send + Sync>,
}

impl FnCondition {
    /// Wrap a closure as a condition
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&EvolutionState) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
        }
    }
}

impl Condition for FnCondition {
    fn evaluate(&self, state: &EvolutionState) -> EvoResult<bool> {
        Ok((self.predicate)(state))
    }
}

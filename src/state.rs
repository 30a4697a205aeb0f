//! Evolution state
//!
//! The single mutable record threaded through every cycle stage, every
//! termination condition and every listener.

use serde::{Deserialize, Serialize};

use crate::population::individual::Individual;
use crate::population::population::Population;

/// Snapshot of an evolution run between and during cycles.
///
/// `selected_population` and `new_population` are staging slots that are
/// only populated mid-cycle; between cycles both are `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvolutionState {
    /// The population the next cycle starts from
    pub current_population: Population,
    /// Reproduction candidates, set after selection within a cycle
    pub selected_population: Option<Population>,
    /// The offspring generation being built within a cycle
    pub new_population: Option<Population>,
    /// Optimization direction (true = higher fitness wins)
    pub maximize: bool,
    /// Steady population size the engine maintains across cycles
    pub population_size: usize,
    /// Number of completed cycles
    pub current_epoch: usize,
}

impl EvolutionState {
    /// Create the initial state for a run
    pub fn new(initial_population: Population, population_size: usize, maximize: bool) -> Self {
        Self {
            current_population: initial_population,
            selected_population: None,
            new_population: None,
            maximize,
            population_size,
            current_epoch: 0,
        }
    }

    /// The best evaluated individual of the current population, if any
    pub fn best_individual(&self) -> Option<&Individual> {
        self.current_population.best(self.maximize)
    }

    /// The fitness of the best evaluated individual, if any
    pub fn best_fitness(&self) -> Option<f64> {
        self.best_individual().and_then(|i| i.fitness)
    }

    /// Commit the end of a cycle.
    ///
    /// Promotes `new_population` to current when one was produced, clears
    /// both staging slots and advances the epoch counter. The epoch always
    /// advances, even when no new population was staged.
    pub fn update_evolution_state(&mut self) {
        if let Some(new_population) = self.new_population.take() {
            self.current_population = new_population;
        }
        self.selected_population = None;
        self.current_epoch += 1;
    }
}

//! Fitness evaluation
//!
//! Wraps a caller-supplied scalar objective together with the per-gene
//! variable domains and a clamp strategy.

use crate::clamp::{ClampStrategy, HardClamp};
use crate::domain::VariableDomains;
use crate::population::individual::Individual;
use crate::population::population::Population;

/// The caller-supplied scalar objective over a chromosome
pub type Objective = Box<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// Evaluates individuals of a population against a scalar objective.
///
/// `evaluate_population` is the only sanctioned way stale fitness becomes
/// fresh; callers must invoke it after any mutation and before relying on
/// cached fitness values. The engine never caches across chromosome edits.
pub struct FitnessFunction {
    objective: Objective,
    domains: VariableDomains,
    clamp_strategy: Box<dyn ClampStrategy>,
}

impl FitnessFunction {
    /// Create a fitness function with the default hard-clip clamp strategy
    pub fn new<F>(objective: F, domains: VariableDomains) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self {
            objective: Box::new(objective),
            domains,
            clamp_strategy: Box::new(HardClamp),
        }
    }

    /// Replace the clamp strategy
    pub fn with_clamp_strategy<C: ClampStrategy + 'static>(mut self, strategy: C) -> Self {
        self.clamp_strategy = Box::new(strategy);
        self
    }

    /// The variable domains this objective is defined over
    pub fn domains(&self) -> &VariableDomains {
        &self.domains
    }

    /// Evaluate a single individual.
    ///
    /// Pure: does not store the result in the individual.
    pub fn evaluate(&self, individual: &Individual) -> f64 {
        (self.objective)(&individual.chromosome)
    }

    /// Evaluate the whole population, storing each result in place
    pub fn evaluate_population(&self, population: &mut Population) {
        for individual in population.iter_mut() {
            let value = (self.objective)(&individual.chromosome);
            individual.set_fitness(value);
        }
    }

    /// Evaluate the whole population without mutating it.
    ///
    /// Results are returned in population order.
    pub fn evaluate_all(&self, population: &Population) -> Vec<f64> {
        population
            .iter()
            .map(|i| (self.objective)(&i.chromosome))
            .collect()
    }

    /// Force every chromosome back into its domain, in place
    pub fn clamp_population(&self, population: &mut Population) {
        self.clamp_strategy.clamp(&self.domains, population);
    }
}

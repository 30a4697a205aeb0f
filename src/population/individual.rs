//! Individual type
//!
//! A single candidate solution: a chromosome plus its cached fitness.

use serde::{Deserialize, Serialize};

/// An individual in the population
///
/// The fitness is `None` until the individual has been evaluated, and is
/// invalidated again whenever an operator edits the chromosome. The cached
/// value may only be trusted immediately after an evaluation pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    /// Ordered sequence of genes encoding the candidate solution
    pub chromosome: Vec<f64>,
    /// Cached fitness value (`None` if stale or not yet evaluated)
    pub fitness: Option<f64>,
}

impl Individual {
    /// Create a new, unevaluated individual
    pub fn new(chromosome: Vec<f64>) -> Self {
        Self {
            chromosome,
            fitness: None,
        }
    }

    /// Create an individual with a known fitness
    pub fn with_fitness(chromosome: Vec<f64>, fitness: f64) -> Self {
        Self {
            chromosome,
            fitness: Some(fitness),
        }
    }

    /// Number of genes in the chromosome
    pub fn chromosome_length(&self) -> usize {
        self.chromosome.len()
    }

    /// Check if this individual has a fresh fitness value
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Get the fitness value, panicking if the individual is unevaluated
    pub fn fitness_value(&self) -> f64 {
        self.fitness.expect("Individual has not been evaluated")
    }

    /// Set the fitness value
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Mark the cached fitness as stale
    pub fn invalidate(&mut self) {
        self.fitness = None;
    }

    /// Check if this individual outranks another under the given direction.
    ///
    /// Unevaluated individuals always lose to evaluated ones.
    pub fn is_better_than(&self, other: &Self, maximize: bool) -> bool {
        match (self.fitness, other.fitness) {
            (Some(a), Some(b)) => {
                if maximize {
                    a > b
                } else {
                    a < b
                }
            }
            (Some(_), None) => true,
            _ => false,
        }
    }
}

//! Elitism operators

use crate::error::EvoResult;
use crate::operators::traits::Elitism;
use crate::population::population::Population;

/// Keeps the `count` best individuals of the generation.
///
/// Asking for more elites than the population holds yields the whole
/// population, best first.
#[derive(Clone, Debug)]
pub struct TopNElitism {
    /// Number of individuals carried over unmodified
    pub count: usize,
}

impl TopNElitism {
    /// Create a new top-N elitism
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

impl Elitism for TopNElitism {
    fn perform_elitism(&self, population: &Population, maximize: bool) -> EvoResult<Population> {
        let mut ranked = population.clone();
        ranked.sort_by_fitness(maximize);
        ranked.trim(self.count);
        Ok(ranked)
    }
}

/// Elitism that carries nothing over
#[derive(Clone, Debug, Default)]
pub struct NoElitism;

impl Elitism for NoElitism {
    fn perform_elitism(&self, _population: &Population, _maximize: bool) -> EvoResult<Population> {
        Ok(Population::new())
    }
}

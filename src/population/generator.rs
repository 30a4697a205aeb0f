//! Population generators
//!
//! The external boundary that produces the initial population. A generator
//! is invoked exactly once, at construction time.

use rand::RngCore;

use crate::domain::VariableDomains;
use crate::population::individual::Individual;
use crate::population::population::Population;

/// A callable producing an initial population.
///
/// Receives the target population size, the chromosome length and the
/// per-gene domains. Randomness comes from the engine's seeded source.
pub type PopulationGenerator =
    Box<dyn Fn(usize, usize, &VariableDomains, &mut dyn RngCore) -> Population + Send + Sync>;

/// Generate a population of uniform random real-valued chromosomes.
///
/// Each gene is drawn uniformly from its domain; gene positions beyond the
/// domain dimension fall back to the last domain, or [0, 1] when no domains
/// are given.
pub fn uniform_random_population(
    population_size: usize,
    individual_size: usize,
    domains: &VariableDomains,
    rng: &mut dyn RngCore,
) -> Population {
    let fallback = crate::domain::Domain::unit();
    (0..population_size)
        .map(|_| {
            let chromosome = (0..individual_size)
                .map(|i| {
                    let domain = domains
                        .get(i)
                        .or_else(|| domains.get(domains.dimension().wrapping_sub(1)))
                        .unwrap_or(&fallback);
                    domain.sample(rng)
                })
                .collect();
            Individual::new(chromosome)
        })
        .collect()
}

//! Mutation operators
//!
//! Real-valued perturbation policies behind the `Mutation` contract.

use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};

use crate::domain::{Domain, VariableDomains};
use crate::error::{EvoResult, EvolutionError};
use crate::operators::traits::Mutation;
use crate::population::individual::Individual;
use crate::population::population::Population;
use crate::representation::Representation;

fn domain_for(domains: &VariableDomains, index: usize) -> Domain {
    // Chromosomes longer than the domain list reuse the last domain.
    domains
        .get(index)
        .or_else(|| domains.domains.last())
        .copied()
        .unwrap_or_else(Domain::unit)
}

/// Uniform mutation
///
/// Resamples one randomly chosen gene uniformly from its domain.
#[derive(Clone, Debug)]
pub struct UniformMutation {
    /// Per-individual mutation probability
    pub probability: f64,
    /// Per-gene bounds used for resampling
    pub domains: VariableDomains,
}

impl UniformMutation {
    /// Create a new uniform mutation
    pub fn new(probability: f64, domains: VariableDomains) -> Self {
        Self {
            probability,
            domains,
        }
    }
}

impl Mutation for UniformMutation {
    fn mutate_individual(
        &self,
        individual: &mut Individual,
        _context: &Population,
        rng: &mut dyn RngCore,
    ) -> EvoResult<()> {
        let size = individual.chromosome_length();
        if size == 0 {
            return Ok(());
        }
        let index = rng.gen_range(0..size);
        individual.chromosome[index] = domain_for(&self.domains, index).sample(rng);
        Ok(())
    }

    fn probability(&self) -> f64 {
        self.probability
    }

    fn allowed_representations(&self) -> &'static [Representation] {
        &[Representation::Real]
    }
}

/// Boundary mutation
///
/// Flips each gene, independently with probability `boundary_probability`,
/// to one of its domain bounds (each bound equally likely).
#[derive(Clone, Debug)]
pub struct BoundaryMutation {
    /// Per-individual mutation probability
    pub probability: f64,
    /// Per-gene probability of snapping to a bound
    pub boundary_probability: f64,
    /// Per-gene bounds
    pub domains: VariableDomains,
}

impl BoundaryMutation {
    /// Create a new boundary mutation
    pub fn new(probability: f64, boundary_probability: f64, domains: VariableDomains) -> Self {
        Self {
            probability,
            boundary_probability,
            domains,
        }
    }
}

impl Mutation for BoundaryMutation {
    fn mutate_individual(
        &self,
        individual: &mut Individual,
        _context: &Population,
        rng: &mut dyn RngCore,
    ) -> EvoResult<()> {
        for (index, gene) in individual.chromosome.iter_mut().enumerate() {
            if rng.gen::<f64>() < self.boundary_probability {
                let domain = domain_for(&self.domains, index);
                *gene = if rng.gen::<bool>() {
                    domain.high
                } else {
                    domain.low
                };
            }
        }
        Ok(())
    }

    fn probability(&self) -> f64 {
        self.probability
    }

    fn allowed_representations(&self) -> &'static [Representation] {
        &[Representation::Real]
    }
}

/// Gaussian mutation
///
/// Adds zero-mean Gaussian noise with standard deviation `sigma` to every
/// gene. Out-of-domain results are left for the clamp strategy.
#[derive(Clone, Debug)]
pub struct GaussianMutation {
    /// Per-individual mutation probability
    pub probability: f64,
    /// Standard deviation of the additive noise
    pub sigma: f64,
}

impl GaussianMutation {
    /// Create a new Gaussian mutation
    pub fn new(probability: f64, sigma: f64) -> Self {
        assert!(sigma > 0.0, "Sigma must be positive");
        Self { probability, sigma }
    }
}

impl Mutation for GaussianMutation {
    fn mutate_individual(
        &self,
        individual: &mut Individual,
        _context: &Population,
        rng: &mut dyn RngCore,
    ) -> EvoResult<()> {
        let normal = Normal::new(0.0, self.sigma)
            .map_err(|_| EvolutionError::Configuration("sigma must be positive and finite".into()))?;
        for gene in &mut individual.chromosome {
            *gene += normal.sample(rng);
        }
        Ok(())
    }

    fn probability(&self) -> f64 {
        self.probability
    }

    fn allowed_representations(&self) -> &'static [Representation] {
        &[Representation::Real]
    }
}

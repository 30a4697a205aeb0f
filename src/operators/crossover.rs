//! Crossover operators
//!
//! Real-valued recombination policies behind the `Crossover` contract.

use rand::{Rng, RngCore};

use crate::error::{EvoResult, EvolutionError};
use crate::operators::traits::Crossover;
use crate::population::individual::Individual;
use crate::population::population::Population;
use crate::representation::Representation;

/// Pick two distinct parent indices uniformly at random
fn distinct_parents(count: usize, rng: &mut dyn RngCore) -> EvoResult<(usize, usize)> {
    if count < 2 {
        return Err(EvolutionError::PopulationTooSmall {
            operator: "Crossover",
            required: 2,
            actual: count,
        });
    }
    let first = rng.gen_range(0..count);
    let mut second = rng.gen_range(0..count);
    while second == first {
        second = rng.gen_range(0..count);
    }
    Ok((first, second))
}

/// Blend crossover (BLX-α)
///
/// Each child gene is drawn uniformly from the interval spanned by the two
/// parent genes, widened by `alpha` times their distance on both sides.
///
/// Gwiazda, T. (2006). Genetic Algorithms Compendium vol. I, crossover
/// operators for numerical problems.
#[derive(Clone, Debug)]
pub struct BlendCrossover {
    /// Number of offspring delivered per `cross` call
    pub how_many_individuals: usize,
    /// Per-attempt crossover probability
    pub probability: f64,
    /// Blend widening factor; positive, typically well below 1
    pub alpha: f64,
}

impl BlendCrossover {
    /// Create a new blend crossover
    pub fn new(how_many_individuals: usize, probability: f64, alpha: f64) -> Self {
        assert!(alpha > 0.0, "The alpha parameter must be positive");
        Self {
            how_many_individuals,
            probability,
            alpha,
        }
    }
}

impl Crossover for BlendCrossover {
    fn recombine(&self, parents: &Population, rng: &mut dyn RngCore) -> EvoResult<Population> {
        let (first, second) = distinct_parents(parents.population_size(), rng)?;
        let parent_x = &parents[first].chromosome;
        let parent_y = &parents[second].chromosome;

        let blend = |rng: &mut dyn RngCore| {
            let chromosome = parent_x
                .iter()
                .zip(parent_y.iter())
                .map(|(&g1, &g2)| {
                    let delta = (g1 - g2).abs() * self.alpha;
                    let low = g1.min(g2) - delta;
                    let high = g1.max(g2) + delta;
                    if high > low {
                        rng.gen_range(low..high)
                    } else {
                        low
                    }
                })
                .collect();
            Individual::new(chromosome)
        };

        let child1 = blend(&mut *rng);
        let child2 = blend(&mut *rng);
        Ok(Population::from_individuals(vec![child1, child2]))
    }

    fn how_many_individuals(&self) -> usize {
        self.how_many_individuals
    }

    fn probability(&self) -> f64 {
        self.probability
    }

    fn allowed_representations(&self) -> &'static [Representation] {
        &[Representation::Real]
    }
}

/// One-point average crossover (1-PAX)
///
/// Copies both parents and replaces the gene at one random position with
/// the parents' average at that position.
#[derive(Clone, Debug)]
pub struct OnePointAverageCrossover {
    /// Number of offspring delivered per `cross` call
    pub how_many_individuals: usize,
    /// Per-attempt crossover probability
    pub probability: f64,
}

impl OnePointAverageCrossover {
    /// Create a new one-point average crossover
    pub fn new(how_many_individuals: usize, probability: f64) -> Self {
        Self {
            how_many_individuals,
            probability,
        }
    }
}

impl Crossover for OnePointAverageCrossover {
    fn recombine(&self, parents: &Population, rng: &mut dyn RngCore) -> EvoResult<Population> {
        let (first, second) = distinct_parents(parents.population_size(), rng)?;
        let parent_x = &parents[first].chromosome;
        let parent_y = &parents[second].chromosome;

        let mut child_x = parent_x.clone();
        let mut child_y = parent_y.clone();

        let size = parent_x.len().min(parent_y.len());
        if size > 0 {
            let point = rng.gen_range(0..size);
            let average = (parent_x[point] + parent_y[point]) / 2.0;
            child_x[point] = average;
            child_y[point] = average;
        }

        Ok(Population::from_individuals(vec![
            Individual::new(child_x),
            Individual::new(child_y),
        ]))
    }

    fn how_many_individuals(&self) -> usize {
        self.how_many_individuals
    }

    fn probability(&self) -> f64 {
        self.probability
    }

    fn allowed_representations(&self) -> &'static [Representation] {
        &[Representation::Real]
    }
}

/// Arithmetic crossover
///
/// Children are complementary convex combinations of the parents with a
/// random mixing coefficient per attempt.
#[derive(Clone, Debug)]
pub struct ArithmeticCrossover {
    /// Number of offspring delivered per `cross` call
    pub how_many_individuals: usize,
    /// Per-attempt crossover probability
    pub probability: f64,
}

impl ArithmeticCrossover {
    /// Create a new arithmetic crossover
    pub fn new(how_many_individuals: usize, probability: f64) -> Self {
        Self {
            how_many_individuals,
            probability,
        }
    }
}

impl Crossover for ArithmeticCrossover {
    fn recombine(&self, parents: &Population, rng: &mut dyn RngCore) -> EvoResult<Population> {
        let (first, second) = distinct_parents(parents.population_size(), rng)?;
        let parent_x = &parents[first].chromosome;
        let parent_y = &parents[second].chromosome;

        let lambda: f64 = rng.gen();
        let child1: Vec<f64> = parent_x
            .iter()
            .zip(parent_y.iter())
            .map(|(&g1, &g2)| lambda * g1 + (1.0 - lambda) * g2)
            .collect();
        let child2: Vec<f64> = parent_x
            .iter()
            .zip(parent_y.iter())
            .map(|(&g1, &g2)| (1.0 - lambda) * g1 + lambda * g2)
            .collect();

        Ok(Population::from_individuals(vec![
            Individual::new(child1),
            Individual::new(child2),
        ]))
    }

    fn how_many_individuals(&self) -> usize {
        self.how_many_individuals
    }

    fn probability(&self) -> f64 {
        self.probability
    }

    fn allowed_representations(&self) -> &'static [Representation] {
        &[Representation::Real]
    }
}

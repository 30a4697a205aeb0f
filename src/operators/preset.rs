//! Operator presets
//!
//! Ready-made operator bundles for callers who do not want to wire every
//! stage by hand.

use crate::domain::VariableDomains;
use crate::operators::crossover::BlendCrossover;
use crate::operators::mutation::UniformMutation;
use crate::operators::selection::TournamentSelection;
use crate::operators::traits::{Crossover, Mutation, Selection};

/// A matched selection/crossover/mutation triple
pub struct OperatorsPreset {
    /// Selection stage
    pub selection: Box<dyn Selection>,
    /// Crossover stage
    pub crossover: Box<dyn Crossover>,
    /// Mutation stage
    pub mutation: Box<dyn Mutation>,
}

impl OperatorsPreset {
    /// Assemble a preset from explicit operators
    pub fn new(
        selection: Box<dyn Selection>,
        crossover: Box<dyn Crossover>,
        mutation: Box<dyn Mutation>,
    ) -> Self {
        Self {
            selection,
            crossover,
            mutation,
        }
    }

    /// A sensible real-valued default: binary tournament, blend crossover
    /// and single-gene uniform mutation over the given domains.
    pub fn real_valued(population_size: usize, domains: &VariableDomains) -> Self {
        Self::new(
            Box::new(TournamentSelection::binary(population_size)),
            Box::new(BlendCrossover::new(population_size, 0.9, 0.1)),
            Box::new(UniformMutation::new(0.1, domains.clone())),
        )
    }
}

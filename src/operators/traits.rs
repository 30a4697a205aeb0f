//! Operator contracts
//!
//! Each contract pairs a provided entry point (the public gate: probability
//! gating, size reconciliation, precondition checks) with a required policy
//! hook. The engine only ever calls the entry points; concrete operators
//! only ever implement the hooks. All traits are object-safe so operators
//! can be swapped at run time.

use rand::{Rng, RngCore};

use crate::error::{EvoResult, EvolutionError};
use crate::population::individual::Individual;
use crate::population::population::Population;
use crate::representation::Representation;

/// Selection operator contract
///
/// Thins the current population and produces the set of reproduction
/// candidates.
pub trait Selection: Send + Sync {
    /// Ranking/sampling policy hook.
    ///
    /// Returns the selected set; must not mutate the input population.
    fn select_from(
        &self,
        population: &Population,
        maximize: bool,
        rng: &mut dyn RngCore,
    ) -> EvoResult<Population>;

    /// Size the input population is trimmed to after selection
    fn target_population(&self) -> usize;

    /// Representations this operator supports
    fn allowed_representations(&self) -> &'static [Representation] {
        Representation::ALL
    }

    /// Run the selection policy, then trim the *input* population to
    /// `target_population`.
    ///
    /// The dual effect — mutating the caller's population and returning a
    /// separately sized selected set — is contractual, not accidental.
    fn select(
        &self,
        population: &mut Population,
        maximize: bool,
        rng: &mut dyn RngCore,
    ) -> EvoResult<Population> {
        if population.is_empty() {
            return Err(EvolutionError::EmptyPopulation);
        }
        let selected = self.select_from(population, maximize, rng)?;
        population.trim(self.target_population());
        Ok(selected)
    }
}

/// Crossover operator contract
///
/// Consumes two or more parents per attempt and yields one or more
/// offspring.
pub trait Crossover: Send + Sync {
    /// Recombination policy hook.
    ///
    /// Each call draws parents from the given population and returns fresh,
    /// unevaluated offspring.
    fn recombine(&self, parents: &Population, rng: &mut dyn RngCore) -> EvoResult<Population>;

    /// Number of offspring the entry point delivers
    fn how_many_individuals(&self) -> usize;

    /// Per-attempt probability of applying the recombination hook
    fn probability(&self) -> f64;

    /// Representations this operator supports
    fn allowed_representations(&self) -> &'static [Representation] {
        Representation::ALL
    }

    /// Accumulate offspring until `how_many_individuals` is reached, then
    /// trim to exactly that count.
    ///
    /// Each attempt is gated by `probability`; a failed gate copies a
    /// random parent pair through unchanged, so a zero probability still
    /// terminates.
    fn cross(&self, parents: &Population, rng: &mut dyn RngCore) -> EvoResult<Population> {
        let parent_count = parents.population_size();
        if parent_count < 2 {
            return Err(EvolutionError::PopulationTooSmall {
                operator: "Crossover",
                required: 2,
                actual: parent_count,
            });
        }

        let mut offspring = Population::with_capacity(self.how_many_individuals());
        while offspring.population_size() < self.how_many_individuals() {
            if rng.gen::<f64>() < self.probability() {
                offspring.add_population(self.recombine(parents, rng)?);
            } else {
                let first = rng.gen_range(0..parent_count);
                let mut second = rng.gen_range(0..parent_count);
                while second == first {
                    second = rng.gen_range(0..parent_count);
                }
                offspring.add_one(parents[first].clone());
                offspring.add_one(parents[second].clone());
            }
        }
        offspring.trim(self.how_many_individuals());
        Ok(offspring)
    }
}

/// Mutation operator contract
///
/// Edits chromosomes in place; never changes population size or identity.
pub trait Mutation: Send + Sync {
    /// Per-individual mutation hook.
    ///
    /// `context` is a snapshot of the population taken before the pass
    /// began, for policies that read other members.
    fn mutate_individual(
        &self,
        individual: &mut Individual,
        context: &Population,
        rng: &mut dyn RngCore,
    ) -> EvoResult<()>;

    /// Per-individual probability of applying the mutation hook
    fn probability(&self) -> f64;

    /// Representations this operator supports
    fn allowed_representations(&self) -> &'static [Representation] {
        Representation::ALL
    }

    /// Visit every individual and, independently with `probability`, apply
    /// the mutation hook. Mutated individuals have their cached fitness
    /// invalidated.
    fn mutate(&self, population: &mut Population, rng: &mut dyn RngCore) -> EvoResult<()> {
        if population.is_empty() {
            return Err(EvolutionError::EmptyPopulation);
        }
        let context = population.clone();
        for index in 0..population.population_size() {
            if rng.gen::<f64>() < self.probability() {
                if let Some(individual) = population.get_mut(index) {
                    self.mutate_individual(individual, &context, rng)?;
                    individual.invalidate();
                }
            }
        }
        Ok(())
    }
}

/// Elitism operator contract
///
/// Picks the survivors that bypass crossover and mutation entirely.
pub trait Elitism: Send + Sync {
    /// Survivor policy hook
    fn perform_elitism(&self, population: &Population, maximize: bool) -> EvoResult<Population>;

    /// Representations this operator supports
    fn allowed_representations(&self) -> &'static [Representation] {
        Representation::ALL
    }

    /// Select the subset carried over unmodified into the next generation
    fn choose_elitism(&self, population: &Population, maximize: bool) -> EvoResult<Population> {
        if population.is_empty() {
            return Err(EvolutionError::EmptyPopulation);
        }
        self.perform_elitism(population, maximize)
    }
}

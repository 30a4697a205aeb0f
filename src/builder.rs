//! Evolution builder
//!
//! Staged configuration for the engine. Every requirement is checked at
//! `create_evolution` time and missing pieces are reported together in a
//! single configuration error.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::VariableDomains;
use crate::error::{EvoResult, EvolutionError};
use crate::evolution::{ensure_supported, Evolution};
use crate::expression::conditions::EpochCondition;
use crate::expression::Expression;
use crate::fitness::FitnessFunction;
use crate::job::Job;
use crate::operators::elitism::TopNElitism;
use crate::operators::preset::OperatorsPreset;
use crate::operators::traits::{Crossover, Elitism, Mutation, Selection};
use crate::population::generator::PopulationGenerator;
use crate::representation::Representation;
use crate::state::EvolutionState;

/// Configures and assembles an [`Evolution`] engine.
///
/// Required: selection, crossover, mutation, fitness function, population
/// generator, positive population and individual sizes, a representation,
/// and either a terminator expression or a positive epoch limit.
#[derive(Default)]
pub struct EvolutionBuilder {
    selection: Option<Box<dyn Selection>>,
    crossover: Option<Box<dyn Crossover>>,
    mutation: Option<Box<dyn Mutation>>,
    elitism: Option<Box<dyn Elitism>>,
    fitness_function: Option<FitnessFunction>,
    population_generator: Option<PopulationGenerator>,
    generator_domains: Option<VariableDomains>,
    population_size: Option<usize>,
    individual_size: Option<usize>,
    representation: Option<Representation>,
    terminator: Option<Expression>,
    max_epoch: usize,
    maximize: bool,
    seed: Option<u64>,
    jobs: Vec<Job>,
}

impl EvolutionBuilder {
    /// Create an empty builder (maximization by default)
    pub fn new() -> Self {
        Self {
            maximize: true,
            ..Default::default()
        }
    }

    /// Set the selection operator
    pub fn with_selection<S: Selection + 'static>(mut self, selection: S) -> Self {
        self.selection = Some(Box::new(selection));
        self
    }

    /// Set the crossover operator
    pub fn with_crossover<C: Crossover + 'static>(mut self, crossover: C) -> Self {
        self.crossover = Some(Box::new(crossover));
        self
    }

    /// Set the mutation operator
    pub fn with_mutation<M: Mutation + 'static>(mut self, mutation: M) -> Self {
        self.mutation = Some(Box::new(mutation));
        self
    }

    /// Set the elitism operator (defaults to keeping the single best)
    pub fn with_elitism<E: Elitism + 'static>(mut self, elitism: E) -> Self {
        self.elitism = Some(Box::new(elitism));
        self
    }

    /// Set selection, crossover and mutation from a preset
    pub fn with_preset(mut self, preset: OperatorsPreset) -> Self {
        self.selection = Some(preset.selection);
        self.crossover = Some(preset.crossover);
        self.mutation = Some(preset.mutation);
        self
    }

    /// Set the fitness function
    pub fn with_fitness_function(mut self, fitness_function: FitnessFunction) -> Self {
        self.fitness_function = Some(fitness_function);
        self
    }

    /// Set the initial population generator
    pub fn with_population_generator<G>(mut self, generator: G) -> Self
    where
        G: Fn(usize, usize, &VariableDomains, &mut dyn rand::RngCore) -> crate::population::population::Population
            + Send
            + Sync
            + 'static,
    {
        self.population_generator = Some(Box::new(generator));
        self
    }

    /// Override the domains handed to the population generator.
    ///
    /// Defaults to the fitness function's domains.
    pub fn with_generator_domains(mut self, domains: VariableDomains) -> Self {
        self.generator_domains = Some(domains);
        self
    }

    /// Set the steady population size
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = Some(population_size);
        self
    }

    /// Set the chromosome length
    pub fn with_individual_size(mut self, individual_size: usize) -> Self {
        self.individual_size = Some(individual_size);
        self
    }

    /// Set the chromosome representation operators must support
    pub fn with_representation(mut self, representation: Representation) -> Self {
        self.representation = Some(representation);
        self
    }

    /// Set an explicit terminator expression
    pub fn with_terminator(mut self, terminator: Expression) -> Self {
        self.terminator = Some(terminator);
        self
    }

    /// Terminate after this many cycles (ignored when a terminator is set)
    pub fn with_max_epoch(mut self, max_epoch: usize) -> Self {
        self.max_epoch = max_epoch;
        self
    }

    /// Set the optimization direction
    pub fn with_maximize(mut self, maximize: bool) -> Self {
        self.maximize = maximize;
        self
    }

    /// Seed the engine RNG for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Append a job evaluated once per cycle
    pub fn with_job(mut self, job: Job) -> Self {
        self.jobs.push(job);
        self
    }

    /// Validate the configuration and assemble the engine.
    ///
    /// The population generator runs exactly once, here.
    pub fn create_evolution(self) -> EvoResult<Evolution> {
        let mut problems = Vec::new();
        if self.selection.is_none() {
            problems.push("selection operator is not set");
        }
        if self.crossover.is_none() {
            problems.push("crossover operator is not set");
        }
        if self.mutation.is_none() {
            problems.push("mutation operator is not set");
        }
        if self.fitness_function.is_none() {
            problems.push("fitness function is not set");
        }
        if self.population_generator.is_none() {
            problems.push("population generator is not set");
        }
        match self.population_size {
            None => problems.push("population size is not set"),
            Some(0) => problems.push("population size must be positive"),
            Some(_) => {}
        }
        match self.individual_size {
            None => problems.push("individual size is not set"),
            Some(0) => problems.push("individual size must be positive"),
            Some(_) => {}
        }
        if self.representation.is_none() {
            problems.push("representation is not set");
        }
        if self.terminator.is_none() && self.max_epoch == 0 {
            problems.push("either a terminator expression or a positive epoch limit is required");
        }
        if !problems.is_empty() {
            return Err(EvolutionError::Configuration(problems.join("; ")));
        }

        // All Nones were reported above.
        let selection = self.selection.ok_or_else(unreachable_config)?;
        let crossover = self.crossover.ok_or_else(unreachable_config)?;
        let mutation = self.mutation.ok_or_else(unreachable_config)?;
        let fitness_function = self.fitness_function.ok_or_else(unreachable_config)?;
        let generator = self.population_generator.ok_or_else(unreachable_config)?;
        let population_size = self.population_size.ok_or_else(unreachable_config)?;
        let individual_size = self.individual_size.ok_or_else(unreachable_config)?;
        let representation = self.representation.ok_or_else(unreachable_config)?;
        let elitism = self
            .elitism
            .unwrap_or_else(|| Box::new(TopNElitism::new(1)));

        ensure_supported(selection.allowed_representations(), representation, "Selection")?;
        ensure_supported(crossover.allowed_representations(), representation, "Crossover")?;
        ensure_supported(mutation.allowed_representations(), representation, "Mutation")?;
        ensure_supported(elitism.allowed_representations(), representation, "Elitism")?;

        let terminator = match self.terminator {
            Some(terminator) => terminator,
            None => Expression::new().begin(EpochCondition::new(self.max_epoch))?,
        };

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let domains = self
            .generator_domains
            .unwrap_or_else(|| fitness_function.domains().clone());
        let initial_population = generator(population_size, individual_size, &domains, &mut rng);
        let state = EvolutionState::new(initial_population, population_size, self.maximize);

        let mut evolution = Evolution::new(
            selection,
            crossover,
            mutation,
            elitism,
            fitness_function,
            terminator,
            representation,
            state,
            rng,
        );
        for job in self.jobs {
            evolution.add_job(job);
        }
        Ok(evolution)
    }
}

fn unreachable_config() -> EvolutionError {
    EvolutionError::Configuration("incomplete builder state".into())
}

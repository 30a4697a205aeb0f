//! # evoxide
//!
//! A composable evolutionary optimization engine.
//!
//! The engine runs a classic generational cycle over a population of
//! real-valued chromosomes: selection, crossover, mutation, fitness
//! evaluation, elitism, scheduled jobs and a termination check. Every
//! stage is a swappable trait object, so custom operators drop in next
//! to the built-in library.
//!
//! ## Quick start
//!
//! ```
//! use evoxide::prelude::*;
//!
//! let mut evolution = EvolutionBuilder::new()
//!     .with_selection(TournamentSelection::binary(20))
//!     .with_crossover(BlendCrossover::new(20, 0.9, 0.1))
//!     .with_mutation(GaussianMutation::new(0.1, 0.2))
//!     .with_fitness_function(FitnessFunction::new(
//!         |c| -c.iter().map(|g| g * g).sum::<f64>(),
//!         VariableDomains::symmetric(5.0, 4),
//!     ))
//!     .with_population_generator(uniform_random_population)
//!     .with_population_size(20)
//!     .with_individual_size(4)
//!     .with_representation(Representation::Real)
//!     .with_max_epoch(50)
//!     .with_seed(42)
//!     .create_evolution()
//!     .unwrap();
//!
//! evolution.run().unwrap();
//! let best = evolution.best_individual().unwrap();
//! assert!(best.fitness_value() > -50.0);
//! ```

pub mod builder;
pub mod clamp;
pub mod domain;
pub mod error;
pub mod evolution;
pub mod expression;
pub mod fitness;
pub mod job;
pub mod operators;
pub mod population;
pub mod representation;
pub mod state;

/// Common imports for typical usage
pub mod prelude {
    pub use crate::builder::EvolutionBuilder;
    pub use crate::clamp::{ClampStrategy, HardClamp, ReflectClamp, WrapClamp};
    pub use crate::domain::{Domain, VariableDomains};
    pub use crate::error::{EvoResult, EvolutionError, ExpressionError};
    pub use crate::evolution::{EventListenerType, Evolution, ListenerId};
    pub use crate::expression::prelude::*;
    pub use crate::fitness::FitnessFunction;
    pub use crate::job::Job;
    pub use crate::operators::prelude::*;
    pub use crate::population::prelude::*;
    pub use crate::representation::Representation;
    pub use crate::state::EvolutionState;
}

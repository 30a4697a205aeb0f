//! Evolution engine
//!
//! Drives the generation cycle: selection, crossover, mutation, fitness
//! evaluation, elitism, jobs and the termination check, firing registered
//! event listeners between stages.

use std::collections::HashMap;
use std::fmt;

use rand::rngs::StdRng;

use crate::error::{EvoResult, EvolutionError};
use crate::expression::Expression;
use crate::fitness::FitnessFunction;
use crate::job::Job;
use crate::operators::preset::OperatorsPreset;
use crate::operators::traits::{Crossover, Elitism, Mutation, Selection};
use crate::population::individual::Individual;
use crate::representation::Representation;
use crate::state::EvolutionState;

/// Reject an operator wired to a representation it does not support
pub(crate) fn ensure_supported(
    allowed: &[Representation],
    representation: Representation,
    operator: &'static str,
) -> EvoResult<()> {
    if allowed.contains(&representation) {
        Ok(())
    } else {
        Err(EvolutionError::RepresentationMismatch {
            operator,
            representation,
        })
    }
}

/// The lifecycle points listeners can attach to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventListenerType {
    /// Start of a cycle, before selection runs
    BeforeSelection,
    /// After selection, before crossover runs
    BeforeCrossover,
    /// After crossover, before mutation runs
    BeforeMutation,
    /// After mutation, before the offspring are clamped and evaluated
    BeforeFitnessFunction,
    /// After evaluation, before elites are merged in
    BeforeElitism,
    /// After elitism, before jobs run
    BeforeJob,
    /// After jobs, before the terminator is evaluated
    BeforeTerminateCheck,
    /// After the terminator was evaluated, before the state commits
    AfterTerminateCheck,
}

/// Handle returned by `add_event_listener`, used to remove the listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Observer callback fired at a lifecycle point
pub type EventCallback = Box<dyn FnMut(&EvolutionState) + Send + Sync>;

/// The evolution engine.
///
/// Owns one instance of each operator contract, the fitness function, the
/// job list, the terminator expression, the RNG and the evolving state.
/// Built through [`EvolutionBuilder`](crate::builder::EvolutionBuilder).
pub struct Evolution {
    selection: Box<dyn Selection>,
    crossover: Box<dyn Crossover>,
    mutation: Box<dyn Mutation>,
    elitism: Box<dyn Elitism>,
    fitness_function: FitnessFunction,
    terminator: Expression,
    representation: Representation,
    jobs: Vec<Job>,
    rng: StdRng,
    state: EvolutionState,
    listeners: HashMap<EventListenerType, Vec<(ListenerId, EventCallback)>>,
    next_listener_id: u64,
}

impl fmt::Debug for Evolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evolution")
            .field("representation", &self.representation)
            .field("state", &self.state)
            .field("jobs", &self.jobs.len())
            .finish_non_exhaustive()
    }
}

impl Evolution {
    /// Assemble an engine from its parts
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        selection: Box<dyn Selection>,
        crossover: Box<dyn Crossover>,
        mutation: Box<dyn Mutation>,
        elitism: Box<dyn Elitism>,
        fitness_function: FitnessFunction,
        terminator: Expression,
        representation: Representation,
        state: EvolutionState,
        rng: StdRng,
    ) -> Self {
        Self {
            selection,
            crossover,
            mutation,
            elitism,
            fitness_function,
            terminator,
            representation,
            jobs: Vec::new(),
            rng,
            state,
            listeners: HashMap::new(),
            next_listener_id: 0,
        }
    }

    /// The chromosome representation this engine was configured for
    pub fn representation(&self) -> Representation {
        self.representation
    }

    /// The current evolution state
    pub fn state(&self) -> &EvolutionState {
        &self.state
    }

    /// The best evaluated individual so far, if any
    pub fn best_individual(&self) -> Option<&Individual> {
        self.state.best_individual()
    }

    /// Swap the selection operator.
    ///
    /// Rejects operators that do not support the engine's representation.
    pub fn set_selection(&mut self, selection: Box<dyn Selection>) -> EvoResult<()> {
        ensure_supported(
            selection.allowed_representations(),
            self.representation,
            "Selection",
        )?;
        self.selection = selection;
        Ok(())
    }

    /// Swap the crossover operator.
    ///
    /// Rejects operators that do not support the engine's representation.
    pub fn set_crossover(&mut self, crossover: Box<dyn Crossover>) -> EvoResult<()> {
        ensure_supported(
            crossover.allowed_representations(),
            self.representation,
            "Crossover",
        )?;
        self.crossover = crossover;
        Ok(())
    }

    /// Swap the mutation operator.
    ///
    /// Rejects operators that do not support the engine's representation.
    pub fn set_mutation(&mut self, mutation: Box<dyn Mutation>) -> EvoResult<()> {
        ensure_supported(
            mutation.allowed_representations(),
            self.representation,
            "Mutation",
        )?;
        self.mutation = mutation;
        Ok(())
    }

    /// Swap the elitism operator.
    ///
    /// Rejects operators that do not support the engine's representation.
    pub fn set_elitism(&mut self, elitism: Box<dyn Elitism>) -> EvoResult<()> {
        ensure_supported(
            elitism.allowed_representations(),
            self.representation,
            "Elitism",
        )?;
        self.elitism = elitism;
        Ok(())
    }

    /// Swap selection, crossover and mutation in one step.
    ///
    /// The whole preset is validated against the engine's representation
    /// before any operator is replaced.
    pub fn use_preset(&mut self, preset: OperatorsPreset) -> EvoResult<()> {
        ensure_supported(
            preset.selection.allowed_representations(),
            self.representation,
            "Selection",
        )?;
        ensure_supported(
            preset.crossover.allowed_representations(),
            self.representation,
            "Crossover",
        )?;
        ensure_supported(
            preset.mutation.allowed_representations(),
            self.representation,
            "Mutation",
        )?;
        self.selection = preset.selection;
        self.crossover = preset.crossover;
        self.mutation = preset.mutation;
        Ok(())
    }

    /// Append a job evaluated once per cycle
    pub fn add_job(&mut self, job: Job) {
        self.jobs.push(job);
    }

    /// Register a listener at a lifecycle point.
    ///
    /// Listeners at the same point fire in registration order.
    pub fn add_event_listener<F>(&mut self, event: EventListenerType, callback: F) -> ListenerId
    where
        F: FnMut(&EvolutionState) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners
            .entry(event)
            .or_default()
            .push((id, Box::new(callback)));
        id
    }

    /// Remove a previously registered listener.
    ///
    /// Returns false when the handle is unknown.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        for callbacks in self.listeners.values_mut() {
            if let Some(position) = callbacks.iter().position(|(known, _)| *known == id) {
                let _ = callbacks.remove(position);
                return true;
            }
        }
        false
    }

    fn fire(&mut self, event: EventListenerType) {
        if let Some(callbacks) = self.listeners.get_mut(&event) {
            for (_, callback) in callbacks.iter_mut() {
                callback(&self.state);
            }
        }
    }

    /// Run one full generation cycle.
    ///
    /// Returns true when the terminator held during this cycle. The epoch
    /// counter advances on every call.
    pub fn step(&mut self) -> EvoResult<bool> {
        self.fire(EventListenerType::BeforeSelection);
        let selected = self.selection.select(
            &mut self.state.current_population,
            self.state.maximize,
            &mut self.rng,
        )?;
        self.state.selected_population = Some(selected);

        self.fire(EventListenerType::BeforeCrossover);
        let offspring = match &self.state.selected_population {
            Some(selected) => self.crossover.cross(selected, &mut self.rng)?,
            None => return Err(EvolutionError::EmptyPopulation),
        };
        self.state.new_population = Some(offspring);

        self.fire(EventListenerType::BeforeMutation);
        if let Some(new_population) = self.state.new_population.as_mut() {
            self.mutation.mutate(new_population, &mut self.rng)?;
        }

        self.fire(EventListenerType::BeforeFitnessFunction);
        if let Some(new_population) = self.state.new_population.as_mut() {
            self.fitness_function.clamp_population(new_population);
            self.fitness_function.evaluate_population(new_population);
        }

        self.fire(EventListenerType::BeforeElitism);
        let elites = self
            .elitism
            .choose_elitism(&self.state.current_population, self.state.maximize)?;
        if let Some(offspring) = self.state.new_population.take() {
            let mut merged = elites;
            merged.add_population(offspring);
            merged.trim(self.state.population_size);
            self.state.new_population = Some(merged);
        }

        self.fire(EventListenerType::BeforeJob);
        for job in &mut self.jobs {
            job.handle(&mut self.state)?;
        }

        self.fire(EventListenerType::BeforeTerminateCheck);
        let terminated = self.terminator.evaluate(&self.state)?;
        self.fire(EventListenerType::AfterTerminateCheck);

        self.state.update_evolution_state();
        Ok(terminated)
    }

    /// Run cycles until the terminator holds.
    ///
    /// The initial population is clamped and evaluated once before the
    /// first cycle.
    pub fn run(&mut self) -> EvoResult<()> {
        self.fitness_function
            .clamp_population(&mut self.state.current_population);
        self.fitness_function
            .evaluate_population(&mut self.state.current_population);
        while !self.step()? {}
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::EvolutionBuilder;
    use crate::domain::VariableDomains;
    use crate::expression::conditions::FnCondition;
    use crate::operators::crossover::{ArithmeticCrossover, BlendCrossover};
    use crate::operators::mutation::GaussianMutation;
    use crate::operators::selection::TournamentSelection;
    use crate::population::generator::uniform_random_population;
    use crate::population::population::Population;
    use crate::representation::Representation;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn sphere_engine(max_epoch: usize) -> Evolution {
        EvolutionBuilder::new()
            .with_selection(TournamentSelection::binary(8))
            .with_crossover(ArithmeticCrossover::new(8, 0.9))
            .with_mutation(GaussianMutation::new(0.2, 0.3))
            .with_fitness_function(FitnessFunction::new(
                |c| -c.iter().map(|g| g * g).sum::<f64>(),
                VariableDomains::symmetric(5.0, 3),
            ))
            .with_population_generator(uniform_random_population)
            .with_population_size(8)
            .with_individual_size(3)
            .with_representation(Representation::Real)
            .with_max_epoch(max_epoch)
            .with_seed(42)
            .create_evolution()
            .unwrap()
    }

    #[test]
    fn test_run_completes_and_keeps_population_size() {
        let mut evolution = sphere_engine(10);
        evolution.run().unwrap();
        assert_eq!(evolution.state().current_epoch, 10);
        assert_eq!(evolution.state().current_population.population_size(), 8);
        assert!(evolution.best_individual().is_some());
    }

    #[test]
    fn test_staging_slots_cleared_between_cycles() {
        let mut evolution = sphere_engine(3);
        evolution.run().unwrap();
        assert!(evolution.state().selected_population.is_none());
        assert!(evolution.state().new_population.is_none());
    }

    #[test]
    fn test_listeners_fire_in_registration_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut evolution = sphere_engine(1);
        for tag in ["first", "second"] {
            let order = Arc::clone(&order);
            evolution.add_event_listener(EventListenerType::BeforeSelection, move |_| {
                order.lock().unwrap().push(tag);
            });
        }

        evolution.run().unwrap();
        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_all_eight_events_fire_each_cycle() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut evolution = sphere_engine(2);
        let events = [
            EventListenerType::BeforeSelection,
            EventListenerType::BeforeCrossover,
            EventListenerType::BeforeMutation,
            EventListenerType::BeforeFitnessFunction,
            EventListenerType::BeforeElitism,
            EventListenerType::BeforeJob,
            EventListenerType::BeforeTerminateCheck,
            EventListenerType::AfterTerminateCheck,
        ];
        for event in events {
            let count = Arc::clone(&count);
            evolution.add_event_listener(event, move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            });
        }

        evolution.run().unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 16);
    }

    #[test]
    fn test_remove_event_listener() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut evolution = sphere_engine(1);
        let counter = Arc::clone(&count);
        let id = evolution.add_event_listener(EventListenerType::BeforeSelection, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(evolution.remove_event_listener(id));
        assert!(!evolution.remove_event_listener(id));
        evolution.run().unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_jobs_run_every_cycle_when_expression_holds() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut evolution = sphere_engine(4);
        let counter = Arc::clone(&count);
        let expression = Expression::new()
            .begin(FnCondition::new(|_| true))
            .unwrap();
        evolution.add_job(Job::new(expression, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        evolution.run().unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_operator_swap_between_runs() {
        let mut evolution = sphere_engine(2);
        evolution.run().unwrap();
        evolution
            .set_mutation(Box::new(GaussianMutation::new(0.5, 0.1)))
            .unwrap();
        evolution
            .set_selection(Box::new(TournamentSelection::new(8, 4)))
            .unwrap();
        // The epoch limit is already met, so the second run performs a
        // single cycle with the swapped operators and stops.
        evolution.run().unwrap();
        assert_eq!(evolution.state().current_epoch, 3);
    }

    struct CloneSelection {
        target: usize,
    }

    impl Selection for CloneSelection {
        fn select_from(
            &self,
            population: &Population,
            _maximize: bool,
            _rng: &mut dyn rand::RngCore,
        ) -> EvoResult<Population> {
            Ok(population.clone())
        }

        fn target_population(&self) -> usize {
            self.target
        }
    }

    struct PairCopyCrossover {
        how_many: usize,
    }

    impl Crossover for PairCopyCrossover {
        fn recombine(
            &self,
            parents: &Population,
            _rng: &mut dyn rand::RngCore,
        ) -> EvoResult<Population> {
            let mut pair = Population::with_capacity(2);
            pair.add_one(parents[0].clone());
            pair.add_one(parents[1].clone());
            Ok(pair)
        }

        fn how_many_individuals(&self) -> usize {
            self.how_many
        }

        fn probability(&self) -> f64 {
            1.0
        }
    }

    struct NoopMutation;

    impl Mutation for NoopMutation {
        fn mutate_individual(
            &self,
            _individual: &mut Individual,
            _context: &Population,
            _rng: &mut dyn rand::RngCore,
        ) -> EvoResult<()> {
            Ok(())
        }

        fn probability(&self) -> f64 {
            0.0
        }
    }

    fn permutation_engine() -> Evolution {
        EvolutionBuilder::new()
            .with_selection(CloneSelection { target: 4 })
            .with_crossover(PairCopyCrossover { how_many: 4 })
            .with_mutation(NoopMutation)
            .with_fitness_function(FitnessFunction::new(
                |c| c.iter().sum::<f64>(),
                VariableDomains::symmetric(5.0, 3),
            ))
            .with_population_generator(uniform_random_population)
            .with_population_size(4)
            .with_individual_size(3)
            .with_representation(Representation::Permutation)
            .with_max_epoch(1)
            .with_seed(5)
            .create_evolution()
            .unwrap()
    }

    #[test]
    fn test_swap_rejects_unsupported_representation() {
        let mut evolution = permutation_engine();

        // A real-valued crossover must not be wired into a permutation
        // engine after construction.
        let error = evolution
            .set_crossover(Box::new(BlendCrossover::new(4, 1.0, 0.1)))
            .unwrap_err();
        assert!(matches!(
            error,
            EvolutionError::RepresentationMismatch {
                operator: "Crossover",
                ..
            }
        ));
        let error = evolution
            .set_mutation(Box::new(GaussianMutation::new(0.5, 0.1)))
            .unwrap_err();
        assert!(matches!(
            error,
            EvolutionError::RepresentationMismatch {
                operator: "Mutation",
                ..
            }
        ));

        // The rejected swaps left the original wiring intact.
        evolution.run().unwrap();
        assert_eq!(evolution.state().current_epoch, 1);
    }

    #[test]
    fn test_use_preset_rejects_unsupported_representation() {
        let mut evolution = permutation_engine();
        let preset = OperatorsPreset::real_valued(4, &VariableDomains::symmetric(5.0, 3));
        assert!(matches!(
            evolution.use_preset(preset),
            Err(EvolutionError::RepresentationMismatch { .. })
        ));
    }

    #[test]
    fn test_compatible_swap_succeeds() {
        let mut evolution = permutation_engine();
        // Tournament selection supports every representation.
        evolution
            .set_selection(Box::new(TournamentSelection::binary(4)))
            .unwrap();
        evolution.run().unwrap();
    }

    #[test]
    fn test_engine_debug_output() {
        let evolution = sphere_engine(1);
        let rendered = format!("{:?}", evolution);
        assert!(rendered.contains("Evolution"));
        assert!(rendered.contains("representation"));
    }
}

//! End-to-end and property-based tests for the evolution engine.

use evoxide::prelude::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn sphere_fitness(dimension: usize) -> FitnessFunction {
    FitnessFunction::new(
        |c| -c.iter().map(|g| g * g).sum::<f64>(),
        VariableDomains::symmetric(5.0, dimension),
    )
}

fn sphere_builder(population_size: usize, max_epoch: usize) -> EvolutionBuilder {
    EvolutionBuilder::new()
        .with_selection(TournamentSelection::binary(population_size))
        .with_crossover(BlendCrossover::new(population_size, 0.9, 0.1))
        .with_mutation(GaussianMutation::new(0.2, 0.3))
        .with_fitness_function(sphere_fitness(3))
        .with_population_generator(uniform_random_population)
        .with_population_size(population_size)
        .with_individual_size(3)
        .with_representation(Representation::Real)
        .with_max_epoch(max_epoch)
}

struct Always(bool);

impl Condition for Always {
    fn evaluate(&self, _state: &EvolutionState) -> EvoResult<bool> {
        Ok(self.0)
    }
}

#[test]
fn epoch_limit_runs_exactly_that_many_cycles() {
    let mut evolution = sphere_builder(8, 5)
        .with_seed(1)
        .create_evolution()
        .unwrap();
    evolution.run().unwrap();
    assert_eq!(evolution.state().current_epoch, 5);
}

#[test]
fn four_individual_run_produces_fresh_offspring() {
    // Crossover probability 1.0, full-rate mutation and no elitism: every
    // member of the next generation is a freshly built, perturbed
    // chromosome rather than a surviving parent copy.
    let mut evolution = EvolutionBuilder::new()
        .with_selection(TournamentSelection::binary(4))
        .with_crossover(BlendCrossover::new(4, 1.0, 0.1))
        .with_mutation(GaussianMutation::new(1.0, 0.3))
        .with_elitism(NoElitism)
        .with_fitness_function(sphere_fitness(3))
        .with_population_generator(uniform_random_population)
        .with_population_size(4)
        .with_individual_size(3)
        .with_representation(Representation::Real)
        .with_max_epoch(1)
        .with_seed(2)
        .create_evolution()
        .unwrap();

    let initial: Vec<Vec<f64>> = evolution
        .state()
        .current_population
        .iter()
        .map(|i| i.chromosome.clone())
        .collect();

    evolution.run().unwrap();

    let current = &evolution.state().current_population;
    assert_eq!(current.population_size(), 4);
    assert!(current.all_evaluated());
    assert!(current.iter().all(|i| !initial.contains(&i.chromosome)));
}

#[test]
fn best_fitness_never_degrades_with_elitism() {
    let mut evolution = sphere_builder(10, 20)
        .with_elitism(TopNElitism::new(1))
        .with_seed(3)
        .create_evolution()
        .unwrap();

    use std::sync::{Arc, Mutex};
    let history = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&history);
    evolution.add_event_listener(EventListenerType::BeforeSelection, move |state| {
        if let Some(best) = state.best_fitness() {
            recorder.lock().unwrap().push(best);
        }
    });

    evolution.run().unwrap();

    let history = history.lock().unwrap();
    assert!(history.len() >= 2);
    for window in history.windows(2) {
        assert!(window[1] >= window[0], "best fitness degraded: {:?}", window);
    }
}

#[test]
fn expression_chain_is_left_associative() {
    // a OR b AND c evaluates as (a OR b) AND c.
    let state = EvolutionState::new(Population::new(), 0, true);
    for a in [false, true] {
        for b in [false, true] {
            for c in [false, true] {
                let expr = Expression::new()
                    .begin(Always(a))
                    .unwrap()
                    .or_(Always(b))
                    .unwrap()
                    .and_(Always(c))
                    .unwrap();
                assert_eq!(expr.evaluate(&state).unwrap(), (a || b) && c);
            }
        }
    }
}

#[test]
fn empty_expression_is_an_error() {
    let state = EvolutionState::new(Population::new(), 0, true);
    assert!(matches!(
        Expression::new().evaluate(&state),
        Err(EvolutionError::Expression(ExpressionError::Empty))
    ));
}

#[test]
fn update_evolution_state_promotes_and_clears() {
    let current: Population = (0..3)
        .map(|i| Individual::with_fitness(vec![i as f64], i as f64))
        .collect();
    let staged: Population = (0..3)
        .map(|i| Individual::with_fitness(vec![i as f64], 10.0 + i as f64))
        .collect();

    let mut state = EvolutionState::new(current, 3, true);
    state.selected_population = Some(staged.clone());
    state.new_population = Some(staged);
    state.update_evolution_state();

    assert_eq!(state.current_epoch, 1);
    assert!(state.selected_population.is_none());
    assert!(state.new_population.is_none());
    assert_eq!(state.best_fitness(), Some(12.0));
}

proptest! {
    #[test]
    fn cross_always_delivers_requested_count(
        how_many in 1usize..20,
        parent_count in 2usize..10,
        probability in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let parents: Population = (0..parent_count)
            .map(|i| Individual::with_fitness(vec![i as f64, i as f64], i as f64))
            .collect();
        let crossover = ArithmeticCrossover::new(how_many, probability);
        let offspring = crossover.cross(&parents, &mut rng).unwrap();
        prop_assert_eq!(offspring.population_size(), how_many);
    }

    #[test]
    fn mutation_with_zero_probability_is_identity(
        genes in proptest::collection::vec(-100.0f64..100.0, 1..8),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pop = Population::from_individuals(vec![
            Individual::with_fitness(genes.clone(), 0.0),
        ]);
        let mutation = GaussianMutation::new(0.0, 1.0);
        mutation.mutate(&mut pop, &mut rng).unwrap();
        prop_assert_eq!(&pop[0].chromosome, &genes);
        prop_assert!(pop[0].is_evaluated());
    }

    #[test]
    fn clamping_is_idempotent(
        genes in proptest::collection::vec(-100.0f64..100.0, 1..8),
    ) {
        let domains = VariableDomains::symmetric(5.0, genes.len());
        let strategies: Vec<Box<dyn ClampStrategy>> = vec![
            Box::new(HardClamp),
            Box::new(ReflectClamp),
            Box::new(WrapClamp),
        ];
        for strategy in &strategies {
            let mut pop = Population::from_individuals(vec![Individual::new(genes.clone())]);
            strategy.clamp(&domains, &mut pop);
            let once = pop.clone();
            prop_assert!(domains.contains_chromosome(&once[0].chromosome));
            strategy.clamp(&domains, &mut pop);
            prop_assert_eq!(pop, once);
        }
    }

    #[test]
    fn selection_trims_to_target(
        population_size in 2usize..20,
        target in 1usize..20,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pop: Population = (0..population_size)
            .map(|i| Individual::with_fitness(vec![i as f64], i as f64))
            .collect();
        let selection = TournamentSelection::binary(target);
        let selected = selection.select(&mut pop, true, &mut rng).unwrap();
        prop_assert_eq!(selected.population_size(), target);
        prop_assert_eq!(pop.population_size(), target.min(population_size));
    }

    #[test]
    fn seeded_runs_are_deterministic(seed in any::<u64>()) {
        let run = |seed: u64| {
            let mut evolution = sphere_builder(6, 3)
                .with_seed(seed)
                .create_evolution()
                .unwrap();
            evolution.run().unwrap();
            evolution
                .best_individual()
                .map(|i| i.chromosome.clone())
        };
        prop_assert_eq!(run(seed), run(seed));
    }
}

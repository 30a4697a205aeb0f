//! Selection operators
//!
//! Ranking and sampling policies behind the `Selection` contract. All of
//! them sample with replacement and return `target_population` candidates.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use rand_distr::{Distribution, WeightedIndex};

use crate::error::EvoResult;
use crate::operators::traits::Selection;
use crate::population::population::Population;

fn oriented_fitness(population: &Population, maximize: bool) -> Vec<f64> {
    // Unevaluated individuals rank below every evaluated one.
    let worst = if maximize {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    population
        .iter()
        .map(|i| {
            let f = i.fitness.unwrap_or(worst);
            if maximize {
                f
            } else {
                -f
            }
        })
        .collect()
}

/// Tournament selection
///
/// Each candidate is the best of a random subset of the population.
#[derive(Clone, Debug)]
pub struct TournamentSelection {
    /// Size the input population is trimmed to after selection
    pub target_population: usize,
    /// Number of individuals competing per tournament
    pub tournament_size: usize,
}

impl TournamentSelection {
    /// Create a new tournament selection
    pub fn new(target_population: usize, tournament_size: usize) -> Self {
        assert!(tournament_size >= 1, "Tournament size must be at least 1");
        Self {
            target_population,
            tournament_size,
        }
    }

    /// Binary tournament (size 2)
    pub fn binary(target_population: usize) -> Self {
        Self::new(target_population, 2)
    }
}

impl Selection for TournamentSelection {
    fn select_from(
        &self,
        population: &Population,
        maximize: bool,
        rng: &mut dyn RngCore,
    ) -> EvoResult<Population> {
        let scores = oriented_fitness(population, maximize);
        let indices: Vec<usize> = (0..population.population_size()).collect();
        let tournament_size = self.tournament_size.min(indices.len());

        let mut selected = Population::with_capacity(self.target_population);
        for _ in 0..self.target_population {
            let winner = indices
                .choose_multiple(rng, tournament_size)
                .copied()
                .max_by(|&a, &b| {
                    scores[a]
                        .partial_cmp(&scores[b])
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
            if let Some(winner) = winner {
                selected.add_one(population[winner].clone());
            }
        }
        Ok(selected)
    }

    fn target_population(&self) -> usize {
        self.target_population
    }
}

/// Roulette wheel selection (fitness proportionate)
///
/// Selection probability is proportional to (direction-oriented) fitness.
/// Falls back to uniform sampling when the wheel degenerates.
#[derive(Clone, Debug)]
pub struct RouletteWheelSelection {
    /// Size the input population is trimmed to after selection
    pub target_population: usize,
}

impl RouletteWheelSelection {
    /// Create a new roulette wheel selection
    pub fn new(target_population: usize) -> Self {
        Self { target_population }
    }
}

impl Selection for RouletteWheelSelection {
    fn select_from(
        &self,
        population: &Population,
        maximize: bool,
        rng: &mut dyn RngCore,
    ) -> EvoResult<Population> {
        let scores = oriented_fitness(population, maximize);
        let min = scores
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min)
            .min(0.0);
        let weights: Vec<f64> = scores.iter().map(|s| s - min).collect();
        let total: f64 = weights.iter().sum();

        let mut selected = Population::with_capacity(self.target_population);
        match WeightedIndex::new(&weights) {
            Ok(dist) if total > 0.0 => {
                for _ in 0..self.target_population {
                    selected.add_one(population[dist.sample(rng)].clone());
                }
            }
            _ => {
                for _ in 0..self.target_population {
                    let index = rng.gen_range(0..population.population_size());
                    selected.add_one(population[index].clone());
                }
            }
        }
        Ok(selected)
    }

    fn target_population(&self) -> usize {
        self.target_population
    }
}

/// Rank-based selection
///
/// Selection probability follows linear rank, not raw fitness, which keeps
/// pressure stable when fitness values are badly scaled.
#[derive(Clone, Debug)]
pub struct RankSelection {
    /// Size the input population is trimmed to after selection
    pub target_population: usize,
    /// Selection pressure in [1.0, 2.0] (1.0 = uniform)
    pub selection_pressure: f64,
}

impl RankSelection {
    /// Create a new rank selection
    pub fn new(target_population: usize, selection_pressure: f64) -> Self {
        assert!(
            (1.0..=2.0).contains(&selection_pressure),
            "Selection pressure must be in [1.0, 2.0]"
        );
        Self {
            target_population,
            selection_pressure,
        }
    }
}

impl Selection for RankSelection {
    fn select_from(
        &self,
        population: &Population,
        maximize: bool,
        rng: &mut dyn RngCore,
    ) -> EvoResult<Population> {
        let n = population.population_size();
        let scores = oriented_fitness(population, maximize);

        // Rank ascending: index 0 = worst.
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            scores[a]
                .partial_cmp(&scores[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let sp = self.selection_pressure;
        let weights: Vec<f64> = (0..n)
            .map(|rank| {
                if n == 1 {
                    1.0
                } else {
                    2.0 - sp + 2.0 * (sp - 1.0) * rank as f64 / (n - 1) as f64
                }
            })
            .collect();

        let mut selected = Population::with_capacity(self.target_population);
        match WeightedIndex::new(&weights) {
            Ok(dist) => {
                for _ in 0..self.target_population {
                    selected.add_one(population[order[dist.sample(rng)]].clone());
                }
            }
            Err(_) => {
                for _ in 0..self.target_population {
                    let index = rng.gen_range(0..n);
                    selected.add_one(population[index].clone());
                }
            }
        }
        Ok(selected)
    }

    fn target_population(&self) -> usize {
        self.target_population
    }
}

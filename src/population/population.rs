//! Population type
//!
//! An ordered, mutable container of individuals.

use serde::{Deserialize, Serialize};

use crate::population::individual::Individual;

/// A population of individuals
///
/// Insertion order is preserved; `trim` truncates to the first N members
/// without reordering, so callers that need "best N" must sort first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Create an empty population
    pub fn new() -> Self {
        Self {
            individuals: Vec::new(),
        }
    }

    /// Create a population with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            individuals: Vec::with_capacity(capacity),
        }
    }

    /// Create a population from a vector of individuals
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// Number of individuals in the population
    pub fn population_size(&self) -> usize {
        self.individuals.len()
    }

    /// Check if the population is empty
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Add a single individual, preserving arrival order
    pub fn add_one(&mut self, individual: Individual) {
        self.individuals.push(individual);
    }

    /// Add a sequence of individuals, preserving arrival order
    pub fn add_many<I: IntoIterator<Item = Individual>>(&mut self, individuals: I) {
        self.individuals.extend(individuals);
    }

    /// Add the members of another population, preserving arrival order
    pub fn add_population(&mut self, other: Population) {
        self.individuals.extend(other.individuals);
    }

    /// Truncate to the first `n` members.
    ///
    /// A no-op when `n` meets or exceeds the current size. Never reorders.
    pub fn trim(&mut self, n: usize) {
        self.individuals.truncate(n);
    }

    /// Get an individual by index
    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    /// Get a mutable reference to an individual by index
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Individual> {
        self.individuals.get_mut(index)
    }

    /// Iterate over the individuals
    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter()
    }

    /// Iterate mutably over the individuals
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Individual> {
        self.individuals.iter_mut()
    }

    /// Get the underlying slice of individuals
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Get the best evaluated individual under the given direction
    pub fn best(&self, maximize: bool) -> Option<&Individual> {
        self.individuals
            .iter()
            .filter(|i| i.is_evaluated())
            .max_by(|a, b| {
                let fa = a.fitness_value();
                let fb = b.fitness_value();
                let ord = fa.partial_cmp(&fb).unwrap_or(std::cmp::Ordering::Equal);
                if maximize {
                    ord
                } else {
                    ord.reverse()
                }
            })
    }

    /// Sort the population by fitness, best first.
    ///
    /// Unevaluated individuals sink to the end.
    pub fn sort_by_fitness(&mut self, maximize: bool) {
        let worst = if maximize {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        self.individuals.sort_by(|a, b| {
            let fa = a.fitness.unwrap_or(worst);
            let fb = b.fitness.unwrap_or(worst);
            let ord = fa.partial_cmp(&fb).unwrap_or(std::cmp::Ordering::Equal);
            if maximize {
                ord.reverse()
            } else {
                ord
            }
        });
    }

    /// Check if every individual has a fresh fitness value
    pub fn all_evaluated(&self) -> bool {
        self.individuals.iter().all(|i| i.is_evaluated())
    }
}

impl std::ops::Index<usize> for Population {
    type Output = Individual;

    fn index(&self, index: usize) -> &Self::Output {
        &self.individuals[index]
    }
}

impl std::ops::IndexMut<usize> for Population {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.individuals[index]
    }
}

impl IntoIterator for Population {
    type Item = Individual;
    type IntoIter = std::vec::IntoIter<Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.into_iter()
    }
}

impl FromIterator<Individual> for Population {
    fn from_iter<I: IntoIterator<Item = Individual>>(iter: I) -> Self {
        Self::from_individuals(iter.into_iter().collect())
    }
}

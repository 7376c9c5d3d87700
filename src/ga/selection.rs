//! Selection strategies.
//!
//! A [`Select`] strategy builds the breeding pool for the next generation
//! from the evaluated current population. The pool holds clones, so the
//! variation step may modify them freely.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::Individual;
use rand::Rng;

/// Builds a breeding pool from an evaluated population.
pub trait Select<I: Individual>: Send + Sync {
    /// Returns `k` individuals chosen from `population`.
    ///
    /// Returns an empty pool when `population` is empty.
    fn select<R: Rng>(&self, population: &[I], k: usize, rng: &mut R) -> Vec<I>;
}

/// Tournament selection: draw `size` individuals uniformly with
/// replacement, keep the one with the lowest fitness.
///
/// Higher `size` means stronger selection pressure; 3 is the usual
/// compromise between pressure and diversity.
///
/// ```
/// use u_loadplan::ga::Tournament;
///
/// let sel = Tournament::new(3);
/// assert_eq!(sel.size(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tournament {
    size: usize,
}

impl Default for Tournament {
    fn default() -> Self {
        Self { size: 3 }
    }
}

impl Tournament {
    /// Creates a tournament of `size` contestants (at least 1).
    pub fn new(size: usize) -> Self {
        Self { size: size.max(1) }
    }

    /// Number of contestants per tournament.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Runs a single tournament and returns the winner's index.
    ///
    /// # Complexity
    /// O(size)
    pub fn winner<I: Individual, R: Rng>(&self, population: &[I], rng: &mut R) -> Option<usize> {
        let n = population.len();
        if n == 0 {
            return None;
        }

        let mut best_idx = rng.random_range(0..n);
        for _ in 1..self.size {
            let idx = rng.random_range(0..n);
            if population[idx].fitness() < population[best_idx].fitness() {
                best_idx = idx;
            }
        }
        Some(best_idx)
    }
}

impl<I: Individual> Select<I> for Tournament {
    fn select<R: Rng>(&self, population: &[I], k: usize, rng: &mut R) -> Vec<I> {
        (0..k)
            .filter_map(|_| self.winner(population, rng))
            .map(|idx| population[idx].clone())
            .collect()
    }
}

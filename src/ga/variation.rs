//! Variation strategies.
//!
//! A [`Vary`] strategy turns a breeding pool into offspring by applying the
//! problem's crossover and mutation. It works in place on the pool, so
//! parents that undergo crossover are replaced by their children.

use super::types::GaProblem;
use rand::Rng;

/// Applies variation operators to a breeding pool.
pub trait Vary<P: GaProblem>: Send + Sync {
    /// Produces offspring from `pool`. The returned population has the same
    /// size as the pool.
    fn vary<R: Rng>(
        &self,
        problem: &P,
        pool: Vec<P::Individual>,
        rng: &mut R,
    ) -> Vec<P::Individual>;
}

/// Crossover on consecutive pairs, then independent mutation.
///
/// Pairs `(0, 1), (2, 3), ...` are recombined with probability
/// `crossover_rate`; an odd trailing individual is left alone. Every
/// offspring is then mutated with probability `mutation_rate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossoverMutation {
    /// Probability of recombining a consecutive pair (0.0–1.0).
    pub crossover_rate: f64,
    /// Probability of mutating an offspring (0.0–1.0).
    pub mutation_rate: f64,
}

impl CrossoverMutation {
    /// Creates the strategy, clamping both rates into `[0, 1]`.
    pub fn new(crossover_rate: f64, mutation_rate: f64) -> Self {
        Self {
            crossover_rate: crossover_rate.clamp(0.0, 1.0),
            mutation_rate: mutation_rate.clamp(0.0, 1.0),
        }
    }
}

impl<P: GaProblem> Vary<P> for CrossoverMutation {
    fn vary<R: Rng>(
        &self,
        problem: &P,
        mut pool: Vec<P::Individual>,
        rng: &mut R,
    ) -> Vec<P::Individual> {
        for pair in pool.chunks_exact_mut(2) {
            if rng.random_bool(self.crossover_rate) {
                let (first, second) = pair.split_at_mut(1);
                problem.crossover(&mut first[0], &mut second[0], rng);
            }
        }

        for individual in pool.iter_mut() {
            if rng.random_bool(self.mutation_rate) {
                problem.mutate(individual, rng);
            }
        }

        pool
    }
}

//! GA generational loop execution.
//!
//! [`GaRunner`] orchestrates the evolutionary process:
//! initialization → evaluation → selection → variation → evaluation → ...

use super::config::GaConfig;
use super::selection::Select;
use super::types::{Fitness, GaProblem, Individual};
use super::variation::Vary;
use crate::error::{Error, Result};
use crate::random::rng_from;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Fitness statistics of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation number; 0 is the initial population.
    pub generation: usize,
    /// Lowest fitness in the population.
    pub best: f64,
    /// Mean fitness of the population.
    pub mean: f64,
    /// Highest fitness in the population.
    pub worst: f64,
    /// Number of individuals evaluated during this generation.
    pub evaluations: usize,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The lowest-fitness individual of the final population.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: I::Fitness,

    /// Total number of generations executed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Statistics per generation, starting with the initial population.
    pub history: Vec<GenerationStats>,
}

/// Executes the GA generational loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best fitness: {:?}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with the strategies described by `config`.
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> Result<GaResult<P::Individual>> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// The flag is checked at the start of each generation. Once set, no
    /// further generation is scheduled and the best individual of the
    /// current population is returned.
    pub fn run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<P::Individual>> {
        Self::run_with(
            problem,
            config,
            &config.selection(),
            &config.variation(),
            cancel,
        )
    }

    /// Runs the GA with explicit selection and variation strategies.
    ///
    /// `config.tournament_size`, `crossover_rate` and `mutation_rate` are
    /// ignored here; everything else applies.
    pub fn run_with<P, S, V>(
        problem: &P,
        config: &GaConfig,
        selection: &S,
        variation: &V,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<P::Individual>>
    where
        P: GaProblem,
        S: Select<P::Individual>,
        V: Vary<P>,
    {
        config.validate()?;

        let mut rng = rng_from(config.seed);

        log::info!(
            "GA start: population={}, generations={}, seed={:?}",
            config.population_size,
            config.max_generations,
            config.seed
        );

        // 1. Initialize population
        let mut population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();

        // 2. Evaluate initial population
        let evaluations = evaluate_population(problem, &mut population, config.parallel);
        let mut history = Vec::with_capacity(config.max_generations + 1);
        history.push(generation_stats(0, &population, evaluations));

        let mut generations = 0usize;
        let mut cancelled = false;

        // 3. Generational loop
        for gen in 0..config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            // Selection; the breeding pool holds clones of the winners
            let pool = selection.select(&population, config.population_size, &mut rng);

            // Variation
            let mut offspring = variation.vary(problem, pool, &mut rng);

            // Evaluate offspring whose genome changed; barrier before the
            // next selection
            let evaluations = evaluate_population(problem, &mut offspring, config.parallel);

            population = offspring;
            generations = gen + 1;

            let stats = generation_stats(generations, &population, evaluations);
            log::debug!(
                "GA gen {}: best={:.3}, mean={:.3}, evaluated={}",
                stats.generation,
                stats.best,
                stats.mean,
                stats.evaluations
            );
            history.push(stats);

            if let Some(best) = find_best(&population) {
                problem.on_generation(generations, best.fitness());
            }
        }

        let best = find_best(&population)
            .ok_or(Error::EmptyPopulation(generations))?
            .clone();

        log::info!(
            "GA done: generations={}, best={:.3}, cancelled={}",
            generations,
            best.fitness().to_f64(),
            cancelled
        );

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations,
            cancelled,
            history,
        })
    }
}

/// Evaluates every individual with a stale fitness; returns how many.
fn evaluate_population<P: GaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    parallel: bool,
) -> usize {
    if parallel {
        population
            .par_iter_mut()
            .filter(|ind| !ind.is_evaluated())
            .map(|ind| {
                let f = problem.evaluate(ind);
                ind.set_fitness(f);
            })
            .count()
    } else {
        let mut count = 0;
        for ind in population.iter_mut().filter(|ind| !ind.is_evaluated()) {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
            count += 1;
        }
        count
    }
}

/// Find the individual with the best (lowest) fitness.
fn find_best<I: Individual>(population: &[I]) -> Option<&I> {
    population.iter().min_by(|a, b| {
        a.fitness()
            .partial_cmp(&b.fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

fn generation_stats<I: Individual>(
    generation: usize,
    population: &[I],
    evaluations: usize,
) -> GenerationStats {
    let (mut best, mut worst, mut sum) = (f64::INFINITY, f64::NEG_INFINITY, 0.0);
    for ind in population {
        let f = ind.fitness().to_f64();
        best = best.min(f);
        worst = worst.max(f);
        sum += f;
    }
    let mean = if population.is_empty() {
        f64::NAN
    } else {
        sum / population.len() as f64
    };
    GenerationStats {
        generation,
        best,
        mean,
        worst,
        evaluations,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::operators::{shuffle_indexes, two_point_crossover};
    use crate::ga::{CrossoverMutation, Tournament};
    use rand::Rng;
    use std::sync::atomic::AtomicUsize;

    // ---- OneMax problem: maximize sum of bits (minimize negative sum) ----

    #[derive(Clone, Debug)]
    struct BitString {
        bits: Vec<bool>,
        fitness: Option<f64>,
    }

    impl Individual for BitString {
        type Fitness = f64;
        fn fitness(&self) -> f64 {
            self.fitness.unwrap_or(f64::INFINITY)
        }
        fn is_evaluated(&self) -> bool {
            self.fitness.is_some()
        }
        fn set_fitness(&mut self, f: f64) {
            self.fitness = Some(f);
        }
        fn invalidate(&mut self) {
            self.fitness = None;
        }
    }

    struct OneMaxProblem {
        n: usize,
        evaluations: AtomicUsize,
    }

    impl OneMaxProblem {
        fn new(n: usize) -> Self {
            Self {
                n,
                evaluations: AtomicUsize::new(0),
            }
        }
    }

    impl GaProblem for OneMaxProblem {
        type Individual = BitString;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> BitString {
            let bits: Vec<bool> = (0..self.n).map(|_| rng.random_bool(0.5)).collect();
            BitString {
                bits,
                fitness: None,
            }
        }

        fn evaluate(&self, ind: &BitString) -> f64 {
            self.evaluations.fetch_add(1, Ordering::Relaxed);
            -(ind.bits.iter().filter(|&&b| b).count() as f64)
        }

        fn crossover<R: Rng>(&self, a: &mut BitString, b: &mut BitString, rng: &mut R) {
            if two_point_crossover(&mut a.bits, &mut b.bits, rng) {
                a.invalidate();
                b.invalidate();
            }
        }

        fn mutate<R: Rng>(&self, ind: &mut BitString, rng: &mut R) {
            let idx = rng.random_range(0..self.n);
            ind.bits[idx] = !ind.bits[idx];
            ind.invalidate();
        }
    }

    #[test]
    fn test_onemax_convergence() {
        let problem = OneMaxProblem::new(20);
        let config = GaConfig::default()
            .with_population_size(50)
            .with_max_generations(100)
            .with_mutation_rate(0.3)
            .with_seed(42)
            .with_parallel(false);

        let result = GaRunner::run(&problem, &config).unwrap();

        assert!(
            result.best_fitness <= -15.0,
            "expected fitness <= -15.0 for 20-bit OneMax, got {}",
            result.best_fitness
        );
    }

    #[test]
    fn test_runs_exact_generation_count() {
        let problem = OneMaxProblem::new(10);
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(30)
            .with_seed(42)
            .with_parallel(false);

        let result = GaRunner::run(&problem, &config).unwrap();

        assert_eq!(result.generations, 30);
        assert!(!result.cancelled);
        // Initial population + one entry per generation
        assert_eq!(result.history.len(), 31);
        assert_eq!(result.history[0].generation, 0);
        assert_eq!(result.history[0].evaluations, 20);
    }

    #[test]
    fn test_only_changed_individuals_are_reevaluated() {
        let problem = OneMaxProblem::new(10);
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(10)
            .with_crossover_rate(0.0)
            .with_mutation_rate(0.0)
            .with_seed(1)
            .with_parallel(false);

        let result = GaRunner::run(&problem, &config).unwrap();

        // Without variation nothing changes after the initial evaluation
        assert_eq!(problem.evaluations.load(Ordering::Relaxed), 20);
        assert!(result.history[1..].iter().all(|s| s.evaluations == 0));
    }

    #[test]
    fn test_best_comes_from_final_population() {
        let problem = OneMaxProblem::new(12);
        let config = GaConfig::default()
            .with_population_size(16)
            .with_max_generations(5)
            .with_seed(3)
            .with_parallel(false);

        let result = GaRunner::run(&problem, &config).unwrap();
        let last = result.history.last().unwrap();
        assert_eq!(result.best_fitness, last.best);
        assert!(last.best <= last.mean && last.mean <= last.worst);
    }

    #[test]
    fn test_same_seed_same_result() {
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(15)
            .with_seed(99);

        let a = GaRunner::run(&OneMaxProblem::new(16), &config.clone().with_parallel(false))
            .unwrap();
        let b = GaRunner::run(&OneMaxProblem::new(16), &config.with_parallel(true)).unwrap();

        assert_eq!(a.best.bits, b.best.bits);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_cancellation() {
        let problem = OneMaxProblem::new(20);
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(10)
            .with_seed(42)
            .with_parallel(false);

        // Already set: no generation is scheduled at all
        let cancel = Arc::new(AtomicBool::new(true));
        let result = GaRunner::run_with_cancel(&problem, &config, Some(cancel)).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert_eq!(result.history.len(), 1);
    }

    #[test]
    fn test_invalid_config_is_error() {
        let problem = OneMaxProblem::new(4);
        let config = GaConfig::default().with_population_size(1);
        assert!(matches!(
            GaRunner::run(&problem, &config),
            Err(Error::InvalidConfig(_))
        ));
    }

    // ---- Swappable strategies ----

    /// Keeps the pool in population order.
    struct Identity;

    impl<I: Individual> Select<I> for Identity {
        fn select<R: Rng>(&self, population: &[I], k: usize, _rng: &mut R) -> Vec<I> {
            population.iter().cycle().take(k).cloned().collect()
        }
    }

    /// Shuffles the bit order of every offspring.
    struct ShuffleAll;

    impl Vary<OneMaxProblem> for ShuffleAll {
        fn vary<R: Rng>(
            &self,
            _problem: &OneMaxProblem,
            mut pool: Vec<BitString>,
            rng: &mut R,
        ) -> Vec<BitString> {
            for ind in pool.iter_mut() {
                if shuffle_indexes(&mut ind.bits, 1.0, rng) {
                    ind.invalidate();
                }
            }
            pool
        }
    }

    #[test]
    fn test_custom_strategies() {
        let problem = OneMaxProblem::new(8);
        let config = GaConfig::default()
            .with_population_size(10)
            .with_max_generations(5)
            .with_seed(5)
            .with_parallel(false);

        let result = GaRunner::run_with(&problem, &config, &Identity, &ShuffleAll, None).unwrap();

        // Reordering bits never changes the count of ones
        let initial_best = result.history[0].best;
        assert!(result.history.iter().all(|s| s.best == initial_best));
        assert_eq!(result.history[1].evaluations, 10);
    }

    #[test]
    fn test_default_strategies_match_config() {
        let problem = OneMaxProblem::new(10);
        let config = GaConfig::default()
            .with_population_size(12)
            .with_max_generations(8)
            .with_seed(21)
            .with_parallel(false);

        let a = GaRunner::run(&problem, &config).unwrap();
        let b = GaRunner::run_with(
            &problem,
            &config,
            &Tournament::new(3),
            &CrossoverMutation::new(0.8, 0.2),
            None,
        )
        .unwrap();
        assert_eq!(a.best.bits, b.best.bits);
    }
}

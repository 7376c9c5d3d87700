//! Core trait definitions for the GA engine.
//!
//! [`Individual`] and [`GaProblem`] are the contract between the generic
//! generational loop and a concrete problem such as load planning.

use rand::Rng;

/// Marker trait for fitness values.
///
/// Lower fitness is considered better (minimization).
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Returns a value representing the worst possible fitness.
    ///
    /// Reported by individuals whose fitness has not been computed yet.
    fn worst() -> Self;

    /// Converts the fitness to `f64` for logging and statistics.
    fn to_f64(self) -> f64;
}

impl Fitness for f64 {
    fn worst() -> Self {
        f64::INFINITY
    }

    fn to_f64(self) -> f64 {
        self
    }
}

/// A candidate solution carrying a cached fitness.
///
/// The cache doubles as a dirty flag: the runner evaluates only the
/// individuals for which [`is_evaluated`](Individual::is_evaluated) is
/// `false`. Implementations must drop the cached value whenever the genome
/// changes.
///
/// ```ignore
/// #[derive(Clone)]
/// struct Route {
///     stops: Vec<usize>,
///     fitness: Option<f64>,
/// }
///
/// impl Individual for Route {
///     type Fitness = f64;
///     fn fitness(&self) -> f64 { self.fitness.unwrap_or(f64::INFINITY) }
///     fn is_evaluated(&self) -> bool { self.fitness.is_some() }
///     fn set_fitness(&mut self, f: f64) { self.fitness = Some(f); }
///     fn invalidate(&mut self) { self.fitness = None; }
/// }
/// ```
pub trait Individual: Clone + Send + Sync {
    /// The fitness type. Must implement [`Fitness`].
    type Fitness: Fitness;

    /// Returns the cached fitness, or [`Fitness::worst`] if stale.
    fn fitness(&self) -> Self::Fitness;

    /// Whether the cached fitness matches the current genome.
    fn is_evaluated(&self) -> bool;

    /// Stores a freshly computed fitness.
    fn set_fitness(&mut self, fitness: Self::Fitness);

    /// Marks the cached fitness as stale.
    fn invalidate(&mut self);
}

/// Defines a GA optimization problem.
///
/// 1. **Initialization**: how to create a random individual
/// 2. **Evaluation**: how to compute fitness
/// 3. **Crossover**: how to recombine two parents in place
/// 4. **Mutation**: how to perturb an individual in place
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because the runner evaluates
/// individuals in parallel using rayon.
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Creates a random individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Evaluates an individual and returns its fitness.
    ///
    /// Must be pure: the same genome always yields the same fitness.
    fn evaluate(&self, individual: &Self::Individual) -> <Self::Individual as Individual>::Fitness;

    /// Recombines two parents in place, turning them into the two children.
    ///
    /// Implementations invalidate the fitness of any parent they modify.
    /// The default implementation leaves both untouched.
    fn crossover<R: Rng>(
        &self,
        _first: &mut Self::Individual,
        _second: &mut Self::Individual,
        _rng: &mut R,
    ) {
    }

    /// Mutates an individual in place.
    ///
    /// The default implementation is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rng: &mut R) {}

    /// Called at the end of each generation with the current best fitness.
    fn on_generation(
        &self,
        _generation: usize,
        _best_fitness: <Self::Individual as Individual>::Fitness,
    ) {
    }
}

//! Genetic Algorithm engine.
//!
//! A generic generational GA built on trait-based abstractions. A problem
//! implements [`GaProblem`] (initialization, evaluation, crossover,
//! mutation); the loop itself is assembled from two swappable strategies:
//!
//! - [`Select`]: builds the breeding pool ([`Tournament`] by default)
//! - [`Vary`]: produces offspring from the pool ([`CrossoverMutation`] by default)
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, rates, seed)
//! - [`GaRunner`]: Executes the generational loop
//! - [`GaResult`]: Final result with per-generation statistics
//!
//! # Submodules
//!
//! - [`operators`]: Two-point crossover and shuffle-indexes mutation on slices
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
mod selection;
mod types;
mod variation;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner, GenerationStats};
pub use selection::{Select, Tournament};
pub use types::{Fitness, GaProblem, Individual};
pub use variation::{CrossoverMutation, Vary};

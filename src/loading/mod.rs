//! Pallet-to-truck load planning.
//!
//! # Pipeline
//!
//! 1. [`LoadBuilder`]: greedy fill of one load, base slots first, then
//!    remonte slots checked against the base pallet's stacking threshold
//! 2. [`PopulationInitializer`]: complete plans from shuffled unit pools
//! 3. [`FitnessEvaluator`]: load count plus graduated penalties
//! 4. [`LoadPlanner`]: runs the GA over [`LoadPlan`]s and reports the best
//!
//! Only the slot caps are enforced structurally; every other rule is a
//! penalty, so the search may pass through infeasible plans.

mod builder;
mod config;
mod fitness;
mod initializer;
mod planner;
mod report;
mod types;

pub use builder::LoadBuilder;
pub use config::{LoadLimits, PenaltyWeights, PlannerConfig};
pub use fitness::{FitnessBreakdown, FitnessEvaluator};
pub use initializer::{BuildOutcome, PlanBuild, PopulationInitializer, ResidualWarning};
pub use planner::{LoadPlanner, LoadPlanningProblem, PlanResult};
pub use report::{LoadDetail, LoadSummary, PlanReport};
pub use types::{Load, LoadPlan, Position};

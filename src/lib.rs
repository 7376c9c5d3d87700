//! Pallet load planning with a genetic algorithm.
//!
//! Assigns the required pallets of an inventory to truck loads bounded by
//! weight, volume and slot counts, where "remonte" pallets are stacked on
//! "base" pallets that must be able to carry them.
//!
//! - **Inventory**: validated, read-only SKU catalog ([`inventory`])
//! - **Loading**: greedy load construction, penalty fitness, planner facade
//!   and report tables ([`loading`])
//! - **Genetic Algorithm (GA)**: generic generational loop with swappable
//!   selection and variation strategies ([`ga`])
//!
//! # Example
//!
//! ```
//! use u_loadplan::inventory::Inventory;
//! use u_loadplan::loading::{LoadPlanner, PlannerConfig};
//!
//! let headers = ["sku", "required_quantity", "unit_weight", "unit_volume", "remonte_threshold"];
//! let rows = vec![
//!     vec!["A-100", "40", "310", "1.3", "420"],
//!     vec!["B-200", "16", "520", "1.6", "300"],
//! ];
//! let inventory = Inventory::from_table(&headers, &rows)?;
//!
//! let config = PlannerConfig::default()
//!     .with_population_size(10)
//!     .with_generations(10)
//!     .with_seed(7);
//! let result = LoadPlanner::new(inventory, config)?.plan()?;
//!
//! for load in &result.report.summaries {
//!     println!("load {}: {} kg", load.load_index, load.total_weight);
//! }
//! # Ok::<(), u_loadplan::Error>(())
//! ```
//!
//! # Logging
//!
//! Progress goes through the `log` facade; install any logger to see it.

pub mod error;
pub mod ga;
pub mod inventory;
pub mod loading;
pub mod random;

pub use error::{Error, Result, ValidationError};

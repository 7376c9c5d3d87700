//! Planning configuration.
//!
//! [`PlannerConfig`] gathers the physical limits of a load, the penalty
//! coefficients of the fitness function and the GA parameters. Every value
//! has a production default; callers override what they need with the
//! `with_*` builders.

use crate::error::{Error, Result};
use crate::ga::GaConfig;

/// Physical limits of one truck load.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoadLimits {
    /// Maximum total weight per load, kg.
    pub max_weight: f64,
    /// Maximum total volume per load, m³.
    pub max_volume: f64,
    /// Base slots per load. Structural: never exceeded by construction.
    pub base_cap: usize,
    /// Remonte slots per load. Structural: never exceeded by construction.
    pub remonte_cap: usize,
    /// Pallets at or below this weight (kg) are offered as remonte first.
    pub light_threshold: f64,
    /// Loads with fewer pallets than this are penalized as under-filled.
    pub min_pallets: usize,
}

impl Default for LoadLimits {
    fn default() -> Self {
        Self {
            max_weight: 24_000.0,
            max_volume: 90.0,
            base_cap: 28,
            remonte_cap: 28,
            light_threshold: 350.0,
            min_pallets: 40,
        }
    }
}

impl LoadLimits {
    pub fn with_max_weight(mut self, kg: f64) -> Self {
        self.max_weight = kg;
        self
    }

    pub fn with_max_volume(mut self, m3: f64) -> Self {
        self.max_volume = m3;
        self
    }

    pub fn with_caps(mut self, base: usize, remonte: usize) -> Self {
        self.base_cap = base;
        self.remonte_cap = remonte;
        self
    }

    pub fn with_light_threshold(mut self, kg: f64) -> Self {
        self.light_threshold = kg;
        self
    }

    pub fn with_min_pallets(mut self, n: usize) -> Self {
        self.min_pallets = n;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.max_weight > 0.0) {
            return Err(Error::InvalidConfig("max_weight must be positive".into()));
        }
        if !(self.max_volume > 0.0) {
            return Err(Error::InvalidConfig("max_volume must be positive".into()));
        }
        if self.base_cap == 0 {
            return Err(Error::InvalidConfig("base_cap must be at least 1".into()));
        }
        if !(self.light_threshold >= 0.0) {
            return Err(Error::InvalidConfig(
                "light_threshold must not be negative".into(),
            ));
        }
        Ok(())
    }
}

/// Coefficients of the penalty terms of the fitness function.
///
/// All per-unit coefficients multiply the size of the violation (kg, m³,
/// pallets); `cap_overflow` and `pairing` are flat amounts per occurrence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PenaltyWeights {
    /// Per kg above `max_weight`.
    pub weight_overage: f64,
    /// Per m³ above `max_volume`.
    pub volume_overage: f64,
    /// Flat, once per load whose base or remonte list exceeds its cap.
    pub cap_overflow: f64,
    /// Flat, per remonte pallet heavier than the threshold of the base below it.
    pub pairing: f64,
    /// Per empty remonte slot.
    pub remonte_shortfall: f64,
    /// Per pallet below `min_pallets`.
    pub pallet_shortfall: f64,
    /// Share of the required quantity that may be over-shipped at the
    /// lenient rate.
    pub over_tolerance: f64,
    /// Per over-shipped unit within the tolerance.
    pub over_lenient: f64,
    /// Per over-shipped unit beyond the tolerance.
    pub over_steep: f64,
    /// Per missing unit.
    pub under_allocation: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            weight_overage: 1_000.0,
            volume_overage: 1_000.0,
            cap_overflow: 10_000.0,
            pairing: 10_000.0,
            remonte_shortfall: 3_000.0,
            pallet_shortfall: 2_000.0,
            over_tolerance: 0.05,
            over_lenient: 500.0,
            over_steep: 10_000.0,
            under_allocation: 1_000.0,
        }
    }
}

impl PenaltyWeights {
    pub fn validate(&self) -> Result<()> {
        let terms = [
            ("weight_overage", self.weight_overage),
            ("volume_overage", self.volume_overage),
            ("cap_overflow", self.cap_overflow),
            ("pairing", self.pairing),
            ("remonte_shortfall", self.remonte_shortfall),
            ("pallet_shortfall", self.pallet_shortfall),
            ("over_tolerance", self.over_tolerance),
            ("over_lenient", self.over_lenient),
            ("over_steep", self.over_steep),
            ("under_allocation", self.under_allocation),
        ];
        for (name, value) in terms {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(Error::InvalidConfig(format!(
                    "penalty `{name}` must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Everything a planning run needs besides the inventory.
///
/// ```
/// use u_loadplan::loading::{LoadLimits, PlannerConfig};
///
/// let config = PlannerConfig::default()
///     .with_limits(LoadLimits::default().with_max_weight(25_000.0))
///     .with_population_size(30)
///     .with_generations(40)
///     .with_seed(1);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.ga.population_size, 30);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    pub limits: LoadLimits,
    pub penalties: PenaltyWeights,
    pub ga: GaConfig,
    /// Per-position swap probability of the load-order mutation.
    pub mutation_index_prob: f64,
    /// Upper bound on builder invocations per plan. `None` means one per
    /// required unit, which is never reached since every build places at
    /// least one unit.
    pub max_builds_per_plan: Option<usize>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            limits: LoadLimits::default(),
            penalties: PenaltyWeights::default(),
            ga: GaConfig::default(),
            mutation_index_prob: 0.2,
            max_builds_per_plan: None,
        }
    }
}

impl PlannerConfig {
    pub fn with_limits(mut self, limits: LoadLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_penalties(mut self, penalties: PenaltyWeights) -> Self {
        self.penalties = penalties;
        self
    }

    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.ga = self.ga.with_population_size(n);
        self
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.ga = self.ga.with_max_generations(n);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.ga = self.ga.with_seed(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.ga = self.ga.with_parallel(parallel);
        self
    }

    pub fn with_mutation_index_prob(mut self, p: f64) -> Self {
        self.mutation_index_prob = p.clamp(0.0, 1.0);
        self
    }

    pub fn with_max_builds_per_plan(mut self, n: usize) -> Self {
        self.max_builds_per_plan = Some(n);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.limits.validate()?;
        self.penalties.validate()?;
        self.ga.validate()?;
        if !(0.0..=1.0).contains(&self.mutation_index_prob) {
            return Err(Error::InvalidConfig(format!(
                "mutation_index_prob must be within [0, 1], got {}",
                self.mutation_index_prob
            )));
        }
        Ok(())
    }
}

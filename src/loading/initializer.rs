//! Random construction of complete load plans.

use super::builder::LoadBuilder;
use super::config::LoadLimits;
use super::types::{Load, LoadPlan};
use crate::inventory::{Inventory, SkuId};
use rand::seq::SliceRandom;
use rand::Rng;

/// Units of one SKU that did not fit within the build bound.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResidualWarning {
    pub sku: SkuId,
    pub code: String,
    pub units: usize,
}

/// How a plan construction ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Every unit was placed by the builder.
    Complete,
    /// The build bound was hit; the listed units were force-placed.
    UnplaceableResidual(Vec<ResidualWarning>),
}

/// A freshly constructed plan and how its construction ended.
#[derive(Debug, Clone)]
pub struct PlanBuild {
    pub plan: LoadPlan,
    pub outcome: BuildOutcome,
}

/// Seeds the population with randomized greedy plans.
///
/// One plan is built by shuffling one unit per required pallet, then
/// repeatedly running the [`LoadBuilder`] on a copy of the remaining pool
/// and removing the placed units (first occurrence of each) from it.
#[derive(Debug, Clone, Copy)]
pub struct PopulationInitializer<'a> {
    inventory: &'a Inventory,
    builder: LoadBuilder<'a>,
    base_cap: usize,
    remonte_cap: usize,
    max_builds: Option<usize>,
}

impl<'a> PopulationInitializer<'a> {
    pub fn new(inventory: &'a Inventory, limits: &LoadLimits, max_builds: Option<usize>) -> Self {
        Self {
            inventory,
            builder: LoadBuilder::new(inventory, limits),
            base_cap: limits.base_cap,
            remonte_cap: limits.remonte_cap,
            max_builds,
        }
    }

    /// Builds one plan from an independent random permutation.
    pub fn build_plan<R: Rng>(&self, rng: &mut R) -> PlanBuild {
        let mut remaining = self.inventory.units();
        remaining.shuffle(rng);

        let bound = self.max_builds.unwrap_or(remaining.len());
        let mut loads = Vec::new();
        let mut builds = 0;

        while !remaining.is_empty() && builds < bound {
            let load = self.builder.build(remaining.clone());
            builds += 1;
            if load.is_empty() {
                break;
            }
            for (_, unit) in load.units() {
                if let Some(pos) = remaining.iter().position(|&u| u == unit) {
                    remaining.remove(pos);
                }
            }
            loads.push(load);
        }

        let outcome = if remaining.is_empty() {
            BuildOutcome::Complete
        } else {
            let warnings = self.residual_warnings(&remaining);
            for w in &warnings {
                log::warn!(
                    "unplaceable residual after {} builds: sku={} units={}, force-placing",
                    builds,
                    w.code,
                    w.units
                );
            }
            self.force_place(&mut loads, remaining);
            BuildOutcome::UnplaceableResidual(warnings)
        };

        PlanBuild {
            plan: LoadPlan::new(loads),
            outcome,
        }
    }

    /// Builds `size` independent plans.
    pub fn populate<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<LoadPlan> {
        (0..size).map(|_| self.build_plan(rng).plan).collect()
    }

    fn residual_warnings(&self, remaining: &[SkuId]) -> Vec<ResidualWarning> {
        let mut counts = vec![0usize; self.inventory.len()];
        for unit in remaining {
            counts[unit.index()] += 1;
        }
        counts
            .into_iter()
            .enumerate()
            .filter(|&(_, units)| units > 0)
            .map(|(i, units)| ResidualWarning {
                sku: SkuId(i),
                code: self.inventory.sku(SkuId(i)).code.clone(),
                units,
            })
            .collect()
    }

    /// Fills open slots of the last load, base first, opening new loads as
    /// needed. Stacking and weight limits are left to the fitness function.
    fn force_place(&self, loads: &mut Vec<Load>, remaining: Vec<SkuId>) {
        for unit in remaining {
            let full = loads.last().map_or(true, |l| {
                l.base.len() >= self.base_cap && l.remonte.len() >= self.remonte_cap
            });
            if full {
                loads.push(Load::default());
            }
            if let Some(load) = loads.last_mut() {
                if load.base.len() < self.base_cap {
                    load.base.push(unit);
                } else {
                    load.remonte.push(unit);
                }
            }
        }
    }
}

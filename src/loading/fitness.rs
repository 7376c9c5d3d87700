//! Graduated-penalty fitness of a load plan.
//!
//! Every business rule is soft. The score is the number of non-empty loads
//! plus a penalty per violated rule, scaled so that coverage and hard-ish
//! limits dominate the load count:
//!
//! | Term | Amount |
//! |------|--------|
//! | weight over limit | `(weight - max_weight) × weight_overage` |
//! | volume over limit | `(volume - max_volume) × volume_overage` |
//! | slot cap exceeded | `cap_overflow`, once per load |
//! | remonte too heavy for `base[i]` | `pairing` per position `i` |
//! | empty remonte slots | `(remonte_cap - remonte) × remonte_shortfall` |
//! | under-filled load | `(min_pallets - pallets) × pallet_shortfall` |
//! | over-shipped SKU | `excess × over_lenient` up to `over_tolerance × required`, `over_steep` beyond |
//! | under-shipped SKU | `(required - used) × under_allocation` |
//!
//! Stacking is checked positionally: `remonte[i]` against `base[i]` only.

use super::config::{LoadLimits, PenaltyWeights};
use super::types::{Load, LoadPlan};
use crate::inventory::Inventory;

/// Fitness split into its terms; [`total`](Self::total) is the score.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessBreakdown {
    /// Non-empty loads.
    pub loads: usize,
    pub weight_overage: f64,
    pub volume_overage: f64,
    pub cap_overflow: f64,
    pub pairing: f64,
    pub remonte_shortfall: f64,
    pub pallet_shortfall: f64,
    pub over_allocation: f64,
    pub under_allocation: f64,
}

impl FitnessBreakdown {
    /// Sum of all penalty terms, without the load count.
    pub fn penalty(&self) -> f64 {
        self.weight_overage
            + self.volume_overage
            + self.cap_overflow
            + self.pairing
            + self.remonte_shortfall
            + self.pallet_shortfall
            + self.over_allocation
            + self.under_allocation
    }

    /// The scalar fitness: load count plus penalty. Lower is better.
    pub fn total(&self) -> f64 {
        self.loads as f64 + self.penalty()
    }

    /// True when no rule is violated.
    pub fn is_feasible(&self) -> bool {
        self.penalty() == 0.0
    }
}

/// Scores load plans against an inventory.
///
/// Pure and read-only: the same plan always receives the same score.
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a> {
    inventory: &'a Inventory,
    limits: &'a LoadLimits,
    weights: &'a PenaltyWeights,
}

impl<'a> FitnessEvaluator<'a> {
    pub fn new(inventory: &'a Inventory, limits: &'a LoadLimits, weights: &'a PenaltyWeights) -> Self {
        Self {
            inventory,
            limits,
            weights,
        }
    }

    /// The scalar fitness of `plan`.
    pub fn evaluate(&self, plan: &LoadPlan) -> f64 {
        self.breakdown(plan).total()
    }

    /// The fitness of `plan`, term by term.
    pub fn breakdown(&self, plan: &LoadPlan) -> FitnessBreakdown {
        let mut b = FitnessBreakdown::default();

        for load in plan.loads().iter().filter(|l| !l.is_empty()) {
            b.loads += 1;
            self.score_load(load, &mut b);
        }

        let used = plan.unit_counts(self.inventory.len());
        for ((_, sku), used) in self.inventory.iter().zip(used) {
            let required = sku.required_quantity as f64;
            let used = used as f64;
            if used > required {
                b.over_allocation += self.over_allocation(used - required, required);
            } else if used < required {
                b.under_allocation += (required - used) * self.weights.under_allocation;
            }
        }

        b
    }

    fn score_load(&self, load: &Load, b: &mut FitnessBreakdown) {
        let w = self.weights;
        let l = self.limits;

        let (weight, volume) = load.units().fold((0.0, 0.0), |(kg, m3), (_, id)| {
            let sku = self.inventory.sku(id);
            (kg + sku.unit_weight, m3 + sku.unit_volume)
        });
        if weight > l.max_weight {
            b.weight_overage += (weight - l.max_weight) * w.weight_overage;
        }
        if volume > l.max_volume {
            b.volume_overage += (volume - l.max_volume) * w.volume_overage;
        }

        if load.base.len() > l.base_cap || load.remonte.len() > l.remonte_cap {
            b.cap_overflow += w.cap_overflow;
        }

        let violations = load
            .base
            .iter()
            .zip(&load.remonte)
            .filter(|&(&below, &above)| {
                self.inventory.sku(above).unit_weight > self.inventory.sku(below).remonte_threshold
            })
            .count();
        b.pairing += violations as f64 * w.pairing;

        if load.remonte.len() < l.remonte_cap {
            b.remonte_shortfall += (l.remonte_cap - load.remonte.len()) as f64 * w.remonte_shortfall;
        }
        if load.pallet_count() < l.min_pallets {
            b.pallet_shortfall += (l.min_pallets - load.pallet_count()) as f64 * w.pallet_shortfall;
        }
    }

    /// Piecewise-linear: lenient up to the tolerance, steep beyond, and
    /// continuous at the kink.
    fn over_allocation(&self, excess: f64, required: f64) -> f64 {
        let w = self.weights;
        let tolerance = w.over_tolerance * required;
        if excess <= tolerance {
            excess * w.over_lenient
        } else {
            tolerance * w.over_lenient + (excess - tolerance) * w.over_steep
        }
    }
}

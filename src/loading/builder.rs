//! Greedy construction of a single load.

use super::config::LoadLimits;
use super::types::Load;
use crate::inventory::{Inventory, SkuId};

/// Builds one [`Load`] from an ordered pool of units.
///
/// The pool is consumed from its tail:
///
/// 1. Pop up to `base_cap` units into the base.
/// 2. Split what is left into light (`weight <= light_threshold`) and heavy
///    units, keeping pool order.
/// 3. For each base pallet in order, pop light units from the tail until
///    the remonte is full or no light unit is left. A popped unit is stacked
///    if it weighs no more than that base pallet's remonte threshold, and is
///    dropped from this build otherwise.
/// 4. Repeat step 3 with the heavy units.
///
/// The result depends only on the pool order; all randomness comes from the
/// caller's permutation. An empty pool yields an empty load.
#[derive(Debug, Clone, Copy)]
pub struct LoadBuilder<'a> {
    inventory: &'a Inventory,
    base_cap: usize,
    remonte_cap: usize,
    light_threshold: f64,
}

impl<'a> LoadBuilder<'a> {
    pub fn new(inventory: &'a Inventory, limits: &LoadLimits) -> Self {
        Self {
            inventory,
            base_cap: limits.base_cap,
            remonte_cap: limits.remonte_cap,
            light_threshold: limits.light_threshold,
        }
    }

    /// Builds a load from `pool`, consuming it.
    pub fn build(&self, mut pool: Vec<SkuId>) -> Load {
        let split = pool.len().saturating_sub(self.base_cap);
        let mut base = pool.split_off(split);
        base.reverse();

        let (light, heavy): (Vec<SkuId>, Vec<SkuId>) = pool
            .into_iter()
            .partition(|&id| self.weight(id) <= self.light_threshold);

        let mut remonte = Vec::with_capacity(self.remonte_cap.min(light.len() + heavy.len()));
        for mut candidates in [light, heavy] {
            self.stack(&base, &mut candidates, &mut remonte);
        }

        Load { base, remonte }
    }

    fn stack(&self, base: &[SkuId], candidates: &mut Vec<SkuId>, remonte: &mut Vec<SkuId>) {
        for &below in base {
            let threshold = self.inventory.sku(below).remonte_threshold;
            while remonte.len() < self.remonte_cap {
                let Some(unit) = candidates.pop() else {
                    break;
                };
                if self.weight(unit) <= threshold {
                    remonte.push(unit);
                }
            }
        }
    }

    fn weight(&self, id: SkuId) -> f64 {
        self.inventory.sku(id).unit_weight
    }
}

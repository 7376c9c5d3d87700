//! Loads and load plans.

use crate::ga::operators::{shuffle_indexes, two_point_crossover};
use crate::ga::Individual;
use crate::inventory::SkuId;
use rand::Rng;

/// Where a pallet sits inside a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    /// On the truck floor.
    Base,
    /// Stacked on top of a base pallet.
    Remonte,
}

/// One truck load.
///
/// `remonte[i]` is considered stacked on `base[i]`. List lengths never
/// exceed the configured caps when built by this crate; weight, volume and
/// stacking limits are only priced by the fitness function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Load {
    pub base: Vec<SkuId>,
    pub remonte: Vec<SkuId>,
}

impl Load {
    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.remonte.is_empty()
    }

    /// Total pallets, base and remonte.
    pub fn pallet_count(&self) -> usize {
        self.base.len() + self.remonte.len()
    }

    /// All units with their position, base first.
    pub fn units(&self) -> impl Iterator<Item = (Position, SkuId)> + '_ {
        self.base
            .iter()
            .map(|&id| (Position::Base, id))
            .chain(self.remonte.iter().map(|&id| (Position::Remonte, id)))
    }
}

/// A complete assignment of units to loads: the GA individual.
///
/// The cached fitness is dropped whenever the load sequence changes, so the
/// runner re-evaluates exactly the plans that were modified.
#[derive(Debug, Clone, Default)]
pub struct LoadPlan {
    loads: Vec<Load>,
    fitness: Option<f64>,
}

impl LoadPlan {
    pub fn new(loads: Vec<Load>) -> Self {
        Self {
            loads,
            fitness: None,
        }
    }

    pub fn loads(&self) -> &[Load] {
        &self.loads
    }

    /// Mutable access to the load sequence. Invalidates the fitness.
    pub fn loads_mut(&mut self) -> &mut Vec<Load> {
        self.fitness = None;
        &mut self.loads
    }

    pub fn into_loads(self) -> Vec<Load> {
        self.loads
    }

    /// Number of loads, empty ones included.
    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// Number of loads holding at least one pallet.
    pub fn non_empty_loads(&self) -> usize {
        self.loads.iter().filter(|l| !l.is_empty()).count()
    }

    /// Units used per SKU across all loads, indexed by [`SkuId::index`].
    pub fn unit_counts(&self, sku_count: usize) -> Vec<usize> {
        let mut counts = vec![0; sku_count];
        for (_, id) in self.loads.iter().flat_map(Load::units) {
            counts[id.index()] += 1;
        }
        counts
    }

    /// Two-point crossover of the load sequences of `self` and `other`.
    ///
    /// Whole loads are exchanged, so the children may carry duplicated or
    /// missing units. Returns `true` (and invalidates both) if anything moved.
    pub fn crossover_with<R: Rng>(&mut self, other: &mut LoadPlan, rng: &mut R) -> bool {
        let changed = two_point_crossover(&mut self.loads, &mut other.loads, rng);
        if changed {
            self.fitness = None;
            other.fitness = None;
        }
        changed
    }

    /// Reorders loads with per-position swap probability `indpb`. Load
    /// contents are untouched.
    pub fn shuffle_loads<R: Rng>(&mut self, indpb: f64, rng: &mut R) -> bool {
        let changed = shuffle_indexes(&mut self.loads, indpb, rng);
        if changed {
            self.fitness = None;
        }
        changed
    }
}

impl Individual for LoadPlan {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.fitness.unwrap_or(f64::INFINITY)
    }

    fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    fn invalidate(&mut self) {
        self.fitness = None;
    }
}

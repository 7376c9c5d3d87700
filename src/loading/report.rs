//! Tabular view of a load plan for export collaborators.

use super::types::{Load, Position};
use crate::inventory::Inventory;
use std::collections::BTreeMap;

/// One row of the per-load summary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadSummary {
    /// 1-based load number, counting non-empty loads only.
    pub load_index: usize,
    pub base_count: usize,
    pub remonte_count: usize,
    /// kg
    pub total_weight: f64,
    /// m³
    pub total_volume: f64,
}

/// One row of the detail table: all pallets of a SKU at one position of
/// one load.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadDetail {
    pub load_index: usize,
    pub sku: String,
    pub position: Position,
    pub quantity: usize,
    pub total_weight: f64,
    pub total_volume: f64,
}

/// Summary and detail tables of a plan.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanReport {
    pub summaries: Vec<LoadSummary>,
    /// Sorted by load, then SKU code, then position (base first).
    pub details: Vec<LoadDetail>,
}

impl PlanReport {
    /// Builds the tables for `loads`. Empty loads are skipped.
    pub fn new(inventory: &Inventory, loads: &[Load]) -> Self {
        let mut summaries = Vec::new();
        let mut details = Vec::new();

        for (i, load) in loads.iter().filter(|l| !l.is_empty()).enumerate() {
            let load_index = i + 1;
            let mut total_weight = 0.0;
            let mut total_volume = 0.0;
            let mut groups: BTreeMap<(&str, Position), (usize, f64, f64)> = BTreeMap::new();

            for (position, id) in load.units() {
                let sku = inventory.sku(id);
                total_weight += sku.unit_weight;
                total_volume += sku.unit_volume;

                let entry = groups
                    .entry((sku.code.as_str(), position))
                    .or_insert((0, 0.0, 0.0));
                entry.0 += 1;
                entry.1 += sku.unit_weight;
                entry.2 += sku.unit_volume;
            }

            summaries.push(LoadSummary {
                load_index,
                base_count: load.base.len(),
                remonte_count: load.remonte.len(),
                total_weight,
                total_volume,
            });
            details.extend(groups.into_iter().map(
                |((sku, position), (quantity, total_weight, total_volume))| LoadDetail {
                    load_index,
                    sku: sku.to_string(),
                    position,
                    quantity,
                    total_weight,
                    total_volume,
                },
            ));
        }

        Self { summaries, details }
    }

    /// Number of loads in the report.
    pub fn load_count(&self) -> usize {
        self.summaries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{SkuId, SkuRecord};

    fn inventory() -> Inventory {
        Inventory::from_records(vec![
            SkuRecord::new("B-2", 3, 200.0, 1.0, 500.0),
            SkuRecord::new("A-1", 2, 400.0, 2.0, 500.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_summary_and_grouped_details() {
        let inv = inventory();
        let loads = vec![
            Load {
                base: vec![SkuId(0), SkuId(1), SkuId(0)],
                remonte: vec![SkuId(0), SkuId(1)],
            },
            Load::default(),
        ];
        let report = PlanReport::new(&inv, &loads);

        assert_eq!(report.load_count(), 1);
        assert_eq!(
            report.summaries[0],
            LoadSummary {
                load_index: 1,
                base_count: 3,
                remonte_count: 2,
                total_weight: 1_400.0,
                total_volume: 7.0,
            }
        );

        let rows: Vec<(&str, Position, usize, f64)> = report
            .details
            .iter()
            .map(|d| (d.sku.as_str(), d.position, d.quantity, d.total_weight))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("A-1", Position::Base, 1, 400.0),
                ("A-1", Position::Remonte, 1, 400.0),
                ("B-2", Position::Base, 2, 400.0),
                ("B-2", Position::Remonte, 1, 200.0),
            ]
        );
    }

    #[test]
    fn test_load_numbers_skip_empty_loads() {
        let inv = inventory();
        let loads = vec![
            Load::default(),
            Load {
                base: vec![SkuId(1)],
                remonte: vec![],
            },
            Load {
                base: vec![SkuId(0)],
                remonte: vec![],
            },
        ];
        let report = PlanReport::new(&inv, &loads);
        let numbers: Vec<usize> = report.summaries.iter().map(|s| s.load_index).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(report.details[1].load_index, 2);
        assert_eq!(report.details[1].sku, "B-2");
    }

    #[test]
    fn test_empty_plan_empty_report() {
        let report = PlanReport::new(&inventory(), &[]);
        assert_eq!(report, PlanReport::default());
    }
}

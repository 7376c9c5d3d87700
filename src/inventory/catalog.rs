//! The validated, read-only SKU catalog.

use super::types::{Sku, SkuId, SkuRecord};
use crate::error::ValidationError;
use std::collections::HashMap;

pub(crate) const COL_SKU: &str = "sku";
pub(crate) const COL_QUANTITY: &str = "required_quantity";
pub(crate) const COL_WEIGHT: &str = "unit_weight";
pub(crate) const COL_VOLUME: &str = "unit_volume";
pub(crate) const COL_THRESHOLD: &str = "remonte_threshold";

/// Canonical column name and the spreadsheet headers accepted for it.
const COLUMNS: [(&str, &[&str]); 5] = [
    (COL_SKU, &[]),
    (COL_QUANTITY, &["paletes a expedir"]),
    (COL_WEIGHT, &["peso palete"]),
    (COL_VOLUME, &["m³ palete", "m3 palete"]),
    (COL_THRESHOLD, &["peso remonte"]),
];

/// Immutable SKU catalog.
///
/// Built once per run from validated input and shared read-only by the
/// builder, the initializer and the fitness evaluator.
///
/// ```
/// use u_loadplan::inventory::{Inventory, SkuRecord};
///
/// let inventory = Inventory::from_records(vec![
///     SkuRecord::new("A-100", 30, 300.0, 1.2, 400.0),
///     SkuRecord::new("B-200", 12, 500.0, 1.5, 0.0),
/// ])?;
/// assert_eq!(inventory.total_units(), 42);
/// assert_eq!(inventory.lookup("B-200").map(|s| s.unit_weight), Some(500.0));
/// # Ok::<(), u_loadplan::ValidationError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    skus: Vec<Sku>,
    index: HashMap<String, SkuId>,
}

impl Inventory {
    /// Validates typed records.
    ///
    /// Rejects empty codes, negative quantities or thresholds, non-positive
    /// weights or volumes, and duplicate codes.
    pub fn from_records<I>(records: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = SkuRecord>,
    {
        let mut inventory = Self::default();
        for (i, record) in records.into_iter().enumerate() {
            inventory.push(i + 1, record)?;
        }
        Ok(inventory)
    }

    /// Validates a raw table of strings.
    ///
    /// Headers are trimmed and lower-cased before matching, and the column
    /// names of the source spreadsheet (`paletes a expedir`, `peso palete`,
    /// `m³ palete`, `peso remonte`) are accepted as aliases. Extra columns
    /// are ignored. Rows whose cells are all blank are skipped.
    ///
    /// All required columns are checked before any row is read.
    pub fn from_table<H, R, C>(headers: &[H], rows: &[R]) -> Result<Self, ValidationError>
    where
        H: AsRef<str>,
        R: AsRef<[C]>,
        C: AsRef<str>,
    {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.as_ref().trim().to_lowercase())
            .collect();

        let mut positions = [0usize; 5];
        for (slot, (name, aliases)) in positions.iter_mut().zip(COLUMNS.iter()) {
            *slot = normalized
                .iter()
                .position(|h| h == name || aliases.contains(&h.as_str()))
                .ok_or(ValidationError::MissingColumn(*name))?;
        }
        let [sku_col, qty_col, weight_col, volume_col, threshold_col] = positions;

        let mut records = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let row_no = i + 1;
            let cells = row.as_ref();
            if cells.iter().all(|c| c.as_ref().trim().is_empty()) {
                continue;
            }
            if cells.len() != headers.len() {
                return Err(ValidationError::RowLength {
                    row: row_no,
                    expected: headers.len(),
                    found: cells.len(),
                });
            }

            let cell = |col: usize| cells[col].as_ref().trim();
            let quantity = parse_number(row_no, COL_QUANTITY, cell(qty_col))?;
            if quantity.fract() != 0.0 {
                return Err(ValidationError::Fractional {
                    row: row_no,
                    column: COL_QUANTITY,
                    value: quantity,
                });
            }

            records.push((
                row_no,
                SkuRecord {
                    sku: cell(sku_col).to_string(),
                    required_quantity: quantity as i64,
                    unit_weight: parse_number(row_no, COL_WEIGHT, cell(weight_col))?,
                    unit_volume: parse_number(row_no, COL_VOLUME, cell(volume_col))?,
                    remonte_threshold: parse_number(row_no, COL_THRESHOLD, cell(threshold_col))?,
                },
            ));
        }

        let mut inventory = Self::default();
        for (row_no, record) in records {
            inventory.push(row_no, record)?;
        }
        Ok(inventory)
    }

    fn push(&mut self, row: usize, record: SkuRecord) -> Result<(), ValidationError> {
        let code = record.sku.trim().to_string();
        if code.is_empty() {
            return Err(ValidationError::EmptySku { row });
        }
        if record.required_quantity < 0 {
            return Err(ValidationError::Negative {
                row,
                column: COL_QUANTITY,
                value: record.required_quantity as f64,
            });
        }
        for (column, value) in [
            (COL_WEIGHT, record.unit_weight),
            (COL_VOLUME, record.unit_volume),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ValidationError::NonPositive { row, column, value });
            }
        }
        if !(record.remonte_threshold >= 0.0) || !record.remonte_threshold.is_finite() {
            return Err(ValidationError::Negative {
                row,
                column: COL_THRESHOLD,
                value: record.remonte_threshold,
            });
        }
        if self.index.contains_key(&code) {
            return Err(ValidationError::DuplicateSku { row, sku: code });
        }

        let id = SkuId(self.skus.len());
        self.index.insert(code.clone(), id);
        self.skus.push(Sku {
            code,
            required_quantity: record.required_quantity as usize,
            unit_weight: record.unit_weight,
            unit_volume: record.unit_volume,
            remonte_threshold: record.remonte_threshold,
        });
        Ok(())
    }

    /// Looks a SKU up by its external code.
    pub fn lookup(&self, code: &str) -> Option<&Sku> {
        self.id_of(code).map(|id| self.sku(id))
    }

    /// Resolves an external code to its id.
    pub fn id_of(&self, code: &str) -> Option<SkuId> {
        self.index.get(code).copied()
    }

    /// Returns the SKU behind `id`.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this inventory.
    pub fn sku(&self, id: SkuId) -> &Sku {
        &self.skus[id.0]
    }

    /// Number of distinct SKUs.
    pub fn len(&self) -> usize {
        self.skus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skus.is_empty()
    }

    /// Iterates the catalog in input order.
    pub fn iter(&self) -> impl Iterator<Item = (SkuId, &Sku)> {
        self.skus.iter().enumerate().map(|(i, s)| (SkuId(i), s))
    }

    /// Sum of required quantities over all SKUs.
    pub fn total_units(&self) -> usize {
        self.skus.iter().map(|s| s.required_quantity).sum()
    }

    /// One unit per required pallet, grouped by SKU in catalog order.
    pub fn units(&self) -> Vec<SkuId> {
        let mut units = Vec::with_capacity(self.total_units());
        for (id, sku) in self.iter() {
            units.extend(std::iter::repeat(id).take(sku.required_quantity));
        }
        units
    }
}

fn parse_number(row: usize, column: &'static str, raw: &str) -> Result<f64, ValidationError> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::NonNumeric {
            row,
            column,
            value: raw.to_string(),
        }),
    }
}

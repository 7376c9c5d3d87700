//! Catalog value types.

/// Dense handle of a SKU inside one [`Inventory`](super::Inventory).
///
/// A pallet unit is represented by the `SkuId` of its SKU, so pools and
/// loads are plain `Vec<SkuId>`. Ids are only meaningful for the inventory
/// that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkuId(pub usize);

impl SkuId {
    /// Position of the SKU in its catalog.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A validated stock-keeping unit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sku {
    /// External SKU code.
    pub code: String,
    /// Number of pallets that must ship.
    pub required_quantity: usize,
    /// Weight of one pallet, kg. Always positive.
    pub unit_weight: f64,
    /// Volume of one pallet, m³. Always positive.
    pub unit_volume: f64,
    /// Heaviest pallet (kg) that may be stacked on top of a pallet of this SKU.
    pub remonte_threshold: f64,
}

/// One unvalidated input row.
///
/// With the `serde` feature the column names of the source spreadsheet are
/// accepted as aliases.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkuRecord {
    pub sku: String,
    #[cfg_attr(feature = "serde", serde(alias = "paletes a expedir"))]
    pub required_quantity: i64,
    #[cfg_attr(feature = "serde", serde(alias = "peso palete"))]
    pub unit_weight: f64,
    #[cfg_attr(feature = "serde", serde(alias = "m³ palete"))]
    pub unit_volume: f64,
    #[cfg_attr(feature = "serde", serde(alias = "peso remonte"))]
    pub remonte_threshold: f64,
}

impl SkuRecord {
    pub fn new(
        sku: impl Into<String>,
        required_quantity: i64,
        unit_weight: f64,
        unit_volume: f64,
        remonte_threshold: f64,
    ) -> Self {
        Self {
            sku: sku.into(),
            required_quantity,
            unit_weight,
            unit_volume,
            remonte_threshold,
        }
    }
}

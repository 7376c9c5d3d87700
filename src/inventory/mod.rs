//! Inventory catalog.
//!
//! [`Inventory`] is the validated SKU table a planning run works from:
//! per-unit weight and volume, remonte threshold and required quantity.
//! It is built once, before any optimization, and never changes afterwards.

mod catalog;
mod types;

pub use catalog::Inventory;
pub use types::{Sku, SkuId, SkuRecord};

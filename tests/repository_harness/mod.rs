//! Shared test harness for repository backend testing
//!
//! Provides catalogue fixtures and the `catalogue_repository_tests!` macro.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod repository_harness;
//! use repository_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod contract_tests;

use catalogue::catalogue::CatalogueItem;

/// Create an unsaved item with a sku derived from `name`
pub fn item(name: &str, price: f64) -> CatalogueItem {
    CatalogueItem::new(format!("SKU-{}", name.to_uppercase()), name, price)
}

/// A batch of `n` distinct unsaved items
pub fn sample_batch(n: usize) -> Vec<CatalogueItem> {
    (0..n)
        .map(|i| {
            CatalogueItem::new(format!("SKU-{:03}", i), format!("Item {}", i), i as f64 * 1.5)
                .with_inventory(i as i32)
        })
        .collect()
}

/// Items whose natural keys give a known order:
/// by price ascending: Bolt, Nut, Widget, Gadget; by name: Bolt, Gadget, Nut, Widget
pub fn priced_items() -> Vec<CatalogueItem> {
    vec![
        item("Widget", 9.5).with_category("tools"),
        item("Bolt", 0.25).with_category("hardware"),
        item("Gadget", 24.0).with_category("tools"),
        item("Nut", 0.5).with_category("hardware"),
    ]
}

/// Names of `items`, in order
pub fn names(items: &[CatalogueItem]) -> Vec<&str> {
    items.iter().map(|i| i.name.as_str()).collect()
}

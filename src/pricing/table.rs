//! Pricing engine.
//!
//! `compute_price` is a pure function of `(configuration, catalog, table)`.
//! The table is data-driven and deserializable so pricing policy changes are
//! data edits, not code edits. Only priced deltas are itemized; zero-value
//! lines never appear.

use std::collections::BTreeMap;

use crate::catalog::model::SuitCatalog;
use crate::config::state::Configuration;

fn default_base() -> u32 {
    390
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Flat surcharge table. All values in whole currency units.
pub struct PriceTable {
    /// Base price used when a style has no dedicated entry.
    #[serde(default = "default_base")]
    pub default_base: u32,
    /// Per-style base prices.
    #[serde(default)]
    pub base_by_style: BTreeMap<String, u32>,
    /// Flat premium for a peak lapel.
    pub peak_lapel: u32,
    /// Width add-on at medium width (peak lapels).
    pub lapel_width_medium: u32,
    /// Width add-on at wide width (peak lapels).
    pub lapel_width_wide: u32,
    /// Surcharge for a notch lapel at wide width only.
    pub notch_wide: u32,
    /// Surcharge for patch pockets.
    pub patch_pocket: u32,
    /// Surcharge for a contrast interior.
    pub contrast_interior: u32,
    /// Surcharge for a cuffed hem.
    pub cuffed_hem: u32,
    /// Breast pocket surcharge. Explicit zero, reserved for future tiers.
    pub breast_pocket: u32,
}

impl Default for PriceTable {
    fn default() -> Self {
        let mut base_by_style = BTreeMap::new();
        base_by_style.insert("single_2btn".to_string(), 390);
        base_by_style.insert("single_3btn".to_string(), 420);
        base_by_style.insert("double_6btn".to_string(), 460);
        Self {
            default_base: default_base(),
            base_by_style,
            peak_lapel: 30,
            lapel_width_medium: 10,
            lapel_width_wide: 25,
            notch_wide: 15,
            patch_pocket: 20,
            contrast_interior: 35,
            cuffed_hem: 15,
            breast_pocket: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One itemized price delta. Always positive.
pub struct LineItem {
    /// Human-readable label.
    pub label: String,
    /// Price delta in whole currency units.
    pub price: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Itemized quote. `total` equals the sum of `items[].price`.
pub struct Quote {
    /// Total price.
    pub total: u32,
    /// Non-zero line items only.
    pub items: Vec<LineItem>,
}

fn push_item(items: &mut Vec<LineItem>, label: impl Into<String>, price: u32) {
    if price > 0 {
        items.push(LineItem {
            label: label.into(),
            price,
        });
    }
}

/// Price the current configuration against the catalog and table.
///
/// An unknown style id yields an empty quote rather than an error.
pub fn compute_price(
    config: &Configuration,
    catalog: &SuitCatalog,
    table: &PriceTable,
) -> Quote {
    let Some(model) = catalog.style(&config.style_id) else {
        return Quote::default();
    };

    let mut items = Vec::new();

    let base = table
        .base_by_style
        .get(&model.id)
        .copied()
        .unwrap_or(table.default_base);
    push_item(&mut items, model.name.clone(), base);

    if let Some(lapel_id) = config.lapel_id.as_deref()
        && let Some(lapel) = model.lapel(lapel_id)
    {
        let width_id = config
            .lapel_width_id
            .as_deref()
            .and_then(|w| lapel.width(w))
            .or_else(|| lapel.default_width())
            .map(|w| w.id.as_str());

        match lapel.id.as_str() {
            "peak" => {
                push_item(&mut items, format!("{} lapel", lapel.name), table.peak_lapel);
                let width_price = match width_id {
                    Some("medium") => table.lapel_width_medium,
                    Some("wide") => table.lapel_width_wide,
                    _ => 0,
                };
                push_item(&mut items, "Lapel width", width_price);
            }
            "notch" => {
                if width_id == Some("wide") {
                    push_item(&mut items, "Wide notch lapel", table.notch_wide);
                }
            }
            _ => {}
        }
    }

    if let Some(pocket_id) = config.pocket_id.as_deref()
        && let Some(pocket) = model.pocket(pocket_id)
        && pocket.id == "patch"
    {
        push_item(&mut items, format!("{} pockets", pocket.name), table.patch_pocket);
    }

    // The first interior option is implicitly active when none is chosen.
    let interior = config
        .interior_id
        .as_deref()
        .and_then(|id| model.interior(id))
        .or_else(|| model.interiors.first());
    if let Some(interior) = interior
        && interior.id == "contrast"
    {
        push_item(&mut items, interior.name.clone(), table.contrast_interior);
    }

    if let Some(cuff_id) = config.cuff_id.as_deref()
        && let Some(cuff) = model.cuff(cuff_id)
        && cuff.id == "cuffed"
    {
        push_item(&mut items, cuff.name.clone(), table.cuffed_hem);
    }

    // Breast pocket: explicit zero in the current table, so never itemized.
    if config.breast_pocket_id.is_some() {
        push_item(&mut items, "Breast pocket", table.breast_pocket);
    }

    let total = items.iter().map(|i| i.price).sum();
    Quote { total, items }
}

#[cfg(test)]
#[path = "../../tests/unit/pricing/table.rs"]
mod tests;

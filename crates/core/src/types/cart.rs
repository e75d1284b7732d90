//! Cart line items and their identity key.
//!
//! A line item is identified by the triple `(product, color, size)`. An absent
//! colour or size is its own value: a line with no colour never matches a
//! lookup for `"red"`, and vice versa.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Identity of a cart line: product plus optional variant selectors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: ProductId,
    pub color: Option<String>,
    pub size: Option<String>,
}

impl LineKey {
    /// Create a key from borrowed variant selectors.
    #[must_use]
    pub fn new(product_id: ProductId, color: Option<&str>, size: Option<&str>) -> Self {
        Self {
            product_id,
            color: color.map(str::to_owned),
            size: size.map(str::to_owned),
        }
    }

    /// Key for a product with no variant selected.
    #[must_use]
    pub const fn product(product_id: ProductId) -> Self {
        Self {
            product_id,
            color: None,
            size: None,
        }
    }
}

/// One entry in the cart.
///
/// Serialized with the field names the storefront has always used
/// (`id`, `quantity`, `color`, `size`, `addedAt`) so stored carts stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    /// First insertion time; quantity changes leave it alone.
    #[serde(default = "Utc::now")]
    pub added_at: DateTime<Utc>,
}

impl CartLineItem {
    /// Create a line item for `key`.
    #[must_use]
    pub fn new(key: LineKey, quantity: u32, added_at: DateTime<Utc>) -> Self {
        Self {
            product_id: key.product_id,
            quantity,
            color: key.color,
            size: key.size,
            added_at,
        }
    }

    /// Whether this line is the one identified by `key`.
    #[must_use]
    pub fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.color == key.color && self.size == key.size
    }

    /// The identity key of this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id,
            color: self.color.clone(),
            size: self.size.clone(),
        }
    }

    /// Human-readable variant label, e.g. `"Red / M"`.
    ///
    /// Returns `None` when neither selector is set.
    #[must_use]
    pub fn variant_label(&self) -> Option<String> {
        match (self.color.as_deref(), self.size.as_deref()) {
            (None, None) => None,
            (Some(color), None) => Some(color.to_owned()),
            (None, Some(size)) => Some(size.to_owned()),
            (Some(color), Some(size)) => Some(format!("{color} / {size}")),
        }
    }
}

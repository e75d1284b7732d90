//! Catalog document types and queries.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use loom_lane_core::{Price, ProductId};

use super::CatalogError;

/// Minimum trimmed query length before live search runs.
pub const MIN_SEARCH_LEN: usize = 2;

/// The catalog document: `{ "products": [...], "categories": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub products: Vec<Product>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// A product as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub original_price: Option<Decimal>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reviews: u32,
    /// A product without the flag is treated as unavailable.
    #[serde(default, deserialize_with = "null_as_default")]
    pub in_stock: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured: bool,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub colors: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sizes: Vec<String>,
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Missing and `null` both mean the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Parse each entry on its own, dropping the ones that don't fit.
fn parse_entries<T: DeserializeOwned>(kind: &'static str, entries: Vec<Value>) -> Vec<T> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(kind, index, error = %e, "Skipping malformed catalog entry");
                None
            }
        })
        .collect()
}

/// A truncated set of search matches plus the full match count.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPreview<'a> {
    pub products: Vec<&'a Product>,
    pub total: usize,
}

impl SearchPreview<'_> {
    /// Whether matches were cut off ("View all N results").
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.total > self.products.len()
    }
}

impl Product {
    /// Current price for display.
    #[must_use]
    pub const fn display_price(&self) -> Price {
        Price::lkr(self.price)
    }

    /// Percentage saved against the original price, rounded to the nearest
    /// whole percent.
    ///
    /// Returns `None` without a positive original price.
    #[must_use]
    pub fn discount_percent(&self) -> Option<i64> {
        let original = self.original_price.filter(|p| p.is_sign_positive() && !p.is_zero())?;
        let percent = (original - self.price) / original * Decimal::ONE_HUNDRED;
        percent.round().to_i64()
    }

    fn matches_term(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term)
            || self.category.to_lowercase().contains(term)
            || self.description.to_lowercase().contains(term)
    }
}

impl Catalog {
    /// Parse a catalog document.
    ///
    /// Products and categories are read one by one: an entry that fails to
    /// parse (no `name`, a non-numeric `price`) is logged and skipped so the
    /// rest of the catalog stays usable.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for invalid JSON and
    /// `CatalogError::InvalidShape` if `products` is missing or not an array.
    pub fn from_json(bytes: &[u8]) -> Result<Self, CatalogError> {
        let mut value: Value = serde_json::from_slice(bytes)?;
        let Some(Value::Array(products)) = value.get_mut("products").map(Value::take) else {
            return Err(CatalogError::InvalidShape(
                "products array not found".to_string(),
            ));
        };
        let categories = match value.get_mut("categories").map(Value::take) {
            Some(Value::Array(categories)) => categories,
            _ => Vec::new(),
        };
        Ok(Self {
            products: parse_entries("product", products),
            categories: parse_entries("category", categories),
        })
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products flagged for the homepage carousel.
    #[must_use]
    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.featured).collect()
    }

    /// Products in a category (case-insensitive name match).
    #[must_use]
    pub fn in_category(&self, name: &str) -> Vec<&Product> {
        let name = name.trim();
        self.products
            .iter()
            .filter(|p| p.category.eq_ignore_ascii_case(name))
            .collect()
    }

    /// Case-insensitive substring search over name, category and description.
    ///
    /// A blank query matches nothing.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let term = query.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }
        self.products
            .iter()
            .filter(|p| p.matches_term(&term))
            .collect()
    }

    /// Live-search preview: the first `limit` matches and the total count.
    ///
    /// Returns `None` for queries shorter than [`MIN_SEARCH_LEN`].
    #[must_use]
    pub fn search_preview(&self, query: &str, limit: usize) -> Option<SearchPreview<'_>> {
        if query.trim().chars().count() < MIN_SEARCH_LEN {
            return None;
        }
        let mut products = self.search(query);
        let total = products.len();
        products.truncate(limit);
        Some(SearchPreview { products, total })
    }
}

//! The cart store: authoritative line items plus their persisted copy.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, error, warn};

use loom_lane_core::{CartLineItem, LineKey};

use super::{AddToCartError, CartObserver};
use crate::catalog::{Catalog, CatalogError, CatalogSource, Product};
use crate::storage::{Storage, StorageError};

/// Storage key for the cart, shared with carts saved by the browser storefront.
pub const CART_STORAGE_KEY: &str = "loomLaneCart";

/// Owns the cart's line items and keeps durable storage in step with them.
///
/// The store is loaded once when opened. Each mutation rewrites the whole
/// serialized cart. If that write fails the error is logged and returned, but
/// the in-memory cart keeps the mutation; memory and storage then differ
/// until the next successful write.
pub struct CartStore<S> {
    storage: S,
    key: String,
    items: Vec<CartLineItem>,
    observers: Vec<Box<dyn CartObserver>>,
}

impl<S: Storage> CartStore<S> {
    /// Open the cart persisted under [`CART_STORAGE_KEY`].
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, CART_STORAGE_KEY)
    }

    /// Open the cart persisted under `key`.
    pub fn open_with_key(storage: S, key: impl Into<String>) -> Self {
        let mut store = Self {
            storage,
            key: key.into(),
            items: Vec::new(),
            observers: Vec::new(),
        };
        store.items = store.load();
        store
    }

    /// Read the persisted cart.
    ///
    /// Missing, unreadable or malformed data yields an empty cart; the cause
    /// is logged and not surfaced. Zero-quantity lines are dropped and
    /// duplicate keys merged so the loaded cart upholds the store's invariants.
    #[must_use]
    pub fn load(&self) -> Vec<CartLineItem> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Error loading cart");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<CartLineItem>>(&raw) {
            Ok(items) => {
                let items = normalize(items);
                debug!(key = %self.key, lines = items.len(), "Loaded cart");
                items
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Discarding malformed cart");
                Vec::new()
            }
        }
    }

    /// Register an observer called after every mutation.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Add `quantity` of the line identified by `key`.
    ///
    /// An existing line's quantity grows (saturating at `u32::MAX`) and keeps
    /// its position; a new line is appended with `added_at` set to now. Adding
    /// zero does nothing. No catalog check is made; see
    /// [`add_available`](Self::add_available).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart could not be persisted. The line is
    /// added in memory regardless.
    pub fn add_item(&mut self, key: LineKey, quantity: u32) -> Result<(), StorageError> {
        if quantity == 0 {
            return Ok(());
        }

        if let Some(item) = self.items.iter_mut().find(|item| item.matches(&key)) {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartLineItem::new(key, quantity, Utc::now()));
        }

        self.save()
    }

    /// Add a line after checking it against `catalog`.
    ///
    /// Rejects unknown and out-of-stock products without touching the cart.
    ///
    /// # Errors
    ///
    /// Returns `AddToCartError::NotFound` or `AddToCartError::OutOfStock`
    /// before any change. Returns `AddToCartError::Storage` if the cart could
    /// not be persisted; as with [`add_item`](Self::add_item) the line is
    /// added in memory regardless.
    pub fn add_available<'c>(
        &mut self,
        catalog: &'c Catalog,
        key: LineKey,
        quantity: u32,
    ) -> Result<&'c Product, AddToCartError> {
        let product = catalog
            .find(key.product_id)
            .ok_or(AddToCartError::NotFound(key.product_id))?;

        if !product.in_stock {
            return Err(AddToCartError::OutOfStock(key.product_id));
        }

        self.add_item(key, quantity)?;
        Ok(product)
    }

    /// Delete the line identified by `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart could not be persisted.
    pub fn remove_item(&mut self, key: &LineKey) -> Result<(), StorageError> {
        self.items.retain(|item| !item.matches(key));
        self.save()
    }

    /// Set the quantity of the line identified by `key`.
    ///
    /// A quantity of zero or less removes the line. A positive quantity for a
    /// line that is not in the cart does nothing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart could not be persisted.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) -> Result<(), StorageError> {
        if quantity <= 0 {
            return self.remove_item(key);
        }

        let Some(item) = self.items.iter_mut().find(|item| item.matches(key)) else {
            return Ok(());
        };
        item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        self.save()
    }

    /// Current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the empty cart could not be persisted.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.items.clear();
        self.save()
    }

    /// Cart total priced against an already-fetched catalog.
    ///
    /// Lines whose product is missing from the catalog contribute nothing.
    #[must_use]
    pub fn total_with(&self, catalog: &Catalog) -> Decimal {
        total_for(&self.items, catalog)
    }

    /// Fetch the catalog and price the cart.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the catalog cannot be fetched or parsed.
    pub async fn try_cart_total<C: CatalogSource>(
        &self,
        source: &C,
    ) -> Result<Decimal, CatalogError> {
        let catalog = source.fetch().await?;
        Ok(self.total_with(&catalog))
    }

    /// Fetch the catalog and price the cart, falling back to zero.
    ///
    /// Catalog failures are logged and yield `0`.
    pub async fn cart_total<C: CatalogSource>(&self, source: &C) -> Decimal {
        match self.try_cart_total(source).await {
            Ok(total) => total,
            Err(e) => {
                error!(error = %e, "Error calculating cart total");
                Decimal::ZERO
            }
        }
    }

    /// Persist the full cart, then notify observers.
    fn save(&self) -> Result<(), StorageError> {
        let result = serde_json::to_string(&self.items)
            .map_err(StorageError::from)
            .and_then(|json| self.storage.set_item(&self.key, &json));

        if let Err(e) = &result {
            error!(key = %self.key, error = %e, "Error saving cart");
        }

        for observer in &self.observers {
            observer.cart_changed(&self.items);
        }

        result
    }
}

/// Sum `price * quantity` over lines with a catalog match.
pub(super) fn total_for(items: &[CartLineItem], catalog: &Catalog) -> Decimal {
    items
        .iter()
        .filter_map(|item| {
            catalog
                .find(item.product_id)
                .map(|product| product.price * Decimal::from(item.quantity))
        })
        .sum()
}

/// Drop empty lines and merge duplicate keys into their first occurrence.
fn normalize(items: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut merged: Vec<CartLineItem> = Vec::with_capacity(items.len());
    for item in items.into_iter().filter(|item| item.quantity > 0) {
        let key = item.key();
        if let Some(existing) = merged.iter_mut().find(|m| m.matches(&key)) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            merged.push(item);
        }
    }
    merged
}

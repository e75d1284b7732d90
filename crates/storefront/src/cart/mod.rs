//! Shopping cart.
//!
//! # Architecture
//!
//! - [`CartStore`] owns the line items and persists the full list after
//!   every mutation (no dirty tracking, no batching)
//! - [`CartService`] wraps a store with a catalog source and a notifier:
//!   it validates adds against the catalog and raises user notifications
//! - [`CartView`] is the cart page model (titles, variant labels, prices)
//!
//! Nothing here panics or aborts on expected failures. Storage and catalog
//! errors are logged and returned as typed errors, while the store keeps
//! the in-memory state the caller asked for.

mod service;
mod store;
mod view;

pub use service::CartService;
pub use store::{CART_STORAGE_KEY, CartStore};
pub use view::{CartItemView, CartView};

use loom_lane_core::{CartLineItem, ProductId};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::notify::Notification;
use crate::storage::StorageError;

/// Reasons an add-to-cart request failed.
///
/// Every variant except `Storage` leaves the cart unchanged. `Storage` means
/// the line was added in memory but could not be saved.
#[derive(Debug, Error)]
pub enum AddToCartError {
    /// No catalog entry has this ID.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// The catalog marks the product unavailable.
    #[error("Product out of stock: {0}")]
    OutOfStock(ProductId),

    /// The catalog could not be fetched.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The cart could not be saved after the add.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AddToCartError {
    /// The message shown to the shopper for this rejection.
    #[must_use]
    pub fn notification(&self) -> Notification {
        match self {
            Self::NotFound(_) => Notification::error("Error", "Product not found"),
            Self::OutOfStock(_) => {
                Notification::error("Out of Stock", "This product is currently unavailable")
            }
            Self::Catalog(_) | Self::Storage(_) => {
                Notification::error("Error", "Failed to add product to cart")
            }
        }
    }
}

/// Notified with the full cart contents after every mutation.
///
/// Used for the cart-count badge and for re-rendering the cart page.
pub trait CartObserver: Send + Sync {
    fn cart_changed(&self, items: &[CartLineItem]);
}

impl<F> CartObserver for F
where
    F: Fn(&[CartLineItem]) + Send + Sync,
{
    fn cart_changed(&self, items: &[CartLineItem]) {
        self(items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loom_lane_core::NotificationKind;

    #[test]
    fn test_add_to_cart_error_notifications() {
        let n = AddToCartError::NotFound(ProductId::new(999)).notification();
        assert_eq!(n.title, "Error");
        assert_eq!(n.body, "Product not found");
        assert_eq!(n.kind, NotificationKind::Error);

        let n = AddToCartError::OutOfStock(ProductId::new(2)).notification();
        assert_eq!(n.title, "Out of Stock");

        let n = AddToCartError::Catalog(CatalogError::Status { status: 500 }).notification();
        assert_eq!(n.body, "Failed to add product to cart");

        let n = AddToCartError::Storage(StorageError::Poisoned).notification();
        assert_eq!(n.body, "Failed to add product to cart");
        assert_eq!(n.kind, NotificationKind::Error);
    }

    #[test]
    fn test_add_to_cart_error_display() {
        let err = AddToCartError::NotFound(ProductId::new(999));
        assert_eq!(err.to_string(), "Product not found: 999");
    }
}

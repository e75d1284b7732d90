//! Cart actions as the storefront pages perform them.

use rust_decimal::Decimal;
use tracing::{instrument, warn};

use loom_lane_core::LineKey;

use super::{AddToCartError, CartStore, CartView};
use crate::catalog::{CatalogError, CatalogSource};
use crate::notify::{Notification, Notifier};
use crate::storage::{Storage, StorageError};

/// A cart store bundled with the catalog it is priced against and the
/// surface user notifications go to.
pub struct CartService<S, C, N> {
    store: CartStore<S>,
    catalog: C,
    notifier: N,
}

impl<S, C, N> CartService<S, C, N>
where
    S: Storage,
    C: CatalogSource,
    N: Notifier,
{
    #[must_use]
    pub const fn new(store: CartStore<S>, catalog: C, notifier: N) -> Self {
        Self {
            store,
            catalog,
            notifier,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &CartStore<S> {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut CartStore<S> {
        &mut self.store
    }

    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Add a product after checking the catalog, and tell the shopper.
    ///
    /// Adding zero units checks the product but changes nothing and raises
    /// no confirmation.
    ///
    /// # Errors
    ///
    /// Returns `AddToCartError` if the catalog cannot be fetched, the product
    /// is unknown or out of stock, or the cart could not be saved. An error
    /// notification has been raised. Only a failed save leaves the line in
    /// the in-memory cart.
    #[instrument(skip(self), fields(product_id = %key.product_id))]
    pub async fn add_to_cart(
        &mut self,
        key: LineKey,
        quantity: u32,
    ) -> Result<(), AddToCartError> {
        let result = match self.catalog.fetch().await {
            Ok(catalog) => self
                .store
                .add_available(&catalog, key, quantity)
                .map(|product| product.name.clone()),
            Err(e) => Err(AddToCartError::from(e)),
        };

        match result {
            Ok(_) if quantity == 0 => Ok(()),
            Ok(name) => {
                self.notifier.notify(Notification::success(
                    "Added to Cart!",
                    format!("{name} has been added to your cart"),
                ));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Add to cart rejected");
                self.notifier.notify(e.notification());
                Err(e)
            }
        }
    }

    /// Remove a line and confirm it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart could not be persisted. The line is
    /// gone from memory and the confirmation is raised regardless.
    #[instrument(skip(self), fields(product_id = %key.product_id))]
    pub fn remove_from_cart(&mut self, key: &LineKey) -> Result<(), StorageError> {
        let result = self.store.remove_item(key);
        self.notifier
            .notify(Notification::success("Removed", "Product removed from cart"));
        result
    }

    /// Set a line's quantity. Zero or less removes it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart could not be persisted.
    #[instrument(skip(self), fields(product_id = %key.product_id))]
    pub fn update_cart_quantity(
        &mut self,
        key: &LineKey,
        quantity: i64,
    ) -> Result<(), StorageError> {
        self.store.update_quantity(key, quantity)
    }

    /// Empty the cart and confirm it.
    ///
    /// Asking the shopper first is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the empty cart could not be persisted.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) -> Result<(), StorageError> {
        let result = self.store.clear();
        self.notifier.notify(Notification::success(
            "Cart Cleared",
            "All items have been removed from your cart",
        ));
        result
    }

    /// Cart total; zero if the catalog is unavailable.
    pub async fn cart_total(&self) -> Decimal {
        self.store.cart_total(&self.catalog).await
    }

    /// Build the cart page model.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the catalog cannot be fetched.
    #[instrument(skip(self))]
    pub async fn cart_view(&self) -> Result<CartView, CatalogError> {
        if self.store.is_empty() {
            return Ok(CartView::empty());
        }
        let catalog = self.catalog.fetch().await?;
        Ok(CartView::build(self.store.items(), &catalog))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use loom_lane_core::{NotificationKind, ProductId};

    use crate::catalog::{Catalog, FileCatalog};
    use crate::notify::RecordingNotifier;
    use crate::storage::MemoryStorage;

    fn catalog() -> Catalog {
        Catalog::from_json(
            br#"{"products":[
                {"id":1,"name":"Handloom Saree","price":12500,"inStock":true},
                {"id":2,"name":"Linen Shirt","price":4500,"inStock":false}
            ]}"#,
        )
        .unwrap()
    }

    fn service(
        notifier: &RecordingNotifier,
    ) -> CartService<MemoryStorage, Catalog, &RecordingNotifier> {
        CartService::new(CartStore::open(MemoryStorage::new()), catalog(), notifier)
    }

    #[tokio::test]
    async fn test_add_to_cart_success_notifies() {
        let notifier = RecordingNotifier::new();
        let mut service = service(&notifier);

        service
            .add_to_cart(LineKey::new(ProductId::new(1), Some("Red"), None), 1)
            .await
            .unwrap();

        assert_eq!(service.store().count(), 1);
        let n = notifier.last().unwrap();
        assert_eq!(n.title, "Added to Cart!");
        assert_eq!(n.body, "Handloom Saree has been added to your cart");
        assert_eq!(n.kind, NotificationKind::Success);
    }

    #[tokio::test]
    async fn test_add_zero_is_silent() {
        let notifier = RecordingNotifier::new();
        let mut service = service(&notifier);

        service
            .add_to_cart(LineKey::product(ProductId::new(1)), 0)
            .await
            .unwrap();

        assert!(service.store().is_empty());
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_add_with_failed_save_reports_error() {
        let notifier = RecordingNotifier::new();
        let mut service = CartService::new(
            CartStore::open(MemoryStorage::with_quota(16)),
            catalog(),
            &notifier,
        );

        let err = service
            .add_to_cart(LineKey::product(ProductId::new(1)), 1)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AddToCartError::Storage(StorageError::QuotaExceeded { .. })
        ));
        // Kept in memory, not confirmed to the shopper
        assert_eq!(service.store().count(), 1);
        let n = notifier.last().unwrap();
        assert_eq!(n.body, "Failed to add product to cart");
        assert_eq!(n.kind, NotificationKind::Error);
        assert!(
            notifier
                .notifications()
                .iter()
                .all(|n| n.title != "Added to Cart!")
        );
    }

    #[tokio::test]
    async fn test_add_unknown_product_leaves_cart() {
        let notifier = RecordingNotifier::new();
        let mut service = service(&notifier);

        let err = service
            .add_to_cart(LineKey::product(ProductId::new(999)), 1)
            .await
            .unwrap_err();

        assert!(matches!(err, AddToCartError::NotFound(_)));
        assert!(service.store().is_empty());
        let n = notifier.last().unwrap();
        assert_eq!((n.title.as_str(), n.body.as_str()), ("Error", "Product not found"));
        assert_eq!(n.kind, NotificationKind::Error);
    }

    #[tokio::test]
    async fn test_add_out_of_stock() {
        let notifier = RecordingNotifier::new();
        let mut service = service(&notifier);

        let err = service
            .add_to_cart(LineKey::product(ProductId::new(2)), 1)
            .await
            .unwrap_err();

        assert!(matches!(err, AddToCartError::OutOfStock(_)));
        assert_eq!(notifier.last().unwrap().title, "Out of Stock");
    }

    #[tokio::test]
    async fn test_add_with_broken_catalog() {
        let notifier = RecordingNotifier::new();
        let source = FileCatalog::new("/nonexistent/loom-lane/products.json".into());
        let mut service =
            CartService::new(CartStore::open(MemoryStorage::new()), source, &notifier);

        let err = service
            .add_to_cart(LineKey::product(ProductId::new(1)), 1)
            .await
            .unwrap_err();

        assert!(matches!(err, AddToCartError::Catalog(_)));
        assert_eq!(
            notifier.last().unwrap().body,
            "Failed to add product to cart"
        );
        assert_eq!(service.cart_total().await, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_remove_update_clear() {
        let notifier = RecordingNotifier::new();
        let mut service = service(&notifier);
        let key = LineKey::product(ProductId::new(1));

        service.add_to_cart(key.clone(), 2).await.unwrap();
        service.update_cart_quantity(&key, 5).unwrap();
        assert_eq!(service.store().count(), 5);
        assert_eq!(service.cart_total().await, Decimal::new(62_500, 0));

        service.remove_from_cart(&key).unwrap();
        assert!(service.store().is_empty());
        assert_eq!(notifier.last().unwrap().title, "Removed");

        service.add_to_cart(key, 1).await.unwrap();
        service.clear_cart().unwrap();
        assert!(service.store().is_empty());
        assert_eq!(
            notifier.last().unwrap().body,
            "All items have been removed from your cart"
        );
    }

    #[tokio::test]
    async fn test_cart_view() {
        let notifier = RecordingNotifier::new();
        let mut service = service(&notifier);
        assert_eq!(service.cart_view().await.unwrap(), CartView::empty());

        service
            .add_to_cart(LineKey::product(ProductId::new(1)), 2)
            .await
            .unwrap();
        let view = service.cart_view().await.unwrap();
        assert_eq!(view.subtotal, "LKR 25,000");
        assert_eq!(view.item_count, 2);
    }
}

//! Command implementations.
//!
//! Commands print their results on stdout; diagnostics and notifications go
//! through `tracing` on stderr.

pub mod cart;
pub mod products;

use loom_lane_core::CartLineItem;
use loom_lane_storefront::cart::{CartService, CartStore};
use loom_lane_storefront::catalog::ConfiguredCatalog;
use loom_lane_storefront::config::StorefrontConfig;
use loom_lane_storefront::notify::LogNotifier;
use loom_lane_storefront::storage::FileStorage;

/// The cart service the CLI works with.
pub type CliCartService = CartService<FileStorage, ConfiguredCatalog, LogNotifier>;

/// Open the catalog source described by the configuration.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn open_catalog(config: &StorefrontConfig) -> loom_lane_storefront::Result<ConfiguredCatalog> {
    Ok(ConfiguredCatalog::from_config(&config.catalog)?)
}

/// Open the persisted cart under the configured data directory.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or the catalog
/// source cannot be built.
pub fn open_cart(config: &StorefrontConfig) -> loom_lane_storefront::Result<CliCartService> {
    let storage = FileStorage::open(&config.data_dir)?;
    let mut store = CartStore::open(storage);
    store.subscribe(|items: &[CartLineItem]| {
        let count: u64 = items.iter().map(|item| u64::from(item.quantity)).sum();
        tracing::debug!(count, lines = items.len(), "Cart updated");
    });

    tracing::debug!(
        data_dir = %config.data_dir.display(),
        catalog = %config.catalog.location,
        "Opened cart"
    );
    Ok(CartService::new(store, open_catalog(config)?, LogNotifier))
}

//! Unified error type for hosts of the storefront library.
//!
//! Each concern has its own error enum; `StorefrontError` wraps them so a
//! host (the CLI) can return one type from every command and decide which
//! failures get reported to Sentry.

use thiserror::Error;

use crate::cart::AddToCartError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Environment configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Durable storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog could not be fetched or parsed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Add-to-cart request was rejected.
    #[error(transparent)]
    AddToCart(#[from] AddToCartError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl StorefrontError {
    /// Whether this is an operational failure worth an error-tracking event,
    /// as opposed to a shopper mistake such as an unknown product.
    #[must_use]
    pub const fn is_reportable(&self) -> bool {
        match self {
            Self::Config(_) | Self::Storage(_) | Self::Catalog(_) => true,
            Self::AddToCart(err) => {
                matches!(err, AddToCartError::Catalog(_) | AddToCartError::Storage(_))
            }
            Self::NotFound(_) => false,
        }
    }
}

/// Result type alias for storefront operations.
pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;
    use loom_lane_core::ProductId;

    #[test]
    fn test_reportable_classification() {
        let err = StorefrontError::from(StorageError::Poisoned);
        assert!(err.is_reportable());

        let err = StorefrontError::from(CatalogError::Status { status: 502 });
        assert!(err.is_reportable());

        let err = StorefrontError::from(AddToCartError::OutOfStock(ProductId::new(2)));
        assert!(!err.is_reportable());

        let err = StorefrontError::from(AddToCartError::from(CatalogError::Status { status: 500 }));
        assert!(err.is_reportable());

        let err = StorefrontError::from(AddToCartError::from(StorageError::Poisoned));
        assert!(err.is_reportable());

        assert!(!StorefrontError::NotFound("product 9".to_string()).is_reportable());
    }

    #[test]
    fn test_add_to_cart_display_is_transparent() {
        let err = StorefrontError::from(AddToCartError::NotFound(ProductId::new(999)));
        assert_eq!(err.to_string(), "Product not found: 999");
    }
}

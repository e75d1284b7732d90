//! Read-only product catalog.
//!
//! # Architecture
//!
//! - The catalog is a static JSON document; the storefront never writes it
//! - Every [`CatalogSource::fetch`] reads the document afresh unless the
//!   HTTP source is configured with a cache TTL
//! - Parsing requires a `products` array; `categories` is optional
//!
//! # Example
//!
//! ```rust,ignore
//! use loom_lane_storefront::catalog::{CatalogSource, HttpCatalog};
//!
//! let source = HttpCatalog::new(url, &config.catalog)?;
//! let catalog = source.fetch().await?;
//! let featured = catalog.featured();
//! ```

mod file;
mod http;
mod types;

use std::future::Future;

pub use file::FileCatalog;
pub use http::HttpCatalog;
pub use types::{Catalog, Category, MIN_SEARCH_LEN, Product, SearchPreview};

use thiserror::Error;

use crate::config::{CatalogConfig, CatalogLocation};

/// Errors that can occur when fetching the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    /// Catalog file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Document parsed but is not shaped like a catalog.
    #[error("Invalid data structure: {0}")]
    InvalidShape(String),
}

/// Something that can produce the current catalog.
pub trait CatalogSource: Send + Sync {
    /// Fetch and parse the catalog document.
    fn fetch(&self) -> impl Future<Output = Result<Catalog, CatalogError>> + Send;
}

/// An already-loaded catalog serves itself.
impl CatalogSource for Catalog {
    async fn fetch(&self) -> Result<Catalog, CatalogError> {
        Ok(self.clone())
    }
}

impl<T: CatalogSource> CatalogSource for &T {
    fn fetch(&self) -> impl Future<Output = Result<Catalog, CatalogError>> + Send {
        (**self).fetch()
    }
}

/// The catalog source selected by configuration.
#[derive(Clone)]
pub enum ConfiguredCatalog {
    Http(HttpCatalog),
    File(FileCatalog),
}

impl ConfiguredCatalog {
    /// Build the source described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` if the HTTP client cannot be built.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        Ok(match &config.location {
            CatalogLocation::Url(url) => Self::Http(HttpCatalog::new(url.clone(), config)?),
            CatalogLocation::File(path) => Self::File(FileCatalog::new(path.clone())),
        })
    }
}

impl CatalogSource for ConfiguredCatalog {
    async fn fetch(&self) -> Result<Catalog, CatalogError> {
        match self {
            Self::Http(source) => source.fetch().await,
            Self::File(source) => source.fetch().await,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::Status { status: 404 };
        assert_eq!(err.to_string(), "HTTP error! status: 404");

        let err = CatalogError::InvalidShape("products array not found".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid data structure: products array not found"
        );
    }

    #[tokio::test]
    async fn test_static_catalog_serves_itself() {
        let catalog = Catalog::default();
        let fetched = catalog.fetch().await.unwrap();
        assert_eq!(fetched, catalog);
    }

    #[test]
    fn test_configured_catalog_selects_backend() {
        let config = CatalogConfig {
            location: CatalogLocation::File(PathBuf::from("data/products.json")),
            cache_ttl: None,
            timeout: None,
        };
        assert!(matches!(
            ConfiguredCatalog::from_config(&config).unwrap(),
            ConfiguredCatalog::File(_)
        ));

        let config = CatalogConfig {
            location: CatalogLocation::parse("http://127.0.0.1:8080/data/products.json"),
            ..config
        };
        assert!(matches!(
            ConfiguredCatalog::from_config(&config).unwrap(),
            ConfiguredCatalog::Http(_)
        ));
    }
}

//! Integration tests for Loom & Lane.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p loom-lane-integration-tests
//! ```
//!
//! No external services are needed: HTTP catalogs are served by a local
//! axum server on an ephemeral port and file storage lives in temp dirs.
//!
//! # Test Categories
//!
//! - `cart_store` - Persistence and reload through file storage
//! - `add_to_cart` - Catalog-checked adds and their notifications
//! - `http_catalog` - Catalog fetching over HTTP

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::http::{StatusCode, header};
use axum::routing::get;
use loom_lane_storefront::catalog::Catalog;
use loom_lane_storefront::config::{CatalogConfig, CatalogLocation};

/// A small catalog covering the cases the tests need.
///
/// - 1 and 3 are in stock, 3 has a fractional price
/// - 2 is out of stock
/// - 4 has no `inStock` flag and counts as unavailable
pub const CATALOG_JSON: &str = r#"{
    "products": [
        {"id": 1, "name": "Handloom Saree", "price": 12500, "originalPrice": 15000,
         "category": "Sarees", "description": "Cotton handloom weave from Talagune",
         "image": "/images/products/saree.jpg", "rating": 4.8, "reviews": 124,
         "inStock": true, "featured": true, "badge": "Sale",
         "colors": ["Red", "Blue"], "sizes": ["Free"]},
        {"id": 2, "name": "Linen Shirt", "price": 4500, "category": "Men",
         "description": "Breathable linen", "inStock": false},
        {"id": 3, "name": "Batik Scarf", "price": 1999.5, "category": "Accessories",
         "description": "Hand-dyed batik silk", "inStock": true, "featured": true},
        {"id": 4, "name": "Cane Basket", "price": 3200, "category": "Home"},
        {"id": 42, "name": "Kaftan Dress", "price": 8900, "category": "Women",
         "description": "Flowing cotton kaftan", "inStock": true,
         "sizes": ["S", "M", "L"]}
    ],
    "categories": [
        {"name": "Sarees", "description": "Traditional handloom sarees"},
        {"name": "Women"},
        {"name": "Men"},
        {"name": "Accessories"},
        {"name": "Home"}
    ]
}"#;

/// Parse [`CATALOG_JSON`].
///
/// # Errors
///
/// Returns the parse error if the fixture is malformed.
pub fn sample_catalog() -> Result<Catalog, loom_lane_storefront::catalog::CatalogError> {
    Catalog::from_json(CATALOG_JSON.as_bytes())
}

/// Write [`CATALOG_JSON`] to `products.json` under `dir`.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
pub fn write_catalog(dir: &Path) -> std::io::Result<PathBuf> {
    let path = dir.join("products.json");
    std::fs::write(&path, CATALOG_JSON)?;
    Ok(path)
}

/// Local HTTP server for catalog documents.
///
/// Routes:
/// - `/data/products.json` - [`CATALOG_JSON`], counting requests
/// - `/data/broken.json` - invalid JSON
/// - `/data/misshapen.json` - valid JSON without a `products` array
/// - `/data/error.json` - HTTP 500, counting requests
/// - anything else - HTTP 404
pub struct CatalogServer {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    error_hits: Arc<AtomicUsize>,
}

impl CatalogServer {
    /// Bind an ephemeral port and serve in the background.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the listener cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let error_hits = Arc::new(AtomicUsize::new(0));
        let error_counter = Arc::clone(&error_hits);

        let app = Router::new()
            .route(
                "/data/products.json",
                get(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    async { ([(header::CONTENT_TYPE, "application/json")], CATALOG_JSON) }
                }),
            )
            .route("/data/broken.json", get(|| async { "{\"products\": [" }))
            .route("/data/misshapen.json", get(|| async { r#"{"items": []}"# }))
            .route(
                "/data/error.json",
                get(move || {
                    error_counter.fetch_add(1, Ordering::SeqCst);
                    async { StatusCode::INTERNAL_SERVER_ERROR }
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            hits,
            error_hits,
        })
    }

    /// Absolute URL for `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Catalog configuration pointing at `path`.
    #[must_use]
    pub fn config(&self, path: &str, cache_ttl: Option<Duration>) -> CatalogConfig {
        CatalogConfig {
            location: CatalogLocation::parse(&self.url(path)),
            cache_ttl,
            timeout: Some(Duration::from_secs(5)),
        }
    }

    /// Requests served for `/data/products.json` so far.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Requests served for `/data/error.json` so far.
    #[must_use]
    pub fn error_hits(&self) -> usize {
        self.error_hits.load(Ordering::SeqCst)
    }
}

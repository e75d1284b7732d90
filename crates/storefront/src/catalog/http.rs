//! HTTP catalog source.
//!
//! Uses `reqwest` for the request and, when a TTL is configured, `moka` to
//! keep the parsed document between fetches.

use std::sync::Arc;

use moka::future::Cache;
use tracing::{debug, instrument};
use url::Url;

use super::{Catalog, CatalogError, CatalogSource};
use crate::config::CatalogConfig;

/// Catalog fetched from a URL.
#[derive(Clone)]
pub struct HttpCatalog {
    inner: Arc<HttpCatalogInner>,
}

struct HttpCatalogInner {
    client: reqwest::Client,
    url: Url,
    cache: Option<Cache<String, Arc<Catalog>>>,
}

impl HttpCatalog {
    /// Create a client for the catalog at `url`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` if the HTTP client fails to build.
    pub fn new(url: Url, config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let cache = config.cache_ttl.map(|ttl| {
            Cache::builder()
                .max_capacity(1)
                .time_to_live(ttl)
                .build()
        });

        Ok(Self {
            inner: Arc::new(HttpCatalogInner { client, url, cache }),
        })
    }

    /// The catalog document URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.inner.url
    }

    async fn request(&self) -> Result<Catalog, CatalogError> {
        let response = self.inner.client.get(self.inner.url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::error!(
                status = %status,
                url = %self.inner.url,
                "Catalog request returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let catalog = Catalog::from_json(&body)?;
        debug!(
            products = catalog.products.len(),
            categories = catalog.categories.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }
}

impl CatalogSource for HttpCatalog {
    #[instrument(skip(self), fields(url = %self.inner.url))]
    async fn fetch(&self) -> Result<Catalog, CatalogError> {
        let Some(cache) = &self.inner.cache else {
            return self.request().await;
        };

        let key = self.inner.url.as_str();
        if let Some(cached) = cache.get(key).await {
            debug!("Catalog cache hit");
            return Ok((*cached).clone());
        }

        let catalog = self.request().await?;
        cache.insert(key.to_string(), Arc::new(catalog.clone())).await;
        Ok(catalog)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(cache_ttl: Option<Duration>) -> CatalogConfig {
        CatalogConfig {
            location: crate::config::CatalogLocation::parse("http://127.0.0.1:9/products.json"),
            cache_ttl,
            timeout: Some(Duration::from_secs(1)),
        }
    }

    #[test]
    fn test_new_keeps_url() {
        let url = Url::parse("https://shop.example.lk/data/products.json").unwrap();
        let source = HttpCatalog::new(url.clone(), &config(None)).unwrap();
        assert_eq!(source.url(), &url);
        assert!(source.inner.cache.is_none());
    }

    #[test]
    fn test_cache_enabled_by_ttl() {
        let url = Url::parse("https://shop.example.lk/data/products.json").unwrap();
        let source = HttpCatalog::new(url, &config(Some(Duration::from_secs(60)))).unwrap();
        assert!(source.inner.cache.is_some());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_http_error() {
        // Port 9 (discard) is not listening on loopback
        let url = Url::parse("http://127.0.0.1:9/products.json").unwrap();
        let source = HttpCatalog::new(url, &config(None)).unwrap();
        assert!(matches!(source.fetch().await, Err(CatalogError::Http(_))));
    }
}

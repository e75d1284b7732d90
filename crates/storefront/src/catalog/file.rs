//! Catalog read from the local filesystem.

use std::path::{Path, PathBuf};

use tracing::instrument;

use super::{Catalog, CatalogError, CatalogSource};

/// Catalog document stored on disk, re-read on every fetch.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    /// Create a source for the document at `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the catalog document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FileCatalog {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<Catalog, CatalogError> {
        let bytes = tokio::fs::read(&self.path).await?;
        Catalog::from_json(&bytes)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_catalog_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(
            &path,
            r#"{"products":[{"id":1,"name":"Saree","price":12500,"inStock":true}]}"#,
        )
        .unwrap();

        let catalog = FileCatalog::new(path).fetch().await.unwrap();
        assert_eq!(catalog.products.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let source = FileCatalog::new(dir.path().join("missing.json"));
        assert!(matches!(source.fetch().await, Err(CatalogError::Io(_))));
    }

    #[tokio::test]
    async fn test_misshapen_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, r#"{"items": []}"#).unwrap();

        assert!(matches!(
            FileCatalog::new(path).fetch().await,
            Err(CatalogError::InvalidShape(_))
        ));
    }
}

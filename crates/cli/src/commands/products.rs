//! Catalog browsing commands.

use std::fmt::Write as _;

use loom_lane_core::ProductId;
use loom_lane_storefront::catalog::{CatalogSource, MIN_SEARCH_LEN, Product};
use loom_lane_storefront::{Result, StorefrontError};

/// Results shown by the live-search preview.
pub const DEFAULT_PREVIEW_LIMIT: usize = 8;

/// Print featured products.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
#[allow(clippy::print_stdout)]
pub async fn featured(source: &impl CatalogSource) -> Result<()> {
    let catalog = source.fetch().await?;
    for product in catalog.featured() {
        println!("{}", product_line(product));
    }
    Ok(())
}

/// Print a search preview: the first `limit` matches and the total.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
#[allow(clippy::print_stdout)]
pub async fn search(source: &impl CatalogSource, query: &str, limit: usize) -> Result<()> {
    let catalog = source.fetch().await?;
    let Some(preview) = catalog.search_preview(query, limit) else {
        println!("Type at least {MIN_SEARCH_LEN} characters to search");
        return Ok(());
    };

    if preview.products.is_empty() {
        println!("No products found");
        return Ok(());
    }
    for product in &preview.products {
        println!("{}", product_line(product));
    }
    if preview.has_more() {
        println!("View all {} results", preview.total);
    }
    Ok(())
}

/// Print the products in a category.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
#[allow(clippy::print_stdout)]
pub async fn category(source: &impl CatalogSource, name: &str) -> Result<()> {
    let catalog = source.fetch().await?;
    let products = catalog.in_category(name);
    if products.is_empty() {
        println!("No products in {name}");
    }
    for product in products {
        println!("{}", product_line(product));
    }
    Ok(())
}

/// Print one product in full.
///
/// # Errors
///
/// Returns `StorefrontError::NotFound` if no product has this ID.
#[allow(clippy::print_stdout)]
pub async fn show(source: &impl CatalogSource, id: ProductId) -> Result<()> {
    let catalog = source.fetch().await?;
    let product = catalog
        .find(id)
        .ok_or_else(|| StorefrontError::NotFound(format!("product {id}")))?;

    println!("{}", product_line(product));
    if !product.category.is_empty() {
        println!("Category: {}", product.category);
    }
    if product.reviews > 0 {
        println!("Rating: {:.1} ({} reviews)", product.rating, product.reviews);
    }
    if !product.colors.is_empty() {
        println!("Colors: {}", product.colors.join(", "));
    }
    if !product.sizes.is_empty() {
        println!("Sizes: {}", product.sizes.join(", "));
    }
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }
    Ok(())
}

/// Print category names and descriptions.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
#[allow(clippy::print_stdout)]
pub async fn categories(source: &impl CatalogSource) -> Result<()> {
    let catalog = source.fetch().await?;
    for category in &catalog.categories {
        if category.description.is_empty() {
            println!("{}", category.name);
        } else {
            println!("{}  {}", category.name, category.description);
        }
    }
    Ok(())
}

/// One-line summary: ID, name, price, discount, badge and availability.
fn product_line(product: &Product) -> String {
    let mut line = format!(
        "{:>4}  {}  {}",
        product.id.as_i32(),
        product.name,
        product.display_price()
    );
    if let Some(percent) = product.discount_percent().filter(|p| *p > 0) {
        let _ = write!(line, " (-{percent}%)");
    }
    if let Some(badge) = &product.badge {
        let _ = write!(line, " [{badge}]");
    }
    if !product.in_stock {
        line.push_str(" - out of stock");
    }
    line
}

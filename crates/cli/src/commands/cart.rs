//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! loom-cli cart add 42 -q 2 --color Red
//! loom-cli cart remove 42 --color Red
//! loom-cli cart update 42 5
//! loom-cli cart list
//! loom-cli cart clear --yes
//! ```

use std::fmt::Write as _;

use loom_lane_core::{CartLineItem, LineKey, Price};
use loom_lane_storefront::cart::CartView;
use loom_lane_storefront::Result;

use super::CliCartService;

/// Add a product after checking it against the catalog.
///
/// # Errors
///
/// Returns an error if the product is unknown, out of stock, or the catalog
/// cannot be fetched.
#[allow(clippy::print_stdout)]
pub async fn add(service: &mut CliCartService, key: LineKey, quantity: u32) -> Result<()> {
    service.add_to_cart(key, quantity).await?;
    println!("Cart: {} item(s)", service.store().count());
    Ok(())
}

/// Remove a line.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn remove(service: &mut CliCartService, key: &LineKey) -> Result<()> {
    service.remove_from_cart(key)?;
    Ok(())
}

/// Set a line's quantity.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
#[allow(clippy::print_stdout)]
pub fn update(service: &mut CliCartService, key: &LineKey, quantity: i64) -> Result<()> {
    service.update_cart_quantity(key, quantity)?;
    println!("Cart: {} item(s)", service.store().count());
    Ok(())
}

/// Print the cart with prices.
///
/// Falls back to the bare line items when the catalog is unavailable.
#[allow(clippy::print_stdout)]
pub async fn list(service: &CliCartService) {
    if service.store().is_empty() {
        println!("Your cart is empty");
        return;
    }

    match service.cart_view().await {
        Ok(view) => println!("{}", render_view(&view)),
        Err(e) => {
            tracing::warn!(error = %e, "Catalog unavailable, listing items without prices");
            for item in service.store().items() {
                println!("{}", render_item(item));
            }
        }
    }
}

#[allow(clippy::print_stdout)]
pub fn count(service: &CliCartService) {
    println!("{}", service.store().count());
}

/// Print the cart total. Catalog failures print zero.
#[allow(clippy::print_stdout)]
pub async fn total(service: &CliCartService) {
    println!("{}", Price::lkr(service.cart_total().await));
}

/// Empty the cart, only when confirmed.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
#[allow(clippy::print_stdout)]
pub fn clear(service: &mut CliCartService, confirmed: bool) -> Result<()> {
    if !confirmed {
        println!("Pass --yes to remove all items from your cart");
        return Ok(());
    }
    service.clear_cart()?;
    Ok(())
}

fn render_view(view: &CartView) -> String {
    let mut out = String::new();
    for item in &view.items {
        let variant = item
            .variant_title
            .as_deref()
            .map(|v| format!(" ({v})"))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{:>4}  {}{}  {} x {} = {}",
            item.product_id.as_i32(),
            item.title,
            variant,
            item.quantity,
            item.price,
            item.line_price
        );
    }
    let _ = write!(out, "Subtotal: {} ({} item(s))", view.subtotal, view.item_count);
    out
}

fn render_item(item: &CartLineItem) -> String {
    let variant = item
        .variant_label()
        .map(|v| format!(" ({v})"))
        .unwrap_or_default();
    format!("{:>4}{}  x {}", item.product_id.as_i32(), variant, item.quantity)
}

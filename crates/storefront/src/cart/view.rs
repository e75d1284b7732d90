//! Cart page model.

use rust_decimal::Decimal;

use loom_lane_core::{CartLineItem, Price, ProductId};

use super::store::total_for;
use crate::catalog::Catalog;

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub title: String,
    /// `"Red / M"` style label; `None` when no variant was chosen.
    pub variant_title: Option<String>,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: Option<String>,
}

/// The cart as shown on the cart page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: Price::lkr(Decimal::ZERO).to_string(),
            item_count: 0,
        }
    }

    /// Price `items` against `catalog`.
    ///
    /// Lines whose product is no longer in the catalog are left out, and do
    /// not count towards the subtotal or the item count.
    #[must_use]
    pub fn build(items: &[CartLineItem], catalog: &Catalog) -> Self {
        let lines: Vec<CartItemView> = items
            .iter()
            .filter_map(|item| {
                let product = catalog.find(item.product_id)?;
                let line_total = product.price * Decimal::from(item.quantity);
                Some(CartItemView {
                    product_id: product.id,
                    title: product.name.clone(),
                    variant_title: item.variant_label(),
                    quantity: item.quantity,
                    price: product.display_price().to_string(),
                    line_price: Price::lkr(line_total).to_string(),
                    image: product.image.clone(),
                })
            })
            .collect();

        Self {
            item_count: lines.iter().map(|line| u64::from(line.quantity)).sum(),
            items: lines,
            subtotal: Price::lkr(total_for(items, catalog)).to_string(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use loom_lane_core::LineKey;

    fn catalog() -> Catalog {
        Catalog::from_json(
            br#"{"products":[
                {"id":1,"name":"Handloom Saree","price":12500,"inStock":true,
                 "image":"/images/saree.jpg"},
                {"id":3,"name":"Batik Scarf","price":2250,"inStock":true}
            ]}"#,
        )
        .unwrap()
    }

    fn line(id: i32, qty: u32, color: Option<&str>, size: Option<&str>) -> CartLineItem {
        CartLineItem::new(LineKey::new(ProductId::new(id), color, size), qty, Utc::now())
    }

    #[test]
    fn test_empty() {
        let view = CartView::empty();
        assert!(view.is_empty());
        assert_eq!(view.subtotal, "LKR 0");
        assert_eq!(view.item_count, 0);
    }

    #[test]
    fn test_build_prices_lines() {
        let items = vec![
            line(1, 2, Some("Red"), Some("M")),
            line(3, 1, None, None),
        ];
        let view = CartView::build(&items, &catalog());

        assert_eq!(view.items.len(), 2);
        let saree = &view.items[0];
        assert_eq!(saree.title, "Handloom Saree");
        assert_eq!(saree.variant_title.as_deref(), Some("Red / M"));
        assert_eq!(saree.price, "LKR 12,500");
        assert_eq!(saree.line_price, "LKR 25,000");
        assert_eq!(saree.image.as_deref(), Some("/images/saree.jpg"));
        assert!(view.items[1].variant_title.is_none());

        assert_eq!(view.subtotal, "LKR 27,250");
        assert_eq!(view.item_count, 3);
    }

    #[test]
    fn test_build_skips_missing_products() {
        let items = vec![line(1, 1, None, None), line(404, 5, None, None)];
        let view = CartView::build(&items, &catalog());

        assert_eq!(view.items.len(), 1);
        assert_eq!(view.item_count, 1);
        assert_eq!(view.subtotal, "LKR 12,500");
    }
}

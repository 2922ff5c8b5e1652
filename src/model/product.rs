// Product and basket line types
//
// A product is immutable once loaded from the catalog feed. A price of
// `None` means the product is priced "unavailable": it can still be browsed
// and basketed, but no numeric total can be computed for an order holding it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product from the catalog feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Short glyph or slug shown in place of the product picture.
    pub image: String,
    pub category: String,
    pub price: Option<Decimal>,
}

impl Product {
    /// Display string for the price column.
    pub fn price_label(&self) -> String {
        match self.price {
            Some(price) => format!("{} cr", price),
            None => "unavailable".to_string(),
        }
    }
}

/// One product plus its quantity in the basket.
///
/// The catalog controller maintains at most one line per product identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketLine {
    pub product: Product,
    /// Always >= 1; a count that would reach zero removes the line instead.
    pub item_count: u32,
}

impl BasketLine {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            item_count: 1,
        }
    }
}

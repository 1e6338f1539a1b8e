//! Catalog product types as served by the catalog API.

use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};
use super::price::Price;
use super::quantity::Quantity;
use crate::cart::LineItem;

/// Stock level at or below which the product page warns that few remain.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// A product as listed on catalog pages and product cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
}

impl ProductSummary {
    /// Build a cart line for this product.
    #[must_use]
    pub fn to_line_item(&self, quantity: Quantity) -> LineItem {
        LineItem {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            image: self.image.clone(),
            quantity,
        }
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A product as served by the detail endpoint, with stock and category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    pub stock: u32,
    pub category: Category,
}

impl ProductDetail {
    /// Whether the product can be added to a cart at all.
    #[must_use]
    pub const fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }

    /// Whether the product page should warn that only a few remain.
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.stock > 0 && self.stock <= LOW_STOCK_THRESHOLD
    }

    /// Clamp a requested quantity into `1..=stock`.
    ///
    /// Returns `None` when the product is out of stock.
    #[must_use]
    pub fn clamp_quantity(&self, requested: i64) -> Option<Quantity> {
        Quantity::clamped(requested).at_most(self.stock)
    }

    /// The listing view of this product.
    #[must_use]
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            image: self.image.clone(),
            description: self.description.clone(),
        }
    }
}

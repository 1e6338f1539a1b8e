//! The shopping cart.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s with at most one entry per
//! product. All operations are total: none of them fail, and operations on
//! products that are not in the cart are no-ops.
//!
//! The cart total is never stored. [`Cart::total`] sums the lines every time
//! it is called, so it cannot drift from the items.
//!
//! # Quantity policy
//!
//! Quantities never drop below one. [`Cart::update_quantity`] clamps any
//! request below one (including zero and negatives) to one; removing a line
//! is always an explicit [`Cart::remove_item`].

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId, Quantity};

/// One product selected for purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identifier; unique within a cart.
    pub id: ProductId,
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Display image reference.
    pub image: String,
    pub quantity: Quantity,
}

impl LineItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// The shopper's current collection of line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a line to the cart.
    ///
    /// If the product is already present its quantity grows by the incoming
    /// quantity and the existing name, price and image are kept. Otherwise the
    /// line is appended.
    pub fn add_item(&mut self, item: LineItem) {
        match self.items.iter_mut().find(|line| line.id == item.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            }
            None => self.items.push(item),
        }
    }

    /// Remove the line for `id`.
    ///
    /// Returns `true` if a line was removed.
    pub fn remove_item(&mut self, id: ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|line| line.id != id);
        self.items.len() < len_before
    }

    /// Set the quantity of the line for `id`, clamping values below one to one.
    ///
    /// Returns `true` if a line for `id` exists.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) -> bool {
        let Some(line) = self.items.iter_mut().find(|line| line.id == id) else {
            return false;
        };
        line.quantity = Quantity::clamped(quantity);
        true
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|line| line.id == id)
    }

    /// Number of distinct products.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

//! Core types for ModernShop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;
pub mod quantity;

pub use id::*;
pub use price::{Price, PriceError};
pub use product::{Category, LOW_STOCK_THRESHOLD, ProductDetail, ProductSummary};
pub use quantity::{Quantity, QuantityError};

//! ModernShop Core - Shared types and cart state.
//!
//! This crate provides the types used across all ModernShop components:
//! - `storefront` - Public-facing shop with catalog, product and cart pages
//! - `integration-tests` - End-to-end tests against a running storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no HTTP clients, no sessions. This keeps it lightweight and allows the cart
//! logic to be tested without any runtime.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, quantities and catalog products
//! - [`cart`] - The shopping cart and its line items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, LineItem};
pub use types::*;

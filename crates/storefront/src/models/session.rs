//! Session-related types.
//!
//! The storefront keeps no user accounts; the session only carries the
//! shopper's cart.

/// Session keys for storefront data.
pub mod keys {
    /// Key for the shopper's cart.
    pub const CART: &str = "cart";
}

//! Cache types for catalog API responses.

use modernshop_core::{ProductDetail, ProductId, ProductSummary};

/// Cache key for catalog responses.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Featured,
    Products,
    Product(ProductId),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Products(Vec<ProductSummary>),
    Product(Box<ProductDetail>),
}

//! Product catalog API client.
//!
//! # Architecture
//!
//! - The catalog API is the source of truth for products - no local copy
//! - Plain JSON over HTTP via `reqwest`
//! - In-memory caching via `moka` for successful responses (5 minute TTL by default)
//!
//! # Endpoints
//!
//! ```text
//! GET {base}/products           - all products
//! GET {base}/products/featured  - featured products for the home page
//! GET {base}/products/{id}      - product detail with stock and category
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use modernshop_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog)?;
//! let product = client.product(ProductId::new(1)).await?;
//! ```

mod cache;

use std::sync::Arc;

use modernshop_core::{ProductDetail, ProductId, ProductSummary};
use moka::future::Cache;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CatalogConfig;

use cache::{CacheKey, CacheValue};

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint URL could not be built.
    #[error("Invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),

    /// Catalog returned a non-success status.
    #[error("Catalog returned HTTP {0}")]
    Status(u16),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Client for the product catalog API.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
                cache,
            }),
        })
    }

    /// Fetch and decode a JSON document relative to the base URL.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = self.inner.base_url.join(path)?;

        let response = self
            .inner
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(path.to_string()));
        }

        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status(status.as_u16()));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }

    /// Fetch a product list, consulting the cache first.
    async fn product_list(
        &self,
        key: CacheKey,
        path: &str,
    ) -> Result<Vec<ProductSummary>, CatalogError> {
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for product list");
            return Ok(products);
        }

        let products: Vec<ProductSummary> = self.get_json(path).await?;

        self.inner
            .cache
            .insert(key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get the featured products shown on the home page.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn featured_products(&self) -> Result<Vec<ProductSummary>, CatalogError> {
        self.product_list(CacheKey::Featured, "products/featured")
            .await
    }

    /// Get every product in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<ProductSummary>, CatalogError> {
        self.product_list(CacheKey::Products, "products").await
    }

    /// Get a product with stock and category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the catalog does not know the
    /// product, or another error if the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: ProductId) -> Result<ProductDetail, CatalogError> {
        let key = CacheKey::Product(id);

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: ProductDetail = self.get_json(&format!("products/{id}")).await?;

        self.inner
            .cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Check that the catalog API answers, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be reached or answers with a
    /// non-success status.
    pub async fn ping(&self) -> Result<(), CatalogError> {
        self.get_json::<serde_json::Value>("products/featured")
            .await
            .map(|_| ())
    }
}

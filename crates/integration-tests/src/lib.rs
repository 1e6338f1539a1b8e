//! Integration tests for ModernShop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p modernshop-integration-tests
//! ```
//!
//! Each test starts its own fake catalog API and storefront on ephemeral
//! ports, so no external services are needed.
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart flows through the HTTP surface
//! - `storefront_catalog` - Catalog pages, including catalog outages

#![allow(clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use modernshop_core::{Category, CategoryId, Price, ProductDetail, ProductId};
use modernshop_storefront::{
    build_app,
    config::{CatalogConfig, StorefrontConfig},
    state::AppState,
};
use reqwest::Client;
use url::Url;

/// A running storefront wired to a catalog, plus a cookie-keeping client.
pub struct TestContext {
    pub client: Client,
    pub storefront_url: String,
}

impl TestContext {
    /// Start a storefront backed by a fake catalog serving `products`.
    pub async fn with_products(products: Vec<ProductDetail>) -> Self {
        let catalog_url = spawn_fake_catalog(products).await;
        Self::with_catalog_url(catalog_url).await
    }

    /// Start a storefront whose catalog API cannot be reached.
    pub async fn with_unreachable_catalog() -> Self {
        // Bind and immediately release a port so nothing listens on it.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind probe listener");
        let addr = listener.local_addr().expect("Probe listener has no address");
        drop(listener);

        Self::with_catalog_url(catalog_base_url(addr)).await
    }

    async fn with_catalog_url(catalog_url: Url) -> Self {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().expect("valid loopback address"),
            port: 0,
            base_url: "http://localhost".to_string(),
            catalog: CatalogConfig::new(catalog_url),
            sentry_dsn: None,
            sentry_environment: None,
        };
        let state = AppState::new(config).expect("Failed to build storefront state");
        let addr = serve(build_app(state)).await;

        Self {
            client: new_client(),
            storefront_url: format!("http://{addr}"),
        }
    }

    /// Absolute URL for a storefront path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.storefront_url)
    }

    /// A second shopper: same storefront, separate cookie jar.
    #[must_use]
    pub fn other_shopper(&self) -> Self {
        Self {
            client: new_client(),
            storefront_url: self.storefront_url.clone(),
        }
    }

    /// POST a form and return the response.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("Request to storefront failed")
    }

    /// GET a page and return its status and body.
    pub async fn get_page(&self, path: &str) -> (reqwest::StatusCode, String) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Request to storefront failed");
        let status = resp.status();
        let body = resp.text().await.expect("Failed to read response body");
        (status, body)
    }
}

/// Build a catalog product for tests.
#[must_use]
pub fn product(id: i32, name: &str, cents: u32, stock: u32) -> ProductDetail {
    ProductDetail {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::from_cents(cents),
        image: format!("/images/{id}.jpg"),
        description: format!("{name} description"),
        stock,
        category: Category {
            id: CategoryId::new(1),
            name: "General".to_string(),
        },
    }
}

fn new_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

fn catalog_base_url(addr: SocketAddr) -> Url {
    Url::parse(&format!("http://{addr}/api/")).expect("valid catalog URL")
}

/// Serve `router` on an ephemeral loopback port.
async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Test listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server error");
    });
    addr
}

type Products = Arc<Vec<ProductDetail>>;

/// Start a fake catalog API and return its base URL.
///
/// Every product is listed and featured; the detail endpoint 404s on
/// unknown ids.
pub async fn spawn_fake_catalog(products: Vec<ProductDetail>) -> Url {
    let router = Router::new()
        .route("/api/products", get(list_products))
        .route("/api/products/featured", get(list_products))
        .route("/api/products/{id}", get(get_product))
        .with_state(Arc::new(products));

    catalog_base_url(serve(router).await)
}

async fn list_products(State(products): State<Products>) -> Json<serde_json::Value> {
    let summaries: Vec<_> = products.iter().map(ProductDetail::summary).collect();
    Json(serde_json::to_value(summaries).expect("summaries serialize"))
}

async fn get_product(State(products): State<Products>, Path(id): Path<i32>) -> Response {
    products
        .iter()
        .find(|p| p.id.as_i32() == id)
        .map_or_else(
            || StatusCode::NOT_FOUND.into_response(),
            |p| Json(p.clone()).into_response(),
        )
}

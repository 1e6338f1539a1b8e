//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::routes::products::ProductCardView;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub featured_products: Vec<ProductCardView>,
    pub catalog_unavailable: bool,
}

/// Display the home page with featured products.
///
/// A catalog failure renders the page without products rather than an
/// error page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let (featured_products, catalog_unavailable) =
        match state.catalog().featured_products().await {
            Ok(products) => (products.iter().map(ProductCardView::from).collect(), false),
            Err(e) => {
                tracing::warn!("Failed to fetch featured products: {e}");
                (Vec::new(), true)
            }
        };

    HomeTemplate {
        featured_products,
        catalog_unavailable,
    }
}

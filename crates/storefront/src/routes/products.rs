//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use modernshop_core::{ProductDetail, ProductId, ProductSummary};
use tracing::instrument;

use crate::catalog::CatalogError;
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
}

impl From<&ProductSummary> for ProductCardView {
    fn from(product: &ProductSummary) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
        }
    }
}

/// Product detail display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub stock: u32,
    pub out_of_stock: bool,
    pub low_stock: bool,
}

impl From<&ProductDetail> for ProductView {
    fn from(product: &ProductDetail) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
            category: product.category.name.clone(),
            stock: product.stock,
            out_of_stock: product.is_out_of_stock(),
            low_stock: product.is_low_stock(),
        }
    }
}

/// Shop page template listing every product.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductCardView>,
    pub catalog_unavailable: bool,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: Option<ProductView>,
}

/// Display the shop page.
///
/// A catalog failure renders an empty listing rather than an error page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let (products, catalog_unavailable) = match state.catalog().products().await {
        Ok(products) => (products.iter().map(ProductCardView::from).collect(), false),
        Err(e) => {
            tracing::warn!("Failed to fetch products: {e}");
            (Vec::new(), true)
        }
    };

    ProductsIndexTemplate {
        products,
        catalog_unavailable,
    }
}

/// Display product detail page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<ProductId>) -> impl IntoResponse {
    match state.catalog().product(id).await {
        Ok(product) => (
            StatusCode::OK,
            ProductShowTemplate {
                product: Some(ProductView::from(&product)),
            },
        ),
        Err(CatalogError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, ProductShowTemplate { product: None })
        }
        Err(e) => {
            tracing::warn!("Failed to fetch product {id}: {e}");
            (StatusCode::OK, ProductShowTemplate { product: None })
        }
    }
}

#[cfg(test)]
mod tests {
    use modernshop_core::{Category, CategoryId, Price};

    use super::*;

    fn detail(stock: u32) -> ProductDetail {
        ProductDetail {
            id: ProductId::new(5),
            name: "Backpack".to_string(),
            price: Price::from_cents(4500),
            image: "/img/backpack.jpg".to_string(),
            description: "Waterproof".to_string(),
            stock,
            category: Category {
                id: CategoryId::new(1),
                name: "Bags".to_string(),
            },
        }
    }

    #[test]
    fn test_product_view_formats_price_and_category() {
        let view = ProductView::from(&detail(20));
        assert_eq!(view.price, "$45.00");
        assert_eq!(view.category, "Bags");
        assert!(!view.out_of_stock);
        assert!(!view.low_stock);
    }

    #[test]
    fn test_product_view_stock_flags() {
        assert!(ProductView::from(&detail(0)).out_of_stock);
        assert!(ProductView::from(&detail(2)).low_stock);
    }

    #[test]
    fn test_show_template_renders_low_stock_warning() {
        let html = ProductShowTemplate {
            product: Some(ProductView::from(&detail(3))),
        }
        .render()
        .unwrap_or_default();
        assert!(html.contains("Only 3 items left in stock!"));
        assert!(html.contains("Category: Bags"));
    }

    #[test]
    fn test_show_template_renders_out_of_stock() {
        let html = ProductShowTemplate {
            product: Some(ProductView::from(&detail(0))),
        }
        .render()
        .unwrap_or_default();
        assert!(html.contains("Out of Stock"));
        assert!(!html.contains("items left in stock"));
    }

    #[test]
    fn test_show_template_renders_not_found() {
        let html = ProductShowTemplate { product: None }
            .render()
            .unwrap_or_default();
        assert!(html.contains("Product not found."));
    }
}

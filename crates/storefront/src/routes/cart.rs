//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the shopper's session and is reached through the
//! [`SessionCart`] extractor.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use modernshop_core::{Cart, LineItem, ProductId};
use serde::{Deserialize, Deserializer};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::SessionCart;
use crate::state::AppState;

/// HTMX event fired after every cart mutation.
const CART_UPDATED_TRIGGER: (&str, &str) = ("HX-Trigger", "cart-updated");

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    /// The decrement control is disabled at quantity 1.
    pub can_decrement: bool,
    pub decrement_quantity: u32,
    pub increment_quantity: u32,
}

impl From<&LineItem> for CartItemView {
    fn from(line: &LineItem) -> Self {
        let quantity = line.quantity.get();
        Self {
            id: line.id,
            name: line.name.clone(),
            image: line.image.clone(),
            quantity,
            price: line.price.to_string(),
            line_price: line.line_total().to_string(),
            can_decrement: quantity > 1,
            decrement_quantity: quantity.saturating_sub(1).max(1),
            increment_quantity: quantity.saturating_add(1),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub total: String,
    pub line_count: usize,
    pub item_count: u64,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        // No shipping or tax is charged, so subtotal and total coincide.
        let total = cart.total().to_string();
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: total.clone(),
            total,
            line_count: cart.line_count(),
            item_count: cart.item_count(),
        }
    }
}

/// Deserialize an empty form field as `None`.
///
/// A cleared number input is submitted as `quantity=`.
fn empty_string_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub quantity: Option<i64>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: usize,
}

/// Render the cart items fragment with the update trigger.
fn cart_items_response(cart: &Cart) -> Response {
    (
        AppendHeaders([CART_UPDATED_TRIGGER]),
        CartItemsTemplate {
            cart: CartView::from(cart),
        },
    )
        .into_response()
}

/// Display cart page.
#[instrument(skip(cart))]
pub async fn show(cart: SessionCart) -> impl IntoResponse {
    CartShowTemplate {
        cart: CartView::from(cart.cart()),
    }
}

/// Add item to cart (HTMX).
///
/// Name, price and image come from the catalog, not the form. The requested
/// quantity defaults to 1 and is clamped to the available stock.
/// Returns the cart count badge with an HTMX trigger.
///
/// # Errors
///
/// - `NotFound` if the catalog does not know the product
/// - `BadRequest` if the product is out of stock
/// - `Catalog` if the catalog cannot be reached
#[instrument(skip(state, cart))]
pub async fn add(
    State(state): State<AppState>,
    mut cart: SessionCart,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product = state
        .catalog()
        .product(form.product_id)
        .await
        .map_err(|e| AppError::from_catalog_lookup(e, &format!("product {}", form.product_id)))?;

    let quantity = product
        .clamp_quantity(form.quantity.unwrap_or(1))
        .ok_or_else(|| AppError::BadRequest(format!("{} is out of stock", product.name)))?;

    cart.add_item(product.summary().to_line_item(quantity))
        .await?;

    let product_id = product.id.to_string();
    let quantity = quantity.to_string();
    add_breadcrumb(
        "cart",
        "Added item",
        Some(&[
            ("product_id", product_id.as_str()),
            ("quantity", quantity.as_str()),
        ]),
    );

    Ok((
        AppendHeaders([CART_UPDATED_TRIGGER]),
        CartCountTemplate {
            count: cart.cart().line_count(),
        },
    )
        .into_response())
}

/// Update cart item quantity (HTMX).
///
/// Quantities below 1 are clamped to 1; removal is a separate action.
#[instrument(skip(cart))]
pub async fn update(mut cart: SessionCart, Form(form): Form<UpdateCartForm>) -> Result<Response> {
    if !cart.update_quantity(form.product_id, form.quantity).await? {
        tracing::debug!(product_id = %form.product_id, "Update for product not in cart");
    }
    Ok(cart_items_response(cart.cart()))
}

/// Remove item from cart (HTMX).
#[instrument(skip(cart))]
pub async fn remove(
    mut cart: SessionCart,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    if cart.remove_item(form.product_id).await? {
        let product_id = form.product_id.to_string();
        add_breadcrumb(
            "cart",
            "Removed item",
            Some(&[("product_id", product_id.as_str())]),
        );
    }
    Ok(cart_items_response(cart.cart()))
}

/// Empty the cart (HTMX).
///
/// Also the hook a completed checkout calls.
#[instrument(skip(cart))]
pub async fn clear(mut cart: SessionCart) -> Result<Response> {
    cart.clear().await?;
    add_breadcrumb("cart", "Cleared cart", None);
    Ok(cart_items_response(cart.cart()))
}

/// Get cart count badge (HTMX).
#[instrument(skip(cart))]
pub async fn count(cart: SessionCart) -> impl IntoResponse {
    CartCountTemplate {
        count: cart.cart().line_count(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use modernshop_core::{Price, Quantity};

    use super::*;

    fn line(id: i32, cents: u32, quantity: u32) -> LineItem {
        LineItem {
            id: ProductId::new(id),
            name: format!("Item {id}"),
            price: Price::from_cents(cents),
            image: format!("/img/{id}.jpg"),
            quantity: Quantity::new(quantity).unwrap(),
        }
    }

    #[test]
    fn test_cart_view_totals() {
        let mut cart = Cart::new();
        cart.add_item(line(1, 1000, 2));
        cart.add_item(line(2, 550, 1));

        let view = CartView::from(&cart);
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.items[0].line_price, "$20.00");
        assert_eq!(view.subtotal, "$25.50");
        assert_eq!(view.total, "$25.50");
        assert_eq!(view.line_count, 2);
        assert_eq!(view.item_count, 3);
    }

    async fn parse_add_form(body: &'static str) -> AddToCartForm {
        use axum::{body::Body, extract::FromRequest, http::Request};

        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        let Form(form) = Form::<AddToCartForm>::from_request(request, &())
            .await
            .unwrap();
        form
    }

    #[tokio::test]
    async fn test_add_form_quantity_is_optional() {
        assert_eq!(parse_add_form("product_id=1").await.quantity, None);
        assert_eq!(parse_add_form("product_id=1&quantity=").await.quantity, None);
        assert_eq!(parse_add_form("product_id=1&quantity=4").await.quantity, Some(4));
        assert_eq!(parse_add_form("product_id=1&quantity=-2").await.quantity, Some(-2));
    }

    #[test]
    fn test_decrement_disabled_at_one() {
        let view = CartItemView::from(&line(1, 100, 1));
        assert!(!view.can_decrement);
        assert_eq!(view.decrement_quantity, 1);
        assert_eq!(view.increment_quantity, 2);

        let view = CartItemView::from(&line(1, 100, 3));
        assert!(view.can_decrement);
        assert_eq!(view.decrement_quantity, 2);
    }

    #[test]
    fn test_empty_cart_renders_empty_state() {
        let html = CartItemsTemplate {
            cart: CartView::from(&Cart::new()),
        }
        .render()
        .unwrap();
        assert!(html.contains("Your cart is empty"));
        assert!(html.contains("Continue Shopping"));
    }

    #[test]
    fn test_cart_items_render_summary() {
        let mut cart = Cart::new();
        cart.add_item(line(7, 1250, 2));

        let html = CartItemsTemplate {
            cart: CartView::from(&cart),
        }
        .render()
        .unwrap();
        assert!(html.contains("Item 7"));
        assert!(html.contains("$12.50"));
        assert!(html.contains("$25.00"));
        assert!(html.contains("Free"));
    }

    #[test]
    fn test_count_badge_hidden_when_empty() {
        let html = CartCountTemplate { count: 0 }.render().unwrap();
        assert!(html.trim().is_empty());

        let html = CartCountTemplate { count: 3 }.render().unwrap();
        assert!(html.contains('3'));
    }
}

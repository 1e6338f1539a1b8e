//! Integration tests for the session cart.
//!
//! Each test drives a real storefront over HTTP with a cookie-keeping client,
//! so the cart lives in a real session between requests.

use modernshop_integration_tests::{TestContext, product};
use reqwest::StatusCode;

/// Extract the rendered quantity for the first cart line.
fn first_quantity(html: &str) -> Option<&str> {
    let start = html.find("<span class=\"quantity\">")? + "<span class=\"quantity\">".len();
    let end = html[start..].find("</span>")? + start;
    html.get(start..end)
}

// =============================================================================
// Cart Scenario
// =============================================================================

#[tokio::test]
async fn test_add_merge_update_remove_scenario() {
    let ctx = TestContext::with_products(vec![product(1, "A", 1000, 10)]).await;

    // Add one unit
    let resp = ctx
        .post_form("/cart/add", &[("product_id", "1"), ("quantity", "1")])
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("HX-Trigger").and_then(|v| v.to_str().ok()),
        Some("cart-updated")
    );
    let badge = resp.text().await.unwrap();
    assert!(badge.contains('1'));

    let (_, html) = ctx.get_page("/cart").await;
    assert_eq!(first_quantity(&html), Some("1"));
    assert!(html.contains("<dd class=\"total\">$10.00</dd>"));

    // Adding the same product merges into one line
    ctx.post_form("/cart/add", &[("product_id", "1"), ("quantity", "2")])
        .await;
    let (_, html) = ctx.get_page("/cart").await;
    assert_eq!(html.matches("class=\"cart-line\"").count(), 1);
    assert_eq!(first_quantity(&html), Some("3"));
    assert!(html.contains("<dd class=\"total\">$30.00</dd>"));

    // Set quantity back to one
    let resp = ctx
        .post_form("/cart/update", &[("product_id", "1"), ("quantity", "1")])
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fragment = resp.text().await.unwrap();
    assert!(fragment.contains("<dd class=\"total\">$10.00</dd>"));

    // Remove the line
    let resp = ctx.post_form("/cart/remove", &[("product_id", "1")]).await;
    let fragment = resp.text().await.unwrap();
    assert!(fragment.contains("Your cart is empty"));

    let (_, html) = ctx.get_page("/cart").await;
    assert!(html.contains("Your cart is empty"));
}

// =============================================================================
// Quantity Rules
// =============================================================================

#[tokio::test]
async fn test_update_to_zero_clamps_to_one() {
    let ctx = TestContext::with_products(vec![product(1, "A", 500, 10)]).await;
    ctx.post_form("/cart/add", &[("product_id", "1"), ("quantity", "4")])
        .await;

    let resp = ctx
        .post_form("/cart/update", &[("product_id", "1"), ("quantity", "0")])
        .await;
    let fragment = resp.text().await.unwrap();
    assert_eq!(first_quantity(&fragment), Some("1"));
    assert!(fragment.contains("<dd class=\"total\">$5.00</dd>"));
}

#[tokio::test]
async fn test_add_clamps_to_stock() {
    let ctx = TestContext::with_products(vec![product(2, "Lamp", 2000, 3)]).await;

    ctx.post_form("/cart/add", &[("product_id", "2"), ("quantity", "10")])
        .await;

    let (_, html) = ctx.get_page("/cart").await;
    assert_eq!(first_quantity(&html), Some("3"));
    assert!(html.contains("<dd class=\"total\">$60.00</dd>"));
}

#[tokio::test]
async fn test_add_without_quantity_adds_one() {
    let ctx = TestContext::with_products(vec![product(2, "Lamp", 2000, 3)]).await;

    ctx.post_form("/cart/add", &[("product_id", "2")]).await;

    let (_, html) = ctx.get_page("/cart").await;
    assert_eq!(first_quantity(&html), Some("1"));
}

#[tokio::test]
async fn test_add_with_cleared_quantity_adds_one() {
    let ctx = TestContext::with_products(vec![product(2, "Lamp", 2000, 3)]).await;

    let resp = ctx
        .post_form("/cart/add", &[("product_id", "2"), ("quantity", "")])
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let (_, html) = ctx.get_page("/cart").await;
    assert_eq!(first_quantity(&html), Some("1"));
}

#[tokio::test]
async fn test_add_out_of_stock_is_rejected() {
    let ctx = TestContext::with_products(vec![product(3, "Sold Out", 100, 0)]).await;

    let resp = ctx
        .post_form("/cart/add", &[("product_id", "3"), ("quantity", "1")])
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let (_, html) = ctx.get_page("/cart").await;
    assert!(html.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_add_unknown_product_is_not_found() {
    let ctx = TestContext::with_products(vec![]).await;

    let resp = ctx
        .post_form("/cart/add", &[("product_id", "99"), ("quantity", "1")])
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// No-ops, Clear and Sessions
// =============================================================================

#[tokio::test]
async fn test_remove_missing_leaves_cart_unchanged() {
    let ctx = TestContext::with_products(vec![product(1, "A", 1000, 10)]).await;
    ctx.post_form("/cart/add", &[("product_id", "1"), ("quantity", "2")])
        .await;

    let resp = ctx.post_form("/cart/remove", &[("product_id", "42")]).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let (_, html) = ctx.get_page("/cart").await;
    assert_eq!(first_quantity(&html), Some("2"));
    assert!(html.contains("<dd class=\"total\">$20.00</dd>"));
}

#[tokio::test]
async fn test_clear_empties_cart() {
    let ctx = TestContext::with_products(vec![
        product(1, "A", 1000, 10),
        product(2, "B", 250, 10),
    ])
    .await;
    ctx.post_form("/cart/add", &[("product_id", "1")]).await;
    ctx.post_form("/cart/add", &[("product_id", "2")]).await;

    let resp = ctx.post_form("/cart/clear", &[]).await;
    let fragment = resp.text().await.unwrap();
    assert!(fragment.contains("Your cart is empty"));

    let (_, badge) = ctx.get_page("/cart/count").await;
    assert!(badge.trim().is_empty());
}

#[tokio::test]
async fn test_badge_counts_distinct_lines() {
    let ctx = TestContext::with_products(vec![
        product(1, "A", 1000, 10),
        product(2, "B", 250, 10),
    ])
    .await;
    ctx.post_form("/cart/add", &[("product_id", "1"), ("quantity", "3")])
        .await;
    ctx.post_form("/cart/add", &[("product_id", "2")]).await;

    let (status, badge) = ctx.get_page("/cart/count").await;
    assert_eq!(status, StatusCode::OK);
    assert!(badge.contains(">2<"));

    let (_, html) = ctx.get_page("/cart").await;
    assert!(html.contains("<dd class=\"item-count\">4</dd>"));
}

#[tokio::test]
async fn test_carts_are_per_session() {
    let ctx = TestContext::with_products(vec![product(1, "A", 1000, 10)]).await;
    ctx.post_form("/cart/add", &[("product_id", "1")]).await;

    let other = ctx.other_shopper();
    let (_, html) = other.get_page("/cart").await;
    assert!(html.contains("Your cart is empty"));

    let (_, html) = ctx.get_page("/cart").await;
    assert_eq!(first_quantity(&html), Some("1"));
}

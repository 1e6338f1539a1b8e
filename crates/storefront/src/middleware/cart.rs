//! Session cart extractor.
//!
//! [`SessionCart`] is how route handlers reach the shopper's cart. It loads
//! the [`Cart`] from the session when extracted and writes it back after
//! every mutation, so handlers never share cart state outside the session.

use axum::{extract::FromRequestParts, http::request::Parts};
use modernshop_core::{Cart, LineItem, ProductId};
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::session_keys;

/// The current shopper's cart, bound to their session.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(mut cart: SessionCart) -> Result<String, AppError> {
///     cart.remove_item(ProductId::new(1)).await?;
///     Ok(cart.cart().total().to_string())
/// }
/// ```
pub struct SessionCart {
    session: Session,
    cart: Cart,
}

impl<S> FromRequestParts<S> for SessionCart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))?;

        let cart = load_cart(&session).await;

        Ok(Self { session, cart })
    }
}

impl SessionCart {
    /// The cart as loaded or last saved.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add a line, merging with an existing line for the same product.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    pub async fn add_item(&mut self, item: LineItem) -> Result<(), AppError> {
        self.cart.add_item(item);
        self.save().await
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    pub async fn remove_item(&mut self, id: ProductId) -> Result<bool, AppError> {
        let removed = self.cart.remove_item(id);
        if removed {
            self.save().await?;
        }
        Ok(removed)
    }

    /// Set the quantity for `id`, clamped to at least one.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    pub async fn update_quantity(&mut self, id: ProductId, quantity: i64) -> Result<bool, AppError> {
        let updated = self.cart.update_quantity(id, quantity);
        if updated {
            self.save().await?;
        }
        Ok(updated)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    pub async fn clear(&mut self) -> Result<(), AppError> {
        self.cart.clear();
        self.save().await
    }

    async fn save(&self) -> Result<(), AppError> {
        self.session.insert(session_keys::CART, &self.cart).await?;
        Ok(())
    }
}

/// Load the cart from the session, falling back to an empty cart.
async fn load_cart(session: &Session) -> Cart {
    match session.get::<Cart>(session_keys::CART).await {
        Ok(cart) => cart.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Discarding unreadable session cart: {e}");
            Cart::new()
        }
    }
}

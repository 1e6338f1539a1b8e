//! ModernShop Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the storefront application: routes, sessions, request IDs and tracing.
///
/// Sentry layers are added by the binary so tests can run without a Sentry hub.
pub fn build_app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .merge(routes::routes())
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(middleware::request_id::make_request_span),
                )
                .layer(axum::middleware::from_fn(middleware::request_id_middleware))
                .layer(session_layer),
        )
        .with_state(state)
}

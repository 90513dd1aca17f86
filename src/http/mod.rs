//! Axum router and HTTP handlers.
//!
//! `build_router` is the single entry point; `main.rs` attaches middleware
//! layers so tests can drive the bare router.

mod caller;
mod cart;
mod envelope;
mod orders;
mod products;
mod state;

pub use caller::USER_ID_HEADER;
pub use envelope::{ApiError, Envelope};
pub use state::AppState;

use axum::{
    http::StatusCode,
    response::Response,
    routing::{get, post, put},
    Router,
};
use serde::Serialize;

/// Build the complete application router wired to the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/products", get(products::list_products))
        .route("/products/:id", get(products::get_product))
        .route("/orders", get(orders::list_all_orders).post(orders::create_order))
        .route("/orders/my-orders", get(orders::list_my_orders))
        .route(
            "/orders/:id",
            get(orders::get_order)
                .put(orders::update_order)
                .delete(orders::delete_order),
        )
        .route("/cart", get(cart::get_cart).delete(cart::clear_cart))
        .route("/cart/items", post(cart::add_item))
        .route("/cart/items/:product_id", put(cart::update_item).delete(cart::remove_item))
        .route("/cart/checkout", post(cart::checkout))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    service: &'static str,
    version: &'static str,
}

async fn health() -> Response {
    envelope::respond(
        StatusCode::OK,
        "ok",
        HealthResponse {
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

/// Parses a numeric path id, answering 400 with `message` otherwise.
fn parse_id(raw: &str, message: &str) -> Result<u64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::validation(message))
}

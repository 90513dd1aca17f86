use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::Deserialize;

use super::envelope::respond;
use super::{parse_id, ApiError, AppState};
use crate::domain::{Caller, OrderStatus, ProductId};

const INVALID_PRODUCT_ID: &str = "Invalid productId";

fn one() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddCartItemRequest {
    product_id: ProductId,
    #[serde(default = "one")]
    quantity: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateCartItemRequest {
    quantity: u32,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CheckoutRequest {
    #[serde(default)]
    status: Option<OrderStatus>,
}

pub(crate) async fn get_cart(State(st): State<AppState>, caller: Caller) -> Result<Response, ApiError> {
    let cart = st.carts.get_cart(caller.user_id).await?;
    Ok(respond(StatusCode::OK, "Cart retrieved successfully", cart))
}

pub(crate) async fn clear_cart(State(st): State<AppState>, caller: Caller) -> Result<Response, ApiError> {
    let cart = st.carts.clear(caller.user_id).await?;
    Ok(respond(StatusCode::OK, "Cart cleared", cart))
}

pub(crate) async fn add_item(
    State(st): State<AppState>,
    caller: Caller,
    body: Result<Json<AddCartItemRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = body?;
    let cart = st.carts.add_item(caller.user_id, req.product_id, req.quantity).await?;
    Ok(respond(StatusCode::OK, "Item added to cart", cart))
}

pub(crate) async fn update_item(
    State(st): State<AppState>,
    caller: Caller,
    Path(raw_id): Path<String>,
    body: Result<Json<UpdateCartItemRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let product_id = parse_id(&raw_id, INVALID_PRODUCT_ID)?;
    let Json(req) = body?;
    let cart = st.carts.update_item(caller.user_id, product_id, req.quantity).await?;
    Ok(respond(StatusCode::OK, "Cart item updated", cart))
}

pub(crate) async fn remove_item(
    State(st): State<AppState>,
    caller: Caller,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let product_id = parse_id(&raw_id, INVALID_PRODUCT_ID)?;
    let cart = st.carts.remove_item(caller.user_id, product_id).await?;
    Ok(respond(StatusCode::OK, "Item removed from cart", cart))
}

/// A request without a JSON body checks out with the default status; a body
/// that is present must parse.
pub(crate) async fn checkout(
    State(st): State<AppState>,
    caller: Caller,
    body: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let req = match body {
        Ok(Json(req)) => req,
        Err(JsonRejection::MissingJsonContentType(_)) => CheckoutRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };
    let order = st.carts.checkout(caller, req.status).await?;
    Ok(respond(StatusCode::CREATED, "Order created from cart", order))
}

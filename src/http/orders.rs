use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::Deserialize;

use super::envelope::respond;
use super::{parse_id, ApiError, AppState};
use crate::domain::{Caller, OrderLine, OrderScope, OrderStatus};

const INVALID_ORDER_ID: &str = "Order id is not valid";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateOrderRequest {
    items: Vec<OrderLine>,
    #[serde(default)]
    status: Option<OrderStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateOrderRequest {
    #[serde(default)]
    items: Option<Vec<OrderLine>>,
    #[serde(default)]
    status: Option<OrderStatus>,
}

// ---------------------------------------------------------------------------
// GET /orders (admin)
// ---------------------------------------------------------------------------

pub(crate) async fn list_all_orders(State(st): State<AppState>, caller: Caller) -> Result<Response, ApiError> {
    let orders = st.orders.list_orders(caller, OrderScope::All).await?;
    Ok(respond(StatusCode::OK, "Orders retrieved successfully", orders))
}

// ---------------------------------------------------------------------------
// GET /orders/my-orders
// ---------------------------------------------------------------------------

pub(crate) async fn list_my_orders(State(st): State<AppState>, caller: Caller) -> Result<Response, ApiError> {
    let orders = st.orders.list_orders(caller, OrderScope::Mine).await?;
    Ok(respond(StatusCode::OK, "User orders retrieved successfully", orders))
}

// ---------------------------------------------------------------------------
// GET /orders/:id
// ---------------------------------------------------------------------------

pub(crate) async fn get_order(
    State(st): State<AppState>,
    caller: Caller,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&raw_id, INVALID_ORDER_ID)?;
    let order = st.orders.get_order(caller, id).await?;
    Ok(respond(StatusCode::OK, "Order was found", order))
}

// ---------------------------------------------------------------------------
// POST /orders
// ---------------------------------------------------------------------------

pub(crate) async fn create_order(
    State(st): State<AppState>,
    caller: Caller,
    body: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = body?;
    let order = st.orders.create_order(caller, req.items, req.status).await?;
    Ok(respond(StatusCode::CREATED, "Order created successfully", order))
}

// ---------------------------------------------------------------------------
// PUT /orders/:id
// ---------------------------------------------------------------------------

pub(crate) async fn update_order(
    State(st): State<AppState>,
    caller: Caller,
    Path(raw_id): Path<String>,
    body: Result<Json<UpdateOrderRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = parse_id(&raw_id, INVALID_ORDER_ID)?;
    let Json(req) = body?;
    let order = st.orders.update_order(caller, id, req.items, req.status).await?;
    Ok(respond(StatusCode::OK, "Order updated successfully", order))
}

// ---------------------------------------------------------------------------
// DELETE /orders/:id
// ---------------------------------------------------------------------------

pub(crate) async fn delete_order(
    State(st): State<AppState>,
    caller: Caller,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&raw_id, INVALID_ORDER_ID)?;
    st.orders.delete_order(caller, id).await?;
    Ok(respond(StatusCode::OK, "Order successfully deleted", serde_json::json!({})))
}

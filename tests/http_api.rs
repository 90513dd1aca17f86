//! In-process HTTP tests: the bare router driven with `tower::ServiceExt::oneshot`,
//! backed by a real actor system. No network required.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use storefront_orders::app_system::{SeedCatalog, StoreSystem};
use storefront_orders::domain::{ProductCreate, Role, UserCreate};
use storefront_orders::http::{build_router, AppState, USER_ID_HEADER};
use tower::ServiceExt; // oneshot

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const ALICE: u64 = 1;
const BOB: u64 = 2;
const ADMIN: u64 = 3;
const WIDGET: u64 = 1;

/// Users 1..=3 (Alice, Bob, admin) and product 1: price 10, stock 5.
async fn boot() -> (StoreSystem, AppState) {
    let system = StoreSystem::new(16);
    let catalog = SeedCatalog {
        users: vec![
            UserCreate::new("Alice", "alice@example.com", Role::User),
            UserCreate::new("Bob", "bob@example.com", Role::User),
            UserCreate::new("Root", "root@example.com", Role::Admin),
        ],
        products: vec![ProductCreate::new("Widget", Decimal::from(10), 5)],
    };
    system.seed(&catalog).await.expect("seed failed");
    let state = AppState::from_system(&system);
    (system, state)
}

async fn call(state: &AppState, method: &str, uri: &str, user: Option<u64>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_ID_HEADER, user.to_string());
    }
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = build_router(state.clone()).oneshot(req).await.expect("oneshot failed");
    let status = resp.status();
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("body collect failed")
        .to_bytes();
    let json = serde_json::from_slice(&bytes).expect("body is not valid JSON");
    (status, json)
}

async fn widget_stock(state: &AppState) -> u64 {
    let (_, json) = call(state, "GET", "/products/1", None, None).await;
    json["data"]["stock"].as_u64().expect("stock missing")
}

async fn place_order(state: &AppState, user: u64, quantity: u32) -> (StatusCode, Value) {
    let body = json!({ "items": [{ "productId": WIDGET, "quantity": quantity }] });
    call(state, "POST", "/orders", Some(user), Some(body)).await
}

// ---------------------------------------------------------------------------
// Order creation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_order_returns_201_and_decrements_stock() {
    let (_system, state) = boot().await;

    let (status, json) = place_order(&state, ALICE, 3).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Order created successfully");
    assert_eq!(json["data"]["totalPrice"].as_f64(), Some(30.0));
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["userId"], ALICE);
    assert_eq!(json["data"]["user"]["name"], "Alice");
    assert_eq!(json["data"]["items"][0]["quantity"], 3);
    assert_eq!(json["data"]["items"][0]["price"].as_f64(), Some(10.0));
    assert_eq!(json["data"]["items"][0]["product"]["name"], "Widget");
    assert_eq!(widget_stock(&state).await, 2);
}

#[tokio::test]
async fn insufficient_stock_is_400_and_stock_unchanged() {
    let (_system, state) = boot().await;

    let (status, json) = place_order(&state, ALICE, 10).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Insufficient stock for product Widget");
    assert_eq!(widget_stock(&state).await, 5);
}

#[tokio::test]
async fn malformed_order_bodies_are_400() {
    let (_system, state) = boot().await;

    let (status, json) = call(&state, "POST", "/orders", Some(ALICE), Some(json!({ "items": [] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Order must contain at least one item");

    let (status, _) = call(&state, "POST", "/orders", Some(ALICE), Some(json!({ "status": "pending" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body = json!({ "items": [{ "productId": WIDGET, "quantity": -1 }] });
    let (status, _) = call(&state, "POST", "/orders", Some(ALICE), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body = json!({ "items": [{ "productId": WIDGET, "quantity": 1 }], "status": "shipped" });
    let (status, _) = call(&state, "POST", "/orders", Some(ALICE), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body = json!({ "items": [{ "productId": 77, "quantity": 1 }] });
    let (status, json) = call(&state, "POST", "/orders", Some(ALICE), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Product 77 not found");

    assert_eq!(widget_stock(&state).await, 5);
}

#[tokio::test]
async fn missing_or_unknown_caller_is_401() {
    let (_system, state) = boot().await;

    let (status, json) = call(&state, "GET", "/orders/my-orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["success"], false);

    let (status, _) = call(&state, "GET", "/orders/my-orders", Some(42), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Ownership
// ---------------------------------------------------------------------------

#[tokio::test]
async fn other_users_orders_are_forbidden() {
    let (_system, state) = boot().await;
    let (_, created) = place_order(&state, ALICE, 1).await;
    let uri = format!("/orders/{}", created["data"]["id"]);

    let (status, json) = call(&state, "GET", &uri, Some(BOB), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Forbidden: Cannot view other user orders");

    let (status, _) = call(&state, "PUT", &uri, Some(BOB), Some(json!({ "status": "cancelled" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(&state, "DELETE", &uri, Some(BOB), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, json) = call(&state, "PUT", &uri, Some(ADMIN), Some(json!({ "status": "cancelled" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "cancelled");

    let (status, _) = call(&state, "DELETE", &uri, Some(ALICE), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&state, "GET", &uri, Some(ALICE), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bad_order_ids_are_400_and_missing_orders_404() {
    let (_system, state) = boot().await;

    let (status, json) = call(&state, "GET", "/orders/abc", Some(ALICE), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Order id is not valid");

    let (status, _) = call(&state, "DELETE", "/orders/999", Some(ALICE), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_is_scoped() {
    let (_system, state) = boot().await;
    place_order(&state, ALICE, 1).await;
    place_order(&state, BOB, 1).await;

    let (status, json) = call(&state, "GET", "/orders/my-orders", Some(ALICE), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().map(Vec::len), Some(1));

    let (status, json) = call(&state, "GET", "/orders", Some(BOB), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Forbidden: Admins only");

    let (status, json) = call(&state, "GET", "/orders", Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn update_replaces_items_and_recomputes_total() {
    let (_system, state) = boot().await;
    let (_, created) = place_order(&state, ALICE, 1).await;
    let uri = format!("/orders/{}", created["data"]["id"]);

    let body = json!({ "items": [{ "productId": WIDGET, "quantity": 4 }] });
    let (status, json) = call(&state, "PUT", &uri, Some(ALICE), Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["totalPrice"].as_f64(), Some(40.0));
    assert_eq!(json["data"]["items"].as_array().map(Vec::len), Some(1));

    let body = json!({ "items": [{ "productId": WIDGET, "quantity": 0 }] });
    let (status, json) = call(&state, "PUT", &uri, Some(ALICE), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Each item must have productId and quantity >= 1");
}

// ---------------------------------------------------------------------------
// Cart
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cart_checkout_flow() {
    let (_system, state) = boot().await;

    let (status, json) = call(&state, "POST", "/cart/items", Some(ALICE), Some(json!({ "productId": WIDGET }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["items"][0]["quantity"], 1);
    assert_eq!(json["data"]["items"][0]["product"]["stock"], 5);

    let (status, json) = call(&state, "PUT", "/cart/items/1", Some(ALICE), Some(json!({ "quantity": 2 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["items"][0]["quantity"], 2);

    let (status, _) = call(&state, "POST", "/cart/items", Some(ALICE), Some(json!({ "productId": 99 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = call(&state, "POST", "/cart/checkout", Some(ALICE), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["totalPrice"].as_f64(), Some(20.0));

    let (_, json) = call(&state, "GET", "/cart", Some(ALICE), None).await;
    assert_eq!(json["data"]["items"].as_array().map(Vec::len), Some(0));
    assert_eq!(widget_stock(&state).await, 3);

    let (status, json) = call(&state, "POST", "/cart/checkout", Some(ALICE), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Cart is empty");
}

#[tokio::test]
async fn checkout_body_must_parse_when_present() {
    let (_system, state) = boot().await;
    call(&state, "POST", "/cart/items", Some(ALICE), Some(json!({ "productId": WIDGET, "quantity": 2 }))).await;

    let (status, json) = call(&state, "POST", "/cart/checkout", Some(ALICE), Some(json!({ "status": "shipped" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);

    let (_, json) = call(&state, "GET", "/cart", Some(ALICE), None).await;
    assert_eq!(json["data"]["items"][0]["quantity"], 2);
    assert_eq!(widget_stock(&state).await, 5);

    let (status, json) = call(&state, "POST", "/cart/checkout", Some(ALICE), Some(json!({ "status": "completed" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["status"], "completed");
}

#[tokio::test]
async fn cart_rejects_quantities_above_stock() {
    let (_system, state) = boot().await;

    let body = json!({ "productId": WIDGET, "quantity": 6 });
    let (status, json) = call(&state, "POST", "/cart/items", Some(BOB), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Insufficient stock for product Widget");

    let (status, _) = call(&state, "PUT", "/cart/items/x", Some(BOB), Some(json!({ "quantity": 1 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&state, "DELETE", "/cart/items/1", Some(BOB), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn health_and_products_are_public() {
    let (_system, state) = boot().await;

    let (status, json) = call(&state, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["service"], "storefront-orders");

    let (status, json) = call(&state, "GET", "/products", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"][0]["name"], "Widget");

    let (status, _) = call(&state, "GET", "/products/9", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

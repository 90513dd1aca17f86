use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ProductId, ProductSummary, UserId, UserSummary};

pub type OrderId = u64;
pub type OrderItemId = u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

/// One requested (product, quantity) pair, as submitted by a caller or read from a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A line whose unit price has been captured from the inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub item_id: OrderItemId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    /// Unit price at the moment the item was written; later price changes don't touch it.
    pub price: Decimal,
}

/// Represents a customer order and the items it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub total_price: Decimal,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
}

/// Params for creating a new order. The total is derived from `items`.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: UserId,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    pub items: Vec<PricedLine>,
}

/// Replaces the item set and/or the status. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub items: Option<Vec<PricedLine>>,
    pub status: Option<OrderStatus>,
}

impl OrderLine {
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self { product_id, quantity }
    }
}

impl PricedLine {
    /// `None` when quantity × price does not fit in a `Decimal`.
    pub fn subtotal(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

impl Order {
    /// Σ quantity × unit price over the current items, `None` on overflow.
    pub fn items_total(&self) -> Option<Decimal> {
        self.items.iter().try_fold(Decimal::ZERO, |total, item| {
            total.checked_add(item.price.checked_mul(Decimal::from(item.quantity))?)
        })
    }
}

// -----------------------------------------------------------------------------
// Display views
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Decimal,
    pub product: Option<ProductSummary>,
}

/// An order with its owner and product details resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: OrderId,
    pub user_id: UserId,
    pub total_price: Decimal,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub user: Option<UserSummary>,
    pub items: Vec<OrderItemView>,
}

/// Which orders a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    /// Orders owned by the caller.
    Mine,
    /// Every order; admin only.
    All,
}

use rust_decimal::Decimal;
use serde::Serialize;

use super::{OrderLine, ProductId, UserId};

/// A user's mutable staging list. Carts are keyed by their owner's id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    pub user_id: UserId,
    pub items: Vec<CartItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl Cart {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id, items: Vec::new() }
    }

    pub fn item(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    /// The cart contents as order lines, in the order they were added.
    pub fn lines(&self) -> Vec<OrderLine> {
        self.items
            .iter()
            .map(|item| OrderLine::new(item.product_id, item.quantity))
            .collect()
    }
}

/// Product details shown next to cart lines; stock is included so clients can cap quantities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartProduct {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub product_id: ProductId,
    pub quantity: u32,
    pub product: Option<CartProduct>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub user_id: UserId,
    pub items: Vec<CartItemView>,
}

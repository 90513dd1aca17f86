use rust_decimal::Decimal;

use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderId, OrderItem, OrderPatch, PricedLine};
use super::error::OrderError;

impl Entity for Order {
    type Id = OrderId;
    type CreateParams = OrderCreate;
    type Patch = OrderPatch;
    type Action = ();
    type ActionResult = ();
    type Error = OrderError;

    /// Creates a new Order with its items; the total is computed here and
    /// never taken from the caller.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        let mut order = Self {
            id,
            user_id: params.user_id,
            total_price: Default::default(),
            order_date: params.order_date,
            status: params.status,
            items: Vec::new(),
        };
        order.replace_items(params.items)?;
        Ok(order)
    }

    /// Replaces items (recomputing the total) and/or sets the status.
    fn on_update(&mut self, patch: OrderPatch) -> Result<(), OrderError> {
        if let Some(items) = patch.items {
            self.replace_items(items)?;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), OrderError> {
        Ok(())
    }
}

impl Order {
    fn replace_items(&mut self, lines: Vec<PricedLine>) -> Result<(), OrderError> {
        if lines.is_empty() {
            return Err(OrderError::Validation("Order must contain at least one item".to_string()));
        }
        if lines.iter().any(|line| line.quantity == 0) {
            return Err(OrderError::Validation("Quantity must be >= 1".to_string()));
        }
        if let Some(line) = lines.iter().find(|line| line.price.is_sign_negative()) {
            return Err(OrderError::Validation(format!("Price for product {} cannot be negative", line.product_id)));
        }

        // Checked: a panic here would take the whole order actor down.
        self.total_price = lines
            .iter()
            .try_fold(Decimal::ZERO, |total, line| total.checked_add(line.subtotal()?))
            .ok_or_else(|| OrderError::Validation("Order total is too large".to_string()))?;
        self.items = lines
            .into_iter()
            .map(|line| OrderItem {
                id: line.item_id,
                order_id: self.id,
                product_id: line.product_id,
                quantity: line.quantity,
                price: line.price,
            })
            .collect();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderStatus;
    use chrono::Utc;

    fn line(item_id: u64, product_id: u64, quantity: u32, cents: i64) -> PricedLine {
        PricedLine { item_id, product_id, quantity, price: Decimal::new(cents, 2) }
    }

    fn create(items: Vec<PricedLine>) -> Result<Order, OrderError> {
        Order::from_create_params(
            9,
            OrderCreate { user_id: 1, status: OrderStatus::default(), order_date: Utc::now(), items },
        )
    }

    #[test]
    fn total_matches_items() {
        let order = create(vec![line(1, 1, 3, 1000), line(2, 2, 2, 250)]).unwrap();
        assert_eq!(order.total_price, Decimal::new(3500, 2));
        assert_eq!(Some(order.total_price), order.items_total());
        assert!(order.items.iter().all(|item| item.order_id == 9));
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn empty_and_zero_quantity_orders_are_rejected() {
        assert!(matches!(create(vec![]), Err(OrderError::Validation(_))));
        assert!(matches!(create(vec![line(1, 1, 0, 100)]), Err(OrderError::Validation(_))));
    }

    #[test]
    fn replacing_items_recomputes_total_and_keeps_status() {
        let mut order = create(vec![line(1, 1, 3, 1000)]).unwrap();
        order.status = OrderStatus::Completed;

        let patch = OrderPatch { items: Some(vec![line(5, 2, 4, 125)]), status: None };
        order.on_update(patch).unwrap();

        assert_eq!(order.total_price, Decimal::new(500, 2));
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].id, 5);
        assert_eq!(order.status, OrderStatus::Completed);
    }

    #[test]
    fn overflowing_total_is_rejected_and_order_kept() {
        let mut order = create(vec![line(1, 1, 1, 1000)]).unwrap();
        let huge = PricedLine { item_id: 2, product_id: 2, quantity: u32::MAX, price: Decimal::from(9_000_000_000_000_000_000i64) };

        let patch = OrderPatch { items: Some(vec![huge.clone(), huge.clone(), huge]), status: None };
        let err = order.on_update(patch).unwrap_err();

        assert_eq!(err, OrderError::Validation("Order total is too large".into()));
        assert_eq!(order.total_price, Decimal::new(1000, 2));
    }
}

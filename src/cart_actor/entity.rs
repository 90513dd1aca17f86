use crate::actor_framework::Entity;
use crate::domain::{Cart, CartItem, UserId};
use super::actions::CartAction;
use super::error::CartError;

impl Entity for Cart {
    type Id = UserId;
    type CreateParams = ();
    type Patch = ();
    type Action = CartAction;
    type ActionResult = Cart;
    type Error = CartError;

    fn from_create_params(user_id: UserId, _params: ()) -> Result<Self, CartError> {
        Ok(Cart::new(user_id))
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), CartError> {
        Ok(())
    }

    /// Applies a cart mutation and returns the resulting cart.
    fn handle_action(&mut self, action: CartAction) -> Result<Cart, CartError> {
        match action {
            CartAction::Add { quantity: 0, .. } | CartAction::Set { quantity: 0, .. } => {
                return Err(CartError::Validation("Invalid productId or quantity".to_string()));
            }
            CartAction::Add { product_id, quantity, available } => {
                match self.items.iter_mut().find(|item| item.product_id == product_id) {
                    Some(item) => item.quantity = item.quantity.saturating_add(quantity).min(available),
                    None => self.items.push(CartItem { product_id, quantity }),
                }
            }
            CartAction::Set { product_id, quantity } => {
                match self.items.iter_mut().find(|item| item.product_id == product_id) {
                    Some(item) => item.quantity = quantity,
                    None => self.items.push(CartItem { product_id, quantity }),
                }
            }
            CartAction::Remove(product_id) => self.items.retain(|item| item.product_id != product_id),
            CartAction::Clear => self.items.clear(),
        }
        Ok(self.clone())
    }
}

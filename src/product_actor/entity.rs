use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductId, ProductPatch};
use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;

impl Entity for Product {
    type Id = ProductId;
    type CreateParams = ProductCreate;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Error = ProductError;

    /// Creates a new Product from creation parameters.
    ///
    /// # Errors
    /// Returns `InvalidPrice` for negative prices.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        if params.price.is_sign_negative() {
            return Err(ProductError::InvalidPrice(params.price));
        }
        Ok(Self {
            id,
            name: params.name,
            price: params.price,
            stock: params.stock,
        })
    }

    /// Updates the product's price and/or stock.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), ProductError> {
        if let Some(price) = patch.price {
            if price.is_sign_negative() {
                return Err(ProductError::InvalidPrice(price));
            }
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        Ok(())
    }

    /// Handles product-specific actions.
    ///
    /// # Actions
    /// - `CheckStock`: Returns the current stock level
    /// - `Reserve(amount)`: Decrements stock, returning the price seen at that moment
    /// - `Release(amount)`: Increments stock
    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::StockLevel(self.stock)),
            ProductAction::Reserve(0) | ProductAction::Release(0) => Err(ProductError::InvalidQuantity(0)),
            ProductAction::Reserve(amount) => {
                if self.stock < amount {
                    return Err(ProductError::InsufficientStock {
                        name: self.name.clone(),
                        requested: amount,
                        available: self.stock,
                    });
                }
                self.stock -= amount;
                Ok(ProductActionResult::Reserved(self.summary()))
            }
            ProductAction::Release(amount) => {
                self.stock = self
                    .stock
                    .checked_add(amount)
                    .ok_or_else(|| ProductError::StockOverflow(self.name.clone()))?;
                Ok(ProductActionResult::Released(self.stock))
            }
        }
    }
}

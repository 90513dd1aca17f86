use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::product_actor::ProductError;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("{0}")]
    Validation(String),
    #[error("Product {0} not found")]
    ProductNotFound(String),
    #[error("Insufficient stock for product {0}")]
    InsufficientStock(String),
    #[error("Cart storage error: {0}")]
    Internal(String),
}

impl From<FrameworkError<CartError>> for CartError {
    fn from(err: FrameworkError<CartError>) -> Self {
        match err {
            FrameworkError::Entity(inner) => inner,
            other => CartError::Internal(other.to_string()),
        }
    }
}

impl From<ProductError> for CartError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => CartError::ProductNotFound(id),
            ProductError::InsufficientStock { name, .. } => CartError::InsufficientStock(name),
            ProductError::InvalidQuantity(_) => CartError::Validation("Invalid productId or quantity".to_string()),
            other => CartError::Internal(other.to_string()),
        }
    }
}

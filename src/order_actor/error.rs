use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::product_actor::ProductError;
use crate::user_actor::UserError;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("{0}")]
    Validation(String),
    #[error("Order {0} not found")]
    NotFound(String),
    #[error("Product {0} not found")]
    ProductNotFound(String),
    #[error("Insufficient stock for product {0}")]
    InsufficientStock(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Order storage error: {0}")]
    Internal(String),
}

impl From<FrameworkError<OrderError>> for OrderError {
    fn from(err: FrameworkError<OrderError>) -> Self {
        match err {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::Entity(inner) => inner,
            other => OrderError::Internal(other.to_string()),
        }
    }
}

impl From<ProductError> for OrderError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => OrderError::ProductNotFound(id),
            ProductError::InsufficientStock { name, .. } => OrderError::InsufficientStock(name),
            ProductError::InvalidQuantity(_) => OrderError::Validation("Quantity must be >= 1".to_string()),
            other => OrderError::Internal(other.to_string()),
        }
    }
}

impl From<UserError> for OrderError {
    fn from(err: UserError) -> Self {
        OrderError::Internal(err.to_string())
    }
}

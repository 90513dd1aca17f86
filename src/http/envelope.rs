use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::error;

use crate::cart_actor::CartError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::user_actor::UserError;

/// Every response body: `{ success, message, data }`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

pub(crate) fn respond<T: Serialize>(status: StatusCode, message: impl Into<String>, data: T) -> Response {
    (
        status,
        Json(Envelope {
            success: true,
            message: message.into(),
            data,
        }),
    )
        .into_response()
}

/// A failed request, rendered as an unsuccessful envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub data: Value,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: json!({}),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// 500 carrying the underlying failure in `data`.
    pub fn internal(context: &str, err: impl std::fmt::Display) -> Self {
        let detail = err.to_string();
        error!(error = %detail, "{}", context);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: context.to_string(),
            data: Value::String(detail),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(Envelope {
                success: false,
                message: self.message,
                data: self.data,
            }),
        )
            .into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Validation(_) | OrderError::ProductNotFound(_) | OrderError::InsufficientStock(_) => {
                ApiError::validation(err.to_string())
            }
            OrderError::NotFound(_) => ApiError::not_found(err.to_string()),
            OrderError::Forbidden(_) => ApiError::forbidden(err.to_string()),
            OrderError::Internal(_) => ApiError::internal("Error processing order", err),
        }
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::Validation(_) | CartError::InsufficientStock(_) => ApiError::validation(err.to_string()),
            CartError::ProductNotFound(_) => ApiError::not_found(err.to_string()),
            CartError::Internal(_) => ApiError::internal("Error processing cart", err),
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => ApiError::not_found(err.to_string()),
            other => ApiError::internal("Error retrieving products", other),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        ApiError::internal("Error resolving caller", err)
    }
}

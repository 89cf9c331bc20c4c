//! Unified error handling for the HTTP boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::cart_actor::CartError;
use crate::product_actor::ProductError;

/// Application-level error type returned by handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// No user identity on a request that needs one.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<ProductError> for AppError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(id) => Self::NotFound(id),
            ProductError::InvalidPrice(_) => Self::BadRequest(e.to_string()),
            ProductError::ActorCommunicationError(msg) => Self::Internal(msg),
        }
    }
}

impl From<CartError> for AppError {
    fn from(e: CartError) -> Self {
        match e {
            CartError::Unauthenticated => Self::Unauthorized(e.to_string()),
            CartError::NotFound(id) => Self::NotFound(id),
            CartError::InvalidQuantity(_) => Self::BadRequest(e.to_string()),
            CartError::ActorCommunicationError(msg) => Self::Internal(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Internal(_) = self {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let error = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(err: impl Into<AppError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn test_cart_errors_map_to_status_codes() {
        assert_eq!(status(CartError::Unauthenticated), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status(CartError::NotFound("cart_item_1".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status(CartError::InvalidQuantity(0)), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(CartError::ActorCommunicationError("closed".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_product_errors_map_to_status_codes() {
        assert_eq!(
            status(ProductError::NotFound("product_1".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(ProductError::InvalidPrice(rust_decimal::Decimal::NEGATIVE_ONE)),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_unauthenticated_message() {
        let err = AppError::from(CartError::Unauthenticated);
        assert_eq!(err.to_string(), "Unauthorized: Must be logged in");
    }
}

use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Message returned for identifiers that are not ObjectIds.
pub const WRONG_ID_FORMAT: &str = "wrong id format";

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Path identifier is not a 24 hex digit ObjectId
    #[error("Malformed id: {0}")]
    MalformedId(String),

    /// Request payload field the store cannot accept
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::MalformedId(id) => {
                tracing::debug!(id = %id, "Rejecting malformed id");
                AppError::InvalidId(WRONG_ID_FORMAT.to_string())
            }
            ProductError::InvalidInput(msg) => AppError::BadRequest(msg),
            ProductError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_malformed_id_is_404() {
        let response = ProductError::MalformedId("abc".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ProductError::NotFound("65a1f0c2e4b0a1b2c3d4e5f6".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                ProductError::InvalidInput("bad category".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ProductError::Database("socket closed".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}

//! API error types with IntoResponse
//!
//! Most failures surface as a generic JSON 500 with the real cause logged.
//! The two shapes clients rely on are kept exactly:
//! - request update misses are a plain-text 404
//! - `/allfoodquntity` failures are `{"message": ...}` with a 500

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StoreError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Path id is not an ObjectId (500, logged)
    InvalidId { id: String, reason: String },

    /// Storage failure (500, logged)
    Store(StoreError),

    /// Nothing was modified (404, plain text)
    NotFound { message: String },

    /// Quantity listing failed (500, `{"message": ...}`)
    Listing { message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidId { id, reason } => {
                tracing::error!(%id, "Invalid document id: {}", reason);
                internal_error()
            }
            Self::Store(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                internal_error()
            }
            Self::NotFound { message } => (StatusCode::NOT_FOUND, message).into_response(),
            Self::Listing { message } => {
                tracing::error!("Quantity listing failed: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": message })),
                )
                    .into_response()
            }
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "an internal error occurred"
        })),
    )
        .into_response()
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn invalid_id_is_500() {
        let err = ApiError::InvalidId {
            id: "nope".into(),
            reason: "invalid hex".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn not_found_is_plain_text_404() {
        let err = ApiError::NotFound {
            message: "updatedFood with id abc not found".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"updatedFood with id abc not found");
    }

    #[tokio::test]
    async fn listing_error_carries_message() {
        let err = ApiError::Listing {
            message: "database unavailable: down".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "message": "database unavailable: down" }));
    }

    #[tokio::test]
    async fn store_error_hides_details() {
        let err = ApiError::from(StoreError::Unavailable("secret host".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(!String::from_utf8_lossy(&body).contains("secret host"));
    }
}

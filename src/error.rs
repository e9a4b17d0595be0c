//! Server error types with HTTP status code mapping.
//!
//! [`ServiceError`] is the central error type for the service. Each
//! variant maps to a specific HTTP status code and a structured JSON
//! error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": "persistence error",
///   "details": "failed to load items: connection refused"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Short error category.
    pub error: String,
    /// Human-readable details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Missing or mismatched bearer token on the scheduled endpoint.
    #[error("missing or invalid authorization token")]
    Unauthorized,

    /// Item with the given ID was not found.
    #[error("item not found: {0}")]
    ItemNotFound(i64),

    /// No price has been recorded yet for the given item.
    #[error("no price data recorded for item {0}")]
    PriceNotFound(i64),

    /// Investment with the given ID was not found.
    #[error("investment not found: {0}")]
    InvestmentNotFound(uuid::Uuid),

    /// The CSFloat listings API returned a failure or was unreachable.
    #[error("upstream listings error: {0}")]
    Upstream(String),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the short error category for this variant.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid request",
            Self::Unauthorized => "unauthorized",
            Self::ItemNotFound(_) | Self::PriceNotFound(_) | Self::InvestmentNotFound(_) => {
                "not found"
            }
            Self::Upstream(_) => "upstream error",
            Self::PersistenceError(_) => "persistence error",
            Self::Internal(_) => "internal error",
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::ItemNotFound(_) | Self::PriceNotFound(_) | Self::InvestmentNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::PersistenceError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.kind().to_string(),
            details: Some(self.to_string()),
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

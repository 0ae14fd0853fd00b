//! API Errors
//!
//! Maps cache and request errors onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::error::CacheError;
use crate::models::ErrorResponse;

// == API Error Enum ==
/// Errors returned by the HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Error surfaced by the cache itself
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Request body failed validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Cache(CacheError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::Cache(CacheError::InvalidConfiguration(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.to_string()));
        (self.status(), body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

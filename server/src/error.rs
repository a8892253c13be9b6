//! HTTP-facing errors.
//!
//! # Design
//! Handlers return `Result<_, ApiError>`; every variant renders as
//! `{"error": "<message>"}` with the matching status. Storage errors are
//! classified once in `From<StoreError>`: a missing parent list is a 404,
//! constraint violations are client errors, and anything else is logged
//! in full and reported as a bare 500.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing, empty or malformed request data (400).
    #[error("{0}")]
    BadRequest(String),

    /// No row matched the identifier (404).
    #[error("{0}")]
    NotFound(String),

    /// Storage failed for a reason the client cannot fix (500).
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn missing_field(field: &str) -> Self {
        ApiError::BadRequest(format!("Missing required field: {field}."))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(format!("{err}.")),
            StoreError::ForeignKey => ApiError::NotFound("Parent list not found.".to_string()),
            StoreError::Constraint(_) | StoreError::InvalidInput(_) => {
                ApiError::BadRequest(err.to_string())
            }
            StoreError::Sql(source) => {
                tracing::error!(error = %source, "storage failure");
                ApiError::Internal("Database error")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

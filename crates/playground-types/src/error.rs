//! Request-boundary error taxonomy.
//!
//! Every failure in the playground services is caught at the HTTP boundary and
//! serialized as `{ "error": "<message>" }`. There are exactly two classes:
//!
//! - [`ApiError::Validation`] - the caller sent something unusable (HTTP 400)
//! - [`ApiError::Upstream`] - the SDK, faucet or toolchain failed (HTTP 500)
//!
//! Upstream messages are passed through verbatim, without translation or redaction.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// JSON body returned on every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// A required field is absent or cannot be interpreted.
    #[error("{0}")]
    Validation(String),
    /// An external collaborator failed; the message is its own.
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    pub fn missing_field(name: &str) -> Self {
        ApiError::Validation(format!("Missing required field: {name}"))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

/// Unwraps an optional request field, treating absent and empty strings alike.
pub fn require_str(value: Option<String>, name: &str) -> Result<String, ApiError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError::missing_field(name)),
    }
}

/// Unwraps an optional request field of any type.
pub fn require<T>(value: Option<T>, name: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::missing_field(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upstream_error_renders_500_with_verbatim_message() {
        let response = ApiError::Upstream("faucet said no".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "faucet said no");
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let err = require_str(Some(String::new()), "code").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Missing required field: code");
        assert_eq!(require_str(Some("x".into()), "code").unwrap(), "x");
        assert!(require::<u64>(None, "amount").is_err());
    }
}

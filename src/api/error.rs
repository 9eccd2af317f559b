//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::source::SourceError;
use crate::verification::qr::QrError;
use crate::verification::VerificationError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Verification(#[from] VerificationError),
    #[error("Records service unavailable: {0}")]
    Upstream(#[from] SourceError),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Verification(e @ VerificationError::EmptyQuery) => {
                (StatusCode::BAD_REQUEST, e.code(), e.to_string())
            }
            ApiError::Verification(e @ VerificationError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, e.code(), e.to_string())
            }
            ApiError::Verification(e @ VerificationError::InvalidDate { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.code(), e.to_string())
            }
            ApiError::Upstream(e) => {
                tracing::warn!(error = %e, "Records service failure");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM",
                    "Records service unavailable, try again shortly".to_string(),
                )
            }
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone()),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<QrError> for ApiError {
    fn from(err: QrError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("verification task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn empty_query_returns_400() {
        let response = ApiError::from(VerificationError::EmptyQuery).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "EMPTY_QUERY");
    }

    #[tokio::test]
    async fn invalid_date_returns_422() {
        let err = VerificationError::InvalidDate {
            field: "expiry".into(),
            value: "soon".into(),
        };
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "INVALID_DATE");
        assert_eq!(json["error"]["message"], "Invalid date in expiry: soon");
    }

    #[tokio::test]
    async fn upstream_returns_502_without_details() {
        let response =
            ApiError::from(SourceError::Connection("http://10.0.0.5/api".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "UPSTREAM");
        assert!(!json["error"]["message"].as_str().unwrap().contains("10.0.0.5"));
    }

    #[tokio::test]
    async fn not_found_returns_404() {
        let response = ApiError::NotFound("Batch not found in system".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn internal_returns_500() {
        let response = ApiError::Internal("something broke".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        // Internal errors hide details from client
        assert_eq!(json["error"]["message"], "An internal error occurred");
    }
}

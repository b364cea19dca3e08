//! Service-level errors and their HTTP mapping.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::protocol::ErrorOut;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or out-of-taxonomy field, or an unreadable body / query string.
    #[error("{message}")]
    Validation { message: String, details: Option<String> },

    /// Carries the raw id as received.
    #[error("Invalid problem ID")]
    MalformedId(String),

    #[error("Problem not found")]
    NotFound(String),

    /// `op` names the failed operation, e.g. "fetch stats".
    #[error("Failed to {op}")]
    Store { op: &'static str, source: StoreError },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation { message: message.into(), details: None }
    }

    /// For `map_err` on store calls.
    pub fn store(op: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |source| ApiError::Store { op, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::MalformedId(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rej: JsonRejection) -> Self {
        ApiError::Validation { message: "Invalid request body".into(), details: Some(rej.body_text()) }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rej: QueryRejection) -> Self {
        ApiError::Validation { message: "Invalid query string".into(), details: Some(rej.body_text()) }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let details = match &self {
            ApiError::Validation { details, .. } => details.clone(),
            ApiError::Store { op, source } => {
                error!(target: "tracker", %op, error = %source, "Store failure");
                Some(source.to_string())
            }
            ApiError::MalformedId(raw) => {
                warn!(target: "tracker", id = %raw, "Rejected malformed problem id");
                None
            }
            ApiError::NotFound(id) => {
                warn!(target: "tracker", %id, "Problem not found");
                None
            }
        };
        (status, Json(ErrorOut { error: self.to_string(), details })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MalformedId("abc".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("abc".into()).status(), StatusCode::NOT_FOUND);
        let store = ApiError::store("fetch stats")(StoreError::Backend("connection reset".into()));
        assert_eq!(store.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn store_failures_surface_details() {
        let resp = ApiError::store("fetch stats")(StoreError::Backend("connection reset".into())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["error"], "Failed to fetch stats");
        assert_eq!(v["details"], "store backend error: connection reset");
    }

    #[tokio::test]
    async fn id_errors_render_without_details() {
        for (err, status, message) in [
            (ApiError::MalformedId("ZZZ".into()), StatusCode::BAD_REQUEST, "Invalid problem ID"),
            (ApiError::NotFound("65a1f0c2e4b0a1b2c3d4e5f6".into()), StatusCode::NOT_FOUND, "Problem not found"),
        ] {
            let resp = err.into_response();
            assert_eq!(resp.status(), status);
            let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
            let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(v, serde_json::json!({ "error": message }));
        }
    }
}

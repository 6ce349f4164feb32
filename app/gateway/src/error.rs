//! Error taxonomy for the ask pipeline.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Error from handling an ask request.
#[derive(Debug)]
pub enum AskError {
    /// Missing or empty required input. Detected before any external
    /// call, leaves no side effects.
    BadRequest(&'static str),
    /// Any runtime failure in the pipeline: upstream generation or
    /// store read/write. Not distinguished to the caller.
    Internal(anyhow::Error),
}

impl std::fmt::Display for AskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "{msg}"),
            Self::Internal(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AskError {}

impl From<anyhow::Error> for AskError {
    fn from(e: anyhow::Error) -> Self {
        Self::Internal(e)
    }
}

impl IntoResponse for AskError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

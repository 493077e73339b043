//! HTTP error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Cloud resources are still initializing, try again shortly")]
    NotReady,

    #[error("{error}")]
    Dependency {
        error: String,
        details: Option<String>,
    },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// A failed call to a backing service, surfaced as-is
    pub fn dependency(err: impl std::fmt::Display) -> Self {
        Self::Dependency {
            error: err.to_string(),
            details: None,
        }
    }

    /// A failed call to a backing service, under a fixed summary message
    pub fn dependency_with_details(
        error: impl Into<String>,
        details: impl std::fmt::Display,
    ) -> Self {
        Self::Dependency {
            error: error.into(),
            details: Some(details.to_string()),
        }
    }

    /// Client mistakes become 400, everything else a dependency failure
    pub fn from_core(err: tg_core::Error) -> Self {
        match err {
            tg_core::Error::InvalidInput(message) => Self::BadRequest(message),
            other => Self::dependency(other),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            Self::Dependency { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let details = match &self {
            Self::Dependency { details, .. } => details.clone(),
            _ => None,
        };
        let body = ErrorResponse {
            error: self.to_string(),
            details,
        };
        (status, Json(body)).into_response()
    }
}

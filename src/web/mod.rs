//! HTTP surface: resource routes, error mapping and the failure boundary.
//!
//! Every handler returns [`Result`]. Whatever goes wrong below the handler is
//! folded into [`ApiError`], which owns the status code and the JSON error
//! body. Internal detail is logged here and never sent to the caller.

pub mod app;
pub mod comments;
pub mod handlers;
pub mod headers;
pub mod state;

pub use app::build_router;
pub use state::AppState;

use crate::core::{IdParseError, StoreError};
use crate::model::ModelError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Body sent back for internal failures, whatever the cause.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InvalidIdentifier(String),
    InvalidStatus(String),
    InvalidBody(String),
    InvalidHeader(String),
    NotFound(String),
    Conflict(String),
    /// The message is logged, never returned.
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidIdentifier(_)
            | Self::InvalidStatus(_)
            | Self::InvalidBody(_)
            | Self::InvalidHeader(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidIdentifier(_) => "invalid_identifier",
            Self::InvalidStatus(_) => "invalid_status",
            Self::InvalidBody(_) => "invalid_body",
            Self::InvalidHeader(_) => "invalid_header",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "version_conflict",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl From<IdParseError> for ApiError {
    fn from(err: IdParseError) -> Self {
        Self::InvalidIdentifier(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            StoreError::VersionConflict { .. } => Self::Conflict(err.to_string()),
            StoreError::Unavailable(message) => Self::Internal(message),
        }
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::InvalidStatus { .. } => Self::InvalidStatus(err.to_string()),
            ModelError::Invalid(message) => Self::InvalidBody(message),
            ModelError::Serialization(message) => Self::Internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code().to_string();

        let message = match self {
            Self::Internal(detail) => {
                error!(%detail, "request failed with internal error");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            Self::InvalidIdentifier(message)
            | Self::InvalidStatus(message)
            | Self::InvalidBody(message)
            | Self::InvalidHeader(message)
            | Self::NotFound(message)
            | Self::Conflict(message) => {
                debug!(%status, %message, "request rejected");
                message
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: message,
                code,
            }),
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use section_widgets::{BundleError, MountError, RenderError};

/// JSON body of every error response.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Errors returned by the widget routes. The body is always
/// `{"error": "<message>"}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Widget not found")]
    NotFound { identifier: String },

    #[error("Failed to load widget: {message}")]
    LoadFailed { message: String },

    #[error("Failed to render widget: {message}")]
    RenderFailed { message: String },
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::LoadFailed { .. } | ApiError::RenderFailed { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<BundleError> for ApiError {
    fn from(err: BundleError) -> Self {
        match err {
            BundleError::NotFound(identifier) => ApiError::NotFound { identifier },
            other => ApiError::LoadFailed {
                message: other.to_string(),
            },
        }
    }
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        ApiError::RenderFailed {
            message: err.to_string(),
        }
    }
}

impl From<MountError> for ApiError {
    fn from(err: MountError) -> Self {
        ApiError::RenderFailed {
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::NotFound { identifier } => warn!(%identifier, "unknown widget requested"),
            _ => error!("{self}"),
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

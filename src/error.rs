use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::any::Any;
use thiserror::Error;
use tracing::{error, warn};

use crate::config::Environment;
use crate::envelope::{timestamp, ErrorBody};
use crate::translate::TranslationError;

/// Request-level failures and the status each one maps to.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{error}: {message}")]
    Validation { error: &'static str, message: String },
    #[error("upstream timeout: {0}")]
    UpstreamTimeout(TranslationError),
    #[error("upstream failure: {0}")]
    UpstreamFailure(TranslationError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn missing_fields() -> Self {
        Self::Validation {
            error: "Missing required fields",
            message: "Both \"word\" and \"targetLanguage\" are required".to_string(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Validation {
            error: "Invalid request",
            message: message.into(),
        }
    }

    /// Build an internal error, hiding the cause from callers in production.
    pub fn internal(cause: impl std::fmt::Display, environment: Environment) -> Self {
        error!(error = %cause, "Internal error");
        if environment.is_production() {
            Self::Internal("An error occurred".to_string())
        } else {
            Self::Internal(cause.to_string())
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::UpstreamFailure(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TranslationError> for ApiError {
    fn from(err: TranslationError) -> Self {
        if err.is_timeout() {
            Self::UpstreamTimeout(err)
        } else {
            Self::UpstreamFailure(err)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Validation { error, message } => {
                warn!(%message, "Rejected request");
                ErrorBody {
                    example: Some(json!({ "word": "hello", "targetLanguage": "es" })),
                    ..ErrorBody::new(error, message)
                }
            }
            Self::UpstreamTimeout(cause) => {
                error!(error = %cause, "Translation timed out");
                ErrorBody::new(
                    "Translation service timeout",
                    "The translation service took too long to respond",
                )
            }
            Self::UpstreamFailure(cause) => {
                error!(error = %cause, "Translation failed");
                ErrorBody {
                    timestamp: Some(timestamp()),
                    ..ErrorBody::new(
                        "Translation failed",
                        "An error occurred while translating",
                    )
                }
            }
            Self::Internal(message) => ErrorBody {
                timestamp: Some(timestamp()),
                ..ErrorBody::new("Internal Server Error", message)
            },
        };
        (status, Json(body)).into_response()
    }
}

/// Response for a handler that panicked.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>, environment: Environment) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    ApiError::internal(detail, environment).into_response()
}

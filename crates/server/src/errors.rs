use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::ValidationErrors;
use serde_json::json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Error response with a JSON body. Validation failures carry the
/// field → messages map as the whole body.
#[derive(Debug)]
pub struct JsonApiError {
    status: StatusCode,
    body: serde_json::Value,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &str, message: Option<String>) -> Self {
        Self { status, body: json!({ "error": error, "message": message }) }
    }

    pub fn validation(errors: &ValidationErrors) -> Self {
        Self { status: StatusCode::BAD_REQUEST, body: json!(errors) }
    }

    pub fn detail(status: StatusCode, detail: impl Into<String>) -> Self {
        Self { status, body: json!({ "detail": detail.into() }) }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(errors) => Self::validation(&errors),
            ServiceError::Db(msg) => {
                error!(error = %msg, "database failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(msg))
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonSyntaxError(e) => Self::detail(
                StatusCode::BAD_REQUEST,
                format!("JSON parse error - {}", e.body_text()),
            ),
            other => Self::detail(other.status(), other.body_text()),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database setup failed: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

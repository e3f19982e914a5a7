use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::group::wizard::{WizardError, WizardStep};

/// API error type with HTTP status code and message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    /// Wizard step to return to, for incomplete group requests
    pub step: Option<WizardStep>,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            step: None,
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 401 Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Creates a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 422 Unprocessable Entity error
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    /// Creates a 500 Internal Server Error
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.step {
            Some(step) => json!({ "error": self.message, "step": step }),
            None => json!({ "error": self.message }),
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<WizardError> for ApiError {
    fn from(err: WizardError) -> Self {
        let status = match err {
            WizardError::StepIncomplete { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            WizardError::AlreadyComplete => StatusCode::CONFLICT,
            WizardError::AtFirstStep | WizardError::StepNotInFlow(_) => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            message: err.to_string(),
            step: err.step(),
        }
    }
}

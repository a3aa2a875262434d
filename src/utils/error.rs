use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::store::{InvalidEventId, StoreError};
use crate::utils::response::error as error_response;
use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Invalid event ID: {0}")]
    InvalidId(#[from] InvalidEventId),

    #[error("Event not found: {0}")]
    NotFound(String),

    /// `message` is what the client sees; `source` is only logged.
    #[error("{message}")]
    Store {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// Wraps a backend failure with the generic message for the operation.
    pub fn store(message: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| AppError::Store { message, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::MalformedBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidId(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) | AppError::MalformedBody(_) => "VALIDATION_ERROR",
            AppError::InvalidId(_) => "INVALID_ID",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Store { .. } => "STORE_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::Validation(errors) => {
                warn!(fields = %errors, "Rejected event payload");
            }
            AppError::MalformedBody(msg) => {
                warn!(message = %msg, "Rejected request body");
            }
            AppError::InvalidId(InvalidEventId(raw)) => {
                warn!(id = %raw, "Invalid event ID format");
            }
            AppError::NotFound(id) => {
                warn!(id = %id, "Event not found");
            }
            AppError::Store { message, source } => {
                error!(error = %source, "{}", message);
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        self.log();

        // Store failures never leak backend details
        let (detail, errors) = match self {
            AppError::Validation(ValidationErrors(errors)) => {
                ("Validation failed".to_string(), Some(errors))
            }
            AppError::MalformedBody(msg) => (msg, None),
            AppError::InvalidId(_) => ("Invalid event ID format".to_string(), None),
            AppError::NotFound(_) => ("Event not found".to_string(), None),
            AppError::Store { message, .. } => (message.to_string(), None),
        };

        error_response(code, detail, errors, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldError;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn body_json(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_lists_fields() {
        let error = AppError::from(ValidationErrors(vec![FieldError {
            field: "color",
            message: "Color must be a hex code like #3B82F6".to_string(),
        }]));

        let (status, body) = body_json(error).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"], json!("Validation failed"));
        assert_eq!(body["errors"][0]["field"], json!("color"));
    }

    #[tokio::test]
    async fn invalid_id_is_bad_request() {
        let error = AppError::from(InvalidEventId("invalid-id".to_string()));
        let (status, body) = body_json(error).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], json!("Invalid event ID format"));
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn store_error_hides_source() {
        let error = AppError::store("Failed to retrieve events")(StoreError::Unavailable(
            "connection refused on 10.0.0.7".to_string(),
        ));
        let (status, body) = body_json(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], json!("Failed to retrieve events"));
        assert_eq!(body["code"], json!("STORE_ERROR"));
        assert!(!body.to_string().contains("10.0.0.7"));
    }
}

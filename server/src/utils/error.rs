use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::services::GenerationError;
use crate::utils::response::error as error_response;

pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate description. Please try again.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Description generation failed")]
    GenerationError(#[from] GenerationError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::GenerationError(GenerationError::NotConfigured) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::GenerationError(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::GenerationError(_) => "EXTERNAL_SERVICE_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(msg) | AppError::NotFound(msg) => {
                tracing::debug!(code = self.code(), message = %msg, "Request rejected");
            }
            AppError::GenerationError(e) => {
                error!(error = %e, "Description generation error");
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();
        messages.sort();
        AppError::ValidationError(messages.join(" "))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        self.log();

        // Only expose high-level message to the client
        let public_message = match &self {
            AppError::ValidationError(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::GenerationError(_) => GENERATION_FAILED_MESSAGE.to_string(),
        };

        error_response(code, public_message, None, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Form {
        #[validate(length(min = 3, message = "Too short."))]
        name: String,
        #[validate(length(min = 1))]
        location: String,
    }

    #[test]
    fn test_validation_errors_collect_messages() {
        let form = Form {
            name: "ab".to_string(),
            location: String::new(),
        };
        let err = AppError::from(form.validate().unwrap_err());

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        match err {
            AppError::ValidationError(msg) => {
                assert!(msg.contains("Too short."));
                assert!(msg.contains("location is invalid"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_generation_error_status() {
        let disabled = AppError::from(GenerationError::NotConfigured);
        assert_eq!(disabled.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(disabled.code(), "EXTERNAL_SERVICE_ERROR");

        let malformed = AppError::from(GenerationError::MalformedResponse("x".to_string()));
        assert_eq!(malformed.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_every_variant_maps_to_documented_status_and_code() {
        let cases = [
            (
                AppError::ValidationError("x".to_string()),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                AppError::NotFound("x".to_string()),
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                AppError::from(GenerationError::NotConfigured),
                StatusCode::SERVICE_UNAVAILABLE,
                "EXTERNAL_SERVICE_ERROR",
            ),
            (
                AppError::from(GenerationError::Status {
                    status: 500,
                    body: String::new(),
                }),
                StatusCode::BAD_GATEWAY,
                "EXTERNAL_SERVICE_ERROR",
            ),
        ];

        for (err, status, code) in cases {
            assert_eq!(err.status_code(), status);
            assert_eq!(err.code(), code);
        }
    }
}

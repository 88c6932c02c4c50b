use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::modules::pdf::RenderError;
use crate::shared::types::{FieldError, MessageResponse, ValidationErrorResponse};

/// Plain-text body for failures the client cannot act on
pub const SERVER_ERROR_MESSAGE: &str = "An error occurred on the server";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Business-rule violation, reported as 400 like other client errors
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(collect_field_errors(&errors))
    }
}

/// Flatten `validator` errors into field errors sorted by field name
pub fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .errors()
        .iter()
        .flat_map(|(field, kind)| match kind {
            ValidationErrorsKind::Field(errs) => errs
                .iter()
                .map(|e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", e.code));
                    FieldError::new(field.to_string(), message)
                })
                .collect::<Vec<_>>(),
            ValidationErrorsKind::Struct(_) | ValidationErrorsKind::List(_) => {
                vec![FieldError::new(field.to_string(), "Invalid value")]
            }
        })
        .collect();

    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE).into_response()
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE).into_response()
            }
            AppError::Render(ref e) => {
                tracing::error!("PDF generation failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(MessageResponse::new("Error generating the PDF.")),
                )
                    .into_response()
            }
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorResponse { errors }),
            )
                .into_response(),
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(MessageResponse::new(msg))).into_response()
            }
            AppError::BadRequest(msg) | AppError::Conflict(msg) => {
                (StatusCode::BAD_REQUEST, Json(MessageResponse::new(msg))).into_response()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

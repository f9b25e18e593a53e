//! Unified error types for the loan application API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Persistence errors raised by repository adapters
//! - `UserClientError`: User service REST client errors
//! - `PublisherError`: Queue publisher errors
//! - `LoanError`: Business rule failures raised by the loan use case
//! - `AppError`: HTTP boundary errors (wraps loan errors for responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::handlers::ApiResponse;

/// Domain layer errors - persistence failures
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// User service client errors
#[derive(Debug, Error)]
pub enum UserClientError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Unauthorized - user service rejected the token")]
    Unauthorized,

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Circuit open: {0}")]
    CircuitOpen(String),
}

/// Queue publisher errors
#[derive(Debug, Error)]
pub enum PublisherError {
    #[error("Send failed: {0}")]
    Send(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Loan use case errors
#[derive(Debug, Error)]
pub enum LoanError {
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Loan type with id {0} does not exist.")]
    InvalidLoanType(i32),

    #[error("Invalid amount: {amount}. Valid range is between {min} and {max}")]
    InvalidAmount {
        amount: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error(
        "Client with email {email} and documentNumber {} is not registered.",
        display_document(.document_number)
    )]
    UnregisteredUser {
        email: String,
        document_number: Option<String>,
    },

    #[error(
        "User service unavailable. Client with email {email} and documentNumber {} couldn't be validated.",
        display_document(.document_number)
    )]
    AuthenticationServiceUnavailable {
        email: String,
        document_number: Option<String>,
    },

    #[error("Loan with id {0} does not exist.")]
    LoanNotFound(Uuid),

    #[error("Invalid status name: {0}")]
    InvalidStatusName(String),

    #[error("Loan is already in status: {0}")]
    AlreadyInStatus(String),

    #[error("Unauthorized client with email {0}")]
    Unauthorized(String),

    #[error(transparent)]
    Repository(#[from] DomainError),

    #[error("User service error: {0}")]
    UserService(#[from] UserClientError),

    #[error("Publisher error: {0}")]
    Publisher(#[from] PublisherError),
}

fn display_document(document_number: &Option<String>) -> &str {
    document_number.as_deref().unwrap_or("n/a")
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Loan(#[from] LoanError),

    #[error("Invalid credentials. {0}")]
    InvalidCredentials(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::Loan(LoanError::Repository(e))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let user_message = self.to_string();

        let (status, message, details) = match &self {
            AppError::Loan(LoanError::Validation(errors)) => {
                tracing::debug!(?errors, "Validation failed");
                (
                    StatusCode::BAD_REQUEST,
                    "Validation error",
                    Some(serde_json::json!(errors)),
                )
            }
            AppError::Loan(
                LoanError::InvalidLoanType(_)
                | LoanError::InvalidAmount { .. }
                | LoanError::InvalidStatusName(_)
                | LoanError::AlreadyInStatus(_),
            ) => {
                tracing::debug!("Rejected request: {}", user_message);
                (StatusCode::BAD_REQUEST, "Validation error", None)
            }
            AppError::Loan(LoanError::UnregisteredUser { .. }) => {
                (StatusCode::BAD_REQUEST, "Unregistered user", None)
            }
            AppError::Loan(LoanError::AuthenticationServiceUnavailable { .. }) => {
                tracing::error!("{}", user_message);
                (StatusCode::SERVICE_UNAVAILABLE, "Service unavailable", None)
            }
            AppError::Loan(LoanError::LoanNotFound(_)) => {
                (StatusCode::NOT_FOUND, "Not found", None)
            }
            AppError::Loan(LoanError::Unauthorized(_)) | AppError::InvalidCredentials(_) => {
                tracing::debug!("{}", user_message);
                (StatusCode::UNAUTHORIZED, "Unauthorized", None)
            }
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden", None),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad request", None),
            AppError::Loan(LoanError::UserService(e)) => {
                tracing::error!("User service error: {}", e);
                (StatusCode::BAD_GATEWAY, "Upstream service error", None)
            }
            AppError::Loan(LoanError::Publisher(e)) => {
                tracing::error!("Publisher error: {}", e);
                (StatusCode::BAD_GATEWAY, "Upstream service error", None)
            }
            AppError::Loan(LoanError::Repository(e)) => {
                tracing::error!("Repository error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", None)
            }
        };

        // Server-side failures keep their details in the logs only
        let user_message = if status.is_server_error() {
            message.to_string()
        } else {
            user_message
        };

        let body = Json(ApiResponse::error(status, message, user_message, details));

        (status, body).into_response()
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr, TransactionError};
use serde::Serialize;
use thiserror::Error;

use crate::response::{ApiResponse, Meta};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    ParentNotFound(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Already enrolled")]
    AlreadyEnrolled,

    #[error("A course with this title already exists")]
    DuplicateTitle,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthenticated(String),

    #[error("Access denied: Admins only")]
    Forbidden,

    #[error("Transaction failed, no changes were applied")]
    TransactionFailure(#[source] DbErr),

    #[error("Database error")]
    OrmError(#[from] DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(what: &str) -> Self {
        AppError::NotFound(format!("{what} not found"))
    }

    /// Store faults raised while a multi-statement write was in flight.
    pub fn into_transaction_failure(self) -> Self {
        match self {
            AppError::OrmError(err) => AppError::TransactionFailure(err),
            other => other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_)
            | AppError::ParentNotFound(_)
            | AppError::AlreadyEnrolled
            | AppError::DuplicateTitle
            | AppError::EmailTaken
            | AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::TransactionFailure(_) | AppError::OrmError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<TransactionError<AppError>> for AppError {
    fn from(err: TransactionError<AppError>) -> Self {
        match err {
            TransactionError::Connection(err) => AppError::TransactionFailure(err),
            TransactionError::Transaction(err) => err.into_transaction_failure(),
        }
    }
}

pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

pub fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::TransactionFailure(err) | AppError::OrmError(err) => {
                tracing::error!(error = %err, "store error");
            }
            AppError::Internal(err) => tracing::error!(error = %err, "internal error"),
            _ => {}
        }

        let message = self.to_string();
        let body = ApiResponse {
            message: message.clone(),
            data: Some(ErrorData { error: message }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

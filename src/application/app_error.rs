//! Application-level error taxonomy.
//!
//! Use cases return these; the HTTP adapter maps each variant to a status
//! and a machine-readable code.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The operation needs a Gmail grant the user has not completed.
    #[error("Gmail account is not connected")]
    Unauthenticated,

    #[error("Not found")]
    NotFound,

    /// Google rejected or failed the access-token refresh. The user has to
    /// re-run the consent flow.
    #[error("Token refresh failed: {0}")]
    Refresh(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Stable codes clients can branch on without parsing messages.
#[derive(Clone, Copy, Debug)]
pub enum ErrorCode {
    DatabaseError,
    InvalidCredentials,
    InvalidInput,
    NotAuthenticated,
    NotFound,
    RefreshFailed,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::NotAuthenticated => "NOT_AUTHENTICATED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::RefreshFailed => "REFRESH_FAILED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

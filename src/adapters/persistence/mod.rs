use sqlx::PgPool;
use sqlx::error::ErrorKind;

use crate::app_error::AppError;

pub mod contact;
pub mod template;
pub mod user;

/// Shared Postgres handle; every repo trait is implemented on this one type.
#[derive(Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    pub fn new(pool: PgPool) -> Self {
        PostgresPersistence { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Constraint violations surface as validation errors (`users.email` and
/// `contacts.email` carry unique indexes, `templates.kind` a CHECK); anything
/// else is an opaque database failure whose detail goes to the log only.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::NotFound,
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation => {
                    AppError::InvalidInput("A record with this value already exists".into())
                }
                ErrorKind::ForeignKeyViolation => {
                    AppError::InvalidInput("Referenced record not found".into())
                }
                ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                    AppError::InvalidInput("Required field is missing or invalid".into())
                }
                _ => {
                    tracing::error!(error = ?err, "Database error");
                    AppError::Database("Database operation failed".into())
                }
            },
            _ => {
                tracing::error!(error = ?err, "Database error");
                AppError::Database("Database operation failed".into())
            }
        }
    }
}

//! Unified error handling.
//!
//! One error type flows from the repositories up to the HTTP layer, where it
//! is rendered as a JSON error body with a matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    /// No matching record, or a scoped mutation by someone other than the owner
    #[error("Resource not found")]
    NotFound,

    #[error("{0} already exists")]
    Conflict(String),

    /// A record points at another record that does not exist
    #[error("Referenced {0} does not exist")]
    InvalidReference(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    // Store errors
    #[error("Store unavailable")]
    StoreUnavailable(String),

    #[error("Deadline exceeded")]
    DeadlineExceeded,

    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[source] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl AppError {
    /// Stable machine-readable code sent to clients
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::InvalidReference(_) => "INVALID_REFERENCE",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            AppError::DeadlineExceeded => "DEADLINE_EXCEEDED",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidReference(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show a client. Store and internal details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::StoreUnavailable(_) => "The data store is unavailable".to_string(),
            #[cfg(feature = "database")]
            AppError::Database(_) => "A database error occurred".to_string(),
            AppError::Internal(_) => "An internal error occurred".to_string(),
            _ => self.to_string(),
        }
    }

    fn log(&self) {
        match self {
            AppError::StoreUnavailable(detail) => tracing::error!("Store unavailable: {}", detail),
            #[cfg(feature = "database")]
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            AppError::Internal(detail) => tracing::error!("Internal error: {}", detail),
            _ => {}
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let envelope = ErrorEnvelope {
            error: ErrorBody {
                code: self.code(),
                message: self.user_message(),
            },
        };
        (self.status(), Json(envelope)).into_response()
    }
}

// =============================================================================
// Store Error Conversion
// =============================================================================

#[cfg(feature = "database")]
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        use sea_orm::{DbErr, RuntimeErr, SqlErr};

        if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            tracing::warn!("Unique constraint violated: {}", detail);
            return AppError::Conflict(conflicting_field(&detail).to_string());
        }

        match err {
            DbErr::ConnectionAcquire(e) => AppError::StoreUnavailable(e.to_string()),
            DbErr::Conn(e) => AppError::StoreUnavailable(e.to_string()),
            DbErr::Query(RuntimeErr::SqlxError(e)) | DbErr::Exec(RuntimeErr::SqlxError(e))
                if store_lost(&e) =>
            {
                AppError::StoreUnavailable(e.to_string())
            }
            other => AppError::Database(other),
        }
    }
}

/// Driver errors meaning the store went away mid-operation
#[cfg(feature = "database")]
fn store_lost(err: &sea_orm::sqlx::Error) -> bool {
    use sea_orm::sqlx::Error;

    matches!(
        err,
        Error::Io(_) | Error::Tls(_) | Error::PoolTimedOut | Error::PoolClosed | Error::WorkerCrashed
    )
}

/// Best-effort name of the field behind a unique violation message
#[cfg(feature = "database")]
fn conflicting_field(detail: &str) -> &'static str {
    if detail.contains("email") {
        "Email"
    } else if detail.contains("username") {
        "Username"
    } else {
        "Record"
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Rule(msg) => AppError::Validation(msg),
            DomainError::Hashing(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn invalid_reference(entity: impl Into<String>) -> Self {
        AppError::InvalidReference(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

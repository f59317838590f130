//! Error types for the admin backend.

use thiserror::Error;

/// Common error type for the admin backend.
#[derive(Error, Debug)]
pub enum AdminError {
    /// Database error.
    ///
    /// Any failed statement against the persistence layer ends up here.
    /// Errors from sqlx are converted automatically.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Too many recent failed logins from one IP.
    #[error("too many login attempts, try again in {retry_after_minutes} minutes")]
    RateLimited {
        /// Length of the lockout window.
        retry_after_minutes: u64,
    },

    /// Credential mismatch or missing/invalid session.
    ///
    /// The message is always generic and never names the failing factor.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Any other failure that must not leak details to the caller.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AdminError {
    /// Whether this error originates in the persistence layer.
    pub fn is_database(&self) -> bool {
        matches!(
            self,
            AdminError::Database(_) | AdminError::DatabaseConnection(_)
        )
    }
}

impl From<sqlx::Error> for AdminError {
    fn from(e: sqlx::Error) -> Self {
        AdminError::Database(e.to_string())
    }
}

/// Result type alias for admin backend operations.
pub type Result<T> = std::result::Result<T, AdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_display() {
        let err = AdminError::Unauthorized("invalid credentials".to_string());
        assert_eq!(err.to_string(), "unauthorized: invalid credentials");
    }

    #[test]
    fn test_rate_limited_display() {
        let err = AdminError::RateLimited {
            retry_after_minutes: 15,
        };
        assert_eq!(
            err.to_string(),
            "too many login attempts, try again in 15 minutes"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AdminError = io_err.into();
        assert!(matches!(err, AdminError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_sqlx_error_conversion() {
        let err: AdminError = sqlx::Error::RowNotFound.into();
        assert!(err.is_database());
        assert!(!AdminError::Internal("x".to_string()).is_database());
    }
}

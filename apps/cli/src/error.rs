//! # Application Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command Function  →  Result<T, AppError>                              │
//! │         │                                                               │
//! │         ├── DbError::QueryFailed("...")      ──┐                      │
//! │         ├── CoreError::Validation(...)       ──┼──► AppError           │
//! │         ├── ConfigError::Invalid(...)        ──┘    { code, message }  │
//! │         │                                             │                 │
//! │         ▼                                             ▼                 │
//! │  stdout (result)                         stderr + exit status 1        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With `--json` the error is printed as:
//! ```json
//! { "code": "UNAUTHENTICATED", "message": "Not logged in. Run `stockroom login <username>` first." }
//! ```

use serde::Serialize;
use stockroom_core::CoreError;
use stockroom_db::DbError;

use crate::state::ConfigError;

/// Error returned from every command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Stable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No logged-in session
    Unauthenticated,

    /// Username/password rejected
    InvalidCredentials,

    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Report or sort parameter out of range
    InvalidParameter,

    /// Configuration could not be loaded
    ConfigError,

    /// Database operation failed
    DatabaseError,

    /// File could not be read or written
    IoError,

    /// Internal error
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Unauthenticated => "UNAUTHENTICATED",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidParameter => "INVALID_PARAMETER",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::IoError => "IO_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn unauthenticated() -> Self {
        AppError::new(
            ErrorCode::Unauthenticated,
            "Not logged in. Run `stockroom login <username>` first.",
        )
    }

    pub fn invalid_credentials() -> Self {
        AppError::new(ErrorCode::InvalidCredentials, "Invalid username or password")
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Result type for commands.
pub type AppResult<T> = Result<T, AppError>;

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            err @ (DbError::Serialization(_) | DbError::UnsupportedVersion { .. }) => {
                AppError::new(ErrorCode::DatabaseError, err.to_string())
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => AppError::validation(e.to_string()),
            err @ CoreError::InvalidParameter { .. } => {
                AppError::new(ErrorCode::InvalidParameter, err.to_string())
            }
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::new(ErrorCode::IoError, err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::internal(format!("Failed to encode output: {}", err))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::ValidationError;

    #[test]
    fn test_core_errors_map_to_codes() {
        let err: AppError = CoreError::from(ValidationError::Negative {
            field: "stock".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("stock"));

        let err: AppError = CoreError::invalid_parameter("days", "14").into();
        assert_eq!(err.code, ErrorCode::InvalidParameter);
    }

    #[test]
    fn test_db_errors_hide_details() {
        let err: AppError = DbError::QueryFailed("near \"SELEC\": syntax error".to_string()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database operation failed");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(AppError::unauthenticated()).unwrap();
        assert_eq!(json["code"], "UNAUTHENTICATED");
        assert!(json["message"].as_str().unwrap().contains("login"));
    }

    #[test]
    fn test_display() {
        let err = AppError::not_found("Product", "abc");
        assert_eq!(err.to_string(), "[NOT_FOUND] Product not found: abc");
    }
}

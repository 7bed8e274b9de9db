// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors -> user-friendly responses
// - Provides consistent error format for the shell
// - Never exposes internal implementation details
// - Logs errors for debugging

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for the UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Resource not found
    NotFound,

    /// Invalid input/validation error
    Validation,

    /// Domain invariant violation
    DomainError,

    /// Content store unreachable or rejected the operation
    Store,

    /// Missing or rejected external API credential
    Auth,

    /// External API unreachable or failing
    Network,

    /// Other/unknown error
    Internal,
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound => Self::failure(ErrorType::NotFound, "Resource not found", None),

            AppError::Domain(domain_error) => Self::failure(
                ErrorType::DomainError,
                "Domain validation failed",
                Some(domain_error.to_string()),
            ),

            AppError::Database(db_error) => {
                log::error!("Database error: {:?}", db_error);
                Self::failure(
                    ErrorType::Store,
                    "Database operation failed",
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);
                Self::failure(ErrorType::Store, "Database connection failed", None)
            }

            AppError::Store(message) => {
                log::error!("Store error: {}", message);
                Self::failure(ErrorType::Store, "Content store operation failed", Some(message))
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);
                Self::failure(ErrorType::Store, "Data serialization failed", None)
            }

            // Credential problems are shown verbatim; they tell the operator what to fix
            AppError::Auth(message) => Self::failure(ErrorType::Auth, &message, None),

            AppError::Network(message) => Self::failure(ErrorType::Network, &message, None),

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);
                Self::failure(
                    ErrorType::Internal,
                    "File system operation failed",
                    Some(io_error.to_string()),
                )
            }

            AppError::Config(message) => {
                log::error!("Configuration error: {}", message);
                Self::failure(ErrorType::Internal, "Configuration error", Some(message))
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::failure(ErrorType::Internal, &message, None)
            }
        }
    }

    fn failure(error_type: ErrorType, message: &str, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.to_string(),
            details,
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self::failure(ErrorType::Validation, &message, None)
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self::failure(ErrorType::NotFound, &format!("{} not found", resource), None)
    }

    /// Message plus details, as one line for a notice
    pub fn full_message(&self) -> String {
        match &self.details {
            Some(details) => format!("{}: {}", self.message, details),
            None => self.message.clone(),
        }
    }

    pub fn into_notice(self) -> Notice {
        Notice::error(self.full_message())
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self::from_app_error(error)
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_message())
    }
}

/// Command result with a UI-ready error
pub type CommandResult<T> = Result<T, ErrorResponse>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// User-visible notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> CommandResult<T>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> CommandResult<T> {
        self.map_err(ErrorResponse::from_app_error)
    }
}

impl<T> ToErrorResponse<T> for Result<T, crate::domain::DomainError> {
    fn to_error_response(self) -> CommandResult<T> {
        self.map_err(|e| ErrorResponse::from_app_error(AppError::Domain(e)))
    }
}

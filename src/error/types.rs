// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resource not found")]
    NotFound,

    /// Content store rejected or failed an operation
    #[error("Store error: {0}")]
    Store(String),

    /// Missing or rejected external API credential
    #[error("{0}")]
    Auth(String),

    /// External API unreachable or answered with a non-success status
    #[error("{0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// True for failures that originate in the content store
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            AppError::Database(_)
                | AppError::Pool(_)
                | AppError::NotFound
                | AppError::Store(_)
                | AppError::Serialization(_)
        )
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self, AppError::Auth(_))
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_are_classified() {
        assert!(AppError::NotFound.is_store_error());
        assert!(AppError::Store("disk full".to_string()).is_store_error());
        assert!(!AppError::Auth("no key".to_string()).is_store_error());
        assert!(!AppError::Network("offline".to_string()).is_store_error());
    }

    #[test]
    fn test_auth_message_is_shown_verbatim() {
        let err = AppError::Auth("Invalid TMDB API Key.".to_string());
        assert_eq!(err.to_string(), "Invalid TMDB API Key.");
        assert!(err.is_auth_error());
    }

    #[test]
    fn test_serializes_as_message() {
        let json = serde_json::to_string(&AppError::NotFound).unwrap();
        assert_eq!(json, "\"Resource not found\"");
    }
}

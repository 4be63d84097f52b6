//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuestionError, SessionError};
use storage::StorageError;

/// Errors from the REST gateway.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    /// The API said no; carries the server's message verbatim.
    #[error("{0}")]
    Rejected(String),
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("invalid company key for admin registration")]
    InvalidCompanyKey,
    #[error("you are not authorized as an admin")]
    NotAuthorizedAsAdmin,
    #[error("token is malformed")]
    TokenInvalid,
    #[error("token has expired")]
    TokenExpired,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Errors emitted by `QuestionAdminService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AdminError {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

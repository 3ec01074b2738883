//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{CategoryError, FolderError, QuestionId, QuestionValidationError};
use storage::auth::{AuthGatewayError, SessionStoreError};
use storage::remote::RemoteInitError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `FolderService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FolderServiceError {
    #[error(transparent)]
    Folder(#[from] FolderError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `CategoryService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CategoryServiceError {
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuestionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionServiceError {
    #[error(transparent)]
    Validation(#[from] QuestionValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizService` lookups.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by an in-progress quiz session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for this quiz")]
    Empty,
    #[error("question {0} is not part of this quiz")]
    UnknownQuestion(QuestionId),
    #[error("quiz is not in progress")]
    NotInProgress,
}

/// Errors emitted while building a PDF export.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error("No questions available for PDF generation")]
    NoQuestions,
    #[error("pdf rendering failed: {0}")]
    Render(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("not signed in")]
    NotSignedIn,
    #[error(transparent)]
    Gateway(AuthGatewayError),
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

impl From<AuthGatewayError> for AuthError {
    fn from(err: AuthGatewayError) -> Self {
        match err {
            AuthGatewayError::InvalidCredentials => AuthError::InvalidCredentials,
            other => AuthError::Gateway(other),
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Remote(#[from] RemoteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

use thiserror::Error;

use crate::model::{
    CategoryError, FolderError, ParseIdError, QuestionKindError, QuestionValidationError,
    SettingsError,
};

/// Umbrella error for callers that just need "the domain rejected this".
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Folder(#[from] FolderError),
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    Question(#[from] QuestionValidationError),
    #[error(transparent)]
    QuestionKind(#[from] QuestionKindError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Id(#[from] ParseIdError),
}

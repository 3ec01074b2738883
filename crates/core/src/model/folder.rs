use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::FolderId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FolderError {
    #[error("folder name cannot be empty")]
    EmptyName,
}

//
// ─── FOLDER ────────────────────────────────────────────────────────────────────
//

/// Top-level grouping of quiz content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    id: FolderId,
    name: String,
    created_at: DateTime<Utc>,
}

impl Folder {
    /// Creates a folder with a trimmed name.
    ///
    /// # Errors
    ///
    /// Returns `FolderError::EmptyName` if the name is blank.
    pub fn new(
        id: FolderId,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, FolderError> {
        let name = normalize_folder_name(name)?;
        Ok(Self {
            id,
            name,
            created_at,
        })
    }

    /// Returns a copy carrying a new name, keeping id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns `FolderError::EmptyName` if the name is blank.
    pub fn renamed(&self, name: impl Into<String>) -> Result<Self, FolderError> {
        Self::new(self.id, name, self.created_at)
    }

    #[must_use]
    pub fn id(&self) -> FolderId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Trims a folder name and rejects blanks.
///
/// # Errors
///
/// Returns `FolderError::EmptyName` if the name is blank.
pub fn normalize_folder_name(name: impl Into<String>) -> Result<String, FolderError> {
    let raw = name.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FolderError::EmptyName);
    }
    Ok(trimmed.to_owned())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

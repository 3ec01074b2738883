use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::{CategoryId, FolderId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CategoryError {
    #[error("category name cannot be empty")]
    EmptyName,
}

/// A group of questions inside a folder. The unit a quiz session draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    folder_id: FolderId,
    name: String,
    created_at: DateTime<Utc>,
}

impl Category {
    /// Creates a category with a trimmed name.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::EmptyName` if the name is blank.
    pub fn new(
        id: CategoryId,
        folder_id: FolderId,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CategoryError> {
        Ok(Self {
            id,
            folder_id,
            name: normalize_category_name(name)?,
            created_at,
        })
    }

    /// # Errors
    ///
    /// Returns `CategoryError::EmptyName` if the name is blank.
    pub fn renamed(&self, name: impl Into<String>) -> Result<Self, CategoryError> {
        Self::new(self.id, self.folder_id, name, self.created_at)
    }

    #[must_use]
    pub fn id(&self) -> CategoryId {
        self.id
    }

    #[must_use]
    pub fn folder_id(&self) -> FolderId {
        self.folder_id
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

/// Trims a category name and rejects blanks.
///
/// # Errors
///
/// Returns `CategoryError::EmptyName` if the name is blank.
pub fn normalize_category_name(name: impl Into<String>) -> Result<String, CategoryError> {
    let raw = name.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CategoryError::EmptyName);
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn category_rejects_blank_name() {
        let err =
            Category::new(CategoryId::random(), FolderId::random(), "\t", fixed_now()).unwrap_err();
        assert_eq!(err, CategoryError::EmptyName);
    }

    #[test]
    fn category_keeps_folder_reference() {
        let folder_id = FolderId::random();
        let category =
            Category::new(CategoryId::random(), folder_id, " Capitals ", fixed_now()).unwrap();
        assert_eq!(category.folder_id(), folder_id);
        assert_eq!(category.name(), "Capitals");
    }
}

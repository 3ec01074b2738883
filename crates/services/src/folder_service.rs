use std::sync::Arc;

use quiz_core::model::{Folder, FolderId, normalize_folder_name};
use storage::repository::FolderRepository;

use crate::Clock;
use crate::error::FolderServiceError;

/// Folder CRUD for the admin console.
#[derive(Clone)]
pub struct FolderService {
    clock: Clock,
    folders: Arc<dyn FolderRepository>,
}

impl FolderService {
    #[must_use]
    pub fn new(clock: Clock, folders: Arc<dyn FolderRepository>) -> Self {
        Self { clock, folders }
    }

    /// Folders oldest first.
    ///
    /// # Errors
    ///
    /// Returns `FolderServiceError::Storage` if repository access fails.
    pub async fn list_folders(&self) -> Result<Vec<Folder>, FolderServiceError> {
        Ok(self.folders.list_folders().await?)
    }

    /// # Errors
    ///
    /// Returns `FolderServiceError::Storage` (`NotFound` included) if the lookup fails.
    pub async fn get_folder(&self, id: FolderId) -> Result<Folder, FolderServiceError> {
        Ok(self.folders.get_folder(id).await?)
    }

    /// Create and persist a folder.
    ///
    /// # Errors
    ///
    /// Returns `FolderServiceError::Folder` for a blank name.
    /// Returns `FolderServiceError::Storage` if persistence fails.
    pub async fn create_folder(&self, name: &str) -> Result<Folder, FolderServiceError> {
        let folder = Folder::new(FolderId::random(), name, self.clock.now())?;
        let stored = self.folders.insert_folder(&folder).await?;
        log::info!("created folder {} ({})", stored.name(), stored.id());
        Ok(stored)
    }

    /// # Errors
    ///
    /// Returns `FolderServiceError::Folder` for a blank name, before any storage call.
    /// Returns `FolderServiceError::Storage` if the update fails.
    pub async fn rename_folder(
        &self,
        id: FolderId,
        name: &str,
    ) -> Result<Folder, FolderServiceError> {
        let name = normalize_folder_name(name)?;
        Ok(self.folders.rename_folder(id, &name).await?)
    }

    /// Delete a folder; its categories and questions go with it.
    ///
    /// # Errors
    ///
    /// Returns `FolderServiceError::Storage` with `NotFound` if it was already gone.
    pub async fn delete_folder(&self, id: FolderId) -> Result<(), FolderServiceError> {
        self.folders.delete_folder(id).await?;
        log::info!("deleted folder {id}");
        Ok(())
    }
}

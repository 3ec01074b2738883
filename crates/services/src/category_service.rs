use std::sync::Arc;

use quiz_core::model::{Category, CategoryId, FolderId, normalize_category_name};
use storage::repository::CategoryRepository;

use crate::Clock;
use crate::error::CategoryServiceError;

/// Category CRUD scoped to a folder.
#[derive(Clone)]
pub struct CategoryService {
    clock: Clock,
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    #[must_use]
    pub fn new(clock: Clock, categories: Arc<dyn CategoryRepository>) -> Self {
        Self { clock, categories }
    }

    /// # Errors
    ///
    /// Returns `CategoryServiceError::Storage` if repository access fails.
    pub async fn list_categories(
        &self,
        folder_id: FolderId,
    ) -> Result<Vec<Category>, CategoryServiceError> {
        Ok(self.categories.list_categories(folder_id).await?)
    }

    /// # Errors
    ///
    /// Returns `CategoryServiceError::Storage` (`NotFound` included) if the lookup fails.
    pub async fn get_category(&self, id: CategoryId) -> Result<Category, CategoryServiceError> {
        Ok(self.categories.get_category(id).await?)
    }

    /// # Errors
    ///
    /// Returns `CategoryServiceError::Category` for a blank name.
    /// Returns `CategoryServiceError::Storage` if the folder is missing or persistence fails.
    pub async fn create_category(
        &self,
        folder_id: FolderId,
        name: &str,
    ) -> Result<Category, CategoryServiceError> {
        let category = Category::new(CategoryId::random(), folder_id, name, self.clock.now())?;
        let stored = self.categories.insert_category(&category).await?;
        log::info!("created category {} in folder {folder_id}", stored.name());
        Ok(stored)
    }

    /// # Errors
    ///
    /// Returns `CategoryServiceError::Category` for a blank name.
    /// Returns `CategoryServiceError::Storage` if the update fails.
    pub async fn rename_category(
        &self,
        id: CategoryId,
        name: &str,
    ) -> Result<Category, CategoryServiceError> {
        let name = normalize_category_name(name)?;
        Ok(self.categories.rename_category(id, &name).await?)
    }

    /// # Errors
    ///
    /// Returns `CategoryServiceError::Storage` with `NotFound` if it was already gone.
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), CategoryServiceError> {
        self.categories.delete_category(id).await?;
        log::info!("deleted category {id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{CategoryError, Folder};
    use quiz_core::time::{fixed_clock, fixed_now};
    use storage::repository::{FolderRepository, InMemoryRepository, StorageError};

    async fn setup() -> (CategoryService, FolderId) {
        let repo = InMemoryRepository::new();
        let folder = Folder::new(FolderId::random(), "Geo", fixed_now()).unwrap();
        repo.insert_folder(&folder).await.unwrap();
        (CategoryService::new(fixed_clock(), Arc::new(repo)), folder.id())
    }

    #[tokio::test]
    async fn categories_are_scoped_to_folder() {
        let (svc, folder_id) = setup().await;
        svc.create_category(folder_id, "Capitals").await.unwrap();
        svc.create_category(folder_id, "Rivers").await.unwrap();

        let names: Vec<String> = svc
            .list_categories(folder_id)
            .await
            .unwrap()
            .iter()
            .map(|c| c.name().to_owned())
            .collect();
        assert_eq!(names, ["Capitals", "Rivers"]);
        assert!(svc.list_categories(FolderId::random()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_in_missing_folder_fails() {
        let (svc, _) = setup().await;
        assert!(matches!(
            svc.create_category(FolderId::random(), "Lost").await,
            Err(CategoryServiceError::Storage(StorageError::NotFound))
        ));
    }

    #[tokio::test]
    async fn rename_rejects_blank() {
        let (svc, folder_id) = setup().await;
        let cat = svc.create_category(folder_id, "Old").await.unwrap();
        assert!(matches!(
            svc.rename_category(cat.id(), " ").await,
            Err(CategoryServiceError::Category(CategoryError::EmptyName))
        ));
        assert_eq!(
            svc.rename_category(cat.id(), "New").await.unwrap().name(),
            "New"
        );
    }
}

use quiz_core::model::{Folder, FolderId};

use super::SqliteRepository;
use super::mapping::{db_err, map_folder_row};
use crate::repository::{FolderRepository, StorageError};

#[async_trait::async_trait]
impl FolderRepository for SqliteRepository {
    async fn list_folders(&self) -> Result<Vec<Folder>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, name, created_at
            FROM folders
            ORDER BY created_at ASC, rowid ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(map_folder_row).collect()
    }

    async fn get_folder(&self, id: FolderId) -> Result<Folder, StorageError> {
        let row = sqlx::query("SELECT id, name, created_at FROM folders WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        match row {
            Some(row) => map_folder_row(&row),
            None => Err(StorageError::NotFound),
        }
    }

    async fn insert_folder(&self, folder: &Folder) -> Result<Folder, StorageError> {
        sqlx::query("INSERT INTO folders (id, name, created_at) VALUES (?1, ?2, ?3)")
            .bind(folder.id().to_string())
            .bind(folder.name())
            .bind(folder.created_at())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(folder.clone())
    }

    async fn rename_folder(&self, id: FolderId, name: &str) -> Result<Folder, StorageError> {
        let res = sqlx::query("UPDATE folders SET name = ?1 WHERE id = ?2")
            .bind(name)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        self.get_folder(id).await
    }

    async fn delete_folder(&self, id: FolderId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM folders WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}

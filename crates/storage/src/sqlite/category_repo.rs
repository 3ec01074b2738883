use quiz_core::model::{Category, CategoryId, FolderId};

use super::SqliteRepository;
use super::mapping::{db_err, map_category_row};
use crate::repository::{CategoryRepository, StorageError};

#[async_trait::async_trait]
impl CategoryRepository for SqliteRepository {
    async fn list_categories(&self, folder_id: FolderId) -> Result<Vec<Category>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, folder_id, name, created_at
            FROM categories
            WHERE folder_id = ?1
            ORDER BY created_at ASC, rowid ASC
            ",
        )
        .bind(folder_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(map_category_row).collect()
    }

    async fn get_category(&self, id: CategoryId) -> Result<Category, StorageError> {
        let row =
            sqlx::query("SELECT id, folder_id, name, created_at FROM categories WHERE id = ?1")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;

        match row {
            Some(row) => map_category_row(&row),
            None => Err(StorageError::NotFound),
        }
    }

    async fn insert_category(&self, category: &Category) -> Result<Category, StorageError> {
        sqlx::query(
            r"
            INSERT INTO categories (id, folder_id, name, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(category.id().to_string())
        .bind(category.folder_id().to_string())
        .bind(category.name())
        .bind(category.created_at())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(category.clone())
    }

    async fn rename_category(
        &self,
        id: CategoryId,
        name: &str,
    ) -> Result<Category, StorageError> {
        let res = sqlx::query("UPDATE categories SET name = ?1 WHERE id = ?2")
            .bind(name)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        self.get_category(id).await
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM categories WHERE id = ?1")
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

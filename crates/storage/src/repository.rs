use async_trait::async_trait;
use quiz_core::model::{
    Category, CategoryId, Folder, FolderId, Question, QuestionContent, QuestionId,
};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

use crate::auth::{AccessToken, AuthGateway, StaticAuth};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("not authorized")]
    Unauthorized,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("backend returned {status}: {message}")]
    Remote { status: u16, message: String },
}

//
// ─── QUERIES ───────────────────────────────────────────────────────────────────
//

/// Ordering on `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// Which categories a question listing covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionScope {
    Category(CategoryId),
    Categories(Vec<CategoryId>),
}

/// Filter and ordering for question listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionQuery {
    pub scope: QuestionScope,
    pub active_only: bool,
    pub order: SortOrder,
}

impl QuestionQuery {
    #[must_use]
    pub fn for_category(id: CategoryId) -> Self {
        Self {
            scope: QuestionScope::Category(id),
            active_only: false,
            order: SortOrder::Ascending,
        }
    }

    #[must_use]
    pub fn for_categories(ids: impl IntoIterator<Item = CategoryId>) -> Self {
        Self {
            scope: QuestionScope::Categories(ids.into_iter().collect()),
            active_only: false,
            order: SortOrder::Ascending,
        }
    }

    #[must_use]
    pub fn active_only(mut self) -> Self {
        self.active_only = true;
        self
    }

    #[must_use]
    pub fn ordered(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// True when the scope can never match anything.
    #[must_use]
    pub fn is_empty_scope(&self) -> bool {
        matches!(&self.scope, QuestionScope::Categories(ids) if ids.is_empty())
    }

    #[must_use]
    pub fn matches(&self, question: &Question) -> bool {
        let in_scope = match &self.scope {
            QuestionScope::Category(id) => question.category_id() == *id,
            QuestionScope::Categories(ids) => ids.contains(&question.category_id()),
        };
        in_scope && (!self.active_only || question.is_active())
    }
}

//
// ─── CONTRACTS ─────────────────────────────────────────────────────────────────
//

/// Repository contract for folders. Listings are ordered by creation time, oldest first.
#[async_trait]
pub trait FolderRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the folders cannot be read.
    async fn list_folders(&self) -> Result<Vec<Folder>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_folder(&self, id: FolderId) -> Result<Folder, StorageError>;

    /// Persist a new folder and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the id is taken, or other storage errors.
    async fn insert_folder(&self, folder: &Folder) -> Result<Folder, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the folder does not exist.
    async fn rename_folder(&self, id: FolderId, name: &str) -> Result<Folder, StorageError>;

    /// Delete a folder together with its categories and their questions.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the folder does not exist.
    async fn delete_folder(&self, id: FolderId) -> Result<(), StorageError>;
}

/// Repository contract for categories. Listings are ordered oldest first.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the categories cannot be read.
    async fn list_categories(&self, folder_id: FolderId) -> Result<Vec<Category>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_category(&self, id: CategoryId) -> Result<Category, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the owning folder is missing,
    /// `StorageError::Conflict` if the id is taken.
    async fn insert_category(&self, category: &Category) -> Result<Category, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the category does not exist.
    async fn rename_category(&self, id: CategoryId, name: &str)
    -> Result<Category, StorageError>;

    /// Delete a category together with its questions.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the category does not exist.
    async fn delete_category(&self, id: CategoryId) -> Result<(), StorageError>;
}

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the questions cannot be read.
    async fn list_questions(&self, query: &QuestionQuery) -> Result<Vec<Question>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_question(&self, id: QuestionId) -> Result<Question, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the owning category is missing,
    /// `StorageError::Conflict` if the id is taken.
    async fn insert_question(&self, question: &Question) -> Result<Question, StorageError>;

    /// Replace the editable content of a question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the question does not exist.
    async fn update_question(
        &self,
        id: QuestionId,
        content: &QuestionContent,
    ) -> Result<Question, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the question does not exist.
    async fn set_question_active(
        &self,
        id: QuestionId,
        is_active: bool,
    ) -> Result<Question, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the question does not exist.
    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError>;
}

//
// ─── IN-MEMORY ─────────────────────────────────────────────────────────────────
//

/// In-memory repository for tests and prototyping. Rows keep insertion order
/// so equal timestamps still list deterministically.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    folders: Arc<Mutex<Vec<Folder>>>,
    categories: Arc<Mutex<Vec<Category>>>,
    questions: Arc<Mutex<Vec<Question>>>,
}

fn lock<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>, StorageError> {
    m.lock().map_err(|e| StorageError::Connection(e.to_string()))
}

fn sorted_by_created<T, F>(mut rows: Vec<T>, order: SortOrder, created: F) -> Vec<T>
where
    F: Fn(&T) -> chrono::DateTime<chrono::Utc>,
{
    match order {
        SortOrder::Ascending => rows.sort_by_key(|r| created(r)),
        SortOrder::Descending => {
            rows.reverse();
            rows.sort_by(|a, b| created(b).cmp(&created(a)));
        }
    }
    rows
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FolderRepository for InMemoryRepository {
    async fn list_folders(&self) -> Result<Vec<Folder>, StorageError> {
        let rows = lock(&self.folders)?.clone();
        Ok(sorted_by_created(rows, SortOrder::Ascending, Folder::created_at))
    }

    async fn get_folder(&self, id: FolderId) -> Result<Folder, StorageError> {
        lock(&self.folders)?
            .iter()
            .find(|f| f.id() == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn insert_folder(&self, folder: &Folder) -> Result<Folder, StorageError> {
        let mut guard = lock(&self.folders)?;
        if guard.iter().any(|f| f.id() == folder.id()) {
            return Err(StorageError::Conflict);
        }
        guard.push(folder.clone());
        Ok(folder.clone())
    }

    async fn rename_folder(&self, id: FolderId, name: &str) -> Result<Folder, StorageError> {
        let mut guard = lock(&self.folders)?;
        let slot = guard
            .iter_mut()
            .find(|f| f.id() == id)
            .ok_or(StorageError::NotFound)?;
        *slot = slot
            .renamed(name)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(slot.clone())
    }

    async fn delete_folder(&self, id: FolderId) -> Result<(), StorageError> {
        let mut folders = lock(&self.folders)?;
        let before = folders.len();
        folders.retain(|f| f.id() != id);
        if folders.len() == before {
            return Err(StorageError::NotFound);
        }

        let mut categories = lock(&self.categories)?;
        let doomed: Vec<CategoryId> = categories
            .iter()
            .filter(|c| c.folder_id() == id)
            .map(Category::id)
            .collect();
        categories.retain(|c| c.folder_id() != id);
        lock(&self.questions)?.retain(|q| !doomed.contains(&q.category_id()));
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository {
    async fn list_categories(&self, folder_id: FolderId) -> Result<Vec<Category>, StorageError> {
        let rows: Vec<Category> = lock(&self.categories)?
            .iter()
            .filter(|c| c.folder_id() == folder_id)
            .cloned()
            .collect();
        Ok(sorted_by_created(rows, SortOrder::Ascending, Category::created_at))
    }

    async fn get_category(&self, id: CategoryId) -> Result<Category, StorageError> {
        lock(&self.categories)?
            .iter()
            .find(|c| c.id() == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn insert_category(&self, category: &Category) -> Result<Category, StorageError> {
        if !lock(&self.folders)?
            .iter()
            .any(|f| f.id() == category.folder_id())
        {
            return Err(StorageError::NotFound);
        }
        let mut guard = lock(&self.categories)?;
        if guard.iter().any(|c| c.id() == category.id()) {
            return Err(StorageError::Conflict);
        }
        guard.push(category.clone());
        Ok(category.clone())
    }

    async fn rename_category(
        &self,
        id: CategoryId,
        name: &str,
    ) -> Result<Category, StorageError> {
        let mut guard = lock(&self.categories)?;
        let slot = guard
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or(StorageError::NotFound)?;
        *slot = slot
            .renamed(name)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(slot.clone())
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), StorageError> {
        let mut categories = lock(&self.categories)?;
        let before = categories.len();
        categories.retain(|c| c.id() != id);
        if categories.len() == before {
            return Err(StorageError::NotFound);
        }
        lock(&self.questions)?.retain(|q| q.category_id() != id);
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn list_questions(&self, query: &QuestionQuery) -> Result<Vec<Question>, StorageError> {
        let rows: Vec<Question> = lock(&self.questions)?
            .iter()
            .filter(|q| query.matches(q))
            .cloned()
            .collect();
        Ok(sorted_by_created(rows, query.order, Question::created_at))
    }

    async fn get_question(&self, id: QuestionId) -> Result<Question, StorageError> {
        lock(&self.questions)?
            .iter()
            .find(|q| q.id() == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn insert_question(&self, question: &Question) -> Result<Question, StorageError> {
        if !lock(&self.categories)?
            .iter()
            .any(|c| c.id() == question.category_id())
        {
            return Err(StorageError::NotFound);
        }
        let mut guard = lock(&self.questions)?;
        if guard.iter().any(|q| q.id() == question.id()) {
            return Err(StorageError::Conflict);
        }
        guard.push(question.clone());
        Ok(question.clone())
    }

    async fn update_question(
        &self,
        id: QuestionId,
        content: &QuestionContent,
    ) -> Result<Question, StorageError> {
        let mut guard = lock(&self.questions)?;
        let slot = guard
            .iter_mut()
            .find(|q| q.id() == id)
            .ok_or(StorageError::NotFound)?;
        *slot = slot.clone().with_content(content.clone());
        Ok(slot.clone())
    }

    async fn set_question_active(
        &self,
        id: QuestionId,
        is_active: bool,
    ) -> Result<Question, StorageError> {
        let mut guard = lock(&self.questions)?;
        let slot = guard
            .iter_mut()
            .find(|q| q.id() == id)
            .ok_or(StorageError::NotFound)?;
        *slot = slot.clone().with_active(is_active);
        Ok(slot.clone())
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        let mut guard = lock(&self.questions)?;
        let before = guard.len();
        guard.retain(|q| q.id() != id);
        if guard.len() == before {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}

//
// ─── AGGREGATE ─────────────────────────────────────────────────────────────────
//

/// Local admin credentials used when no hosted backend is configured.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@localhost";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Repositories plus the auth gateway behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub folders: Arc<dyn FolderRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub auth: Arc<dyn AuthGateway>,
    /// Bearer token shared with backends that send it on every request.
    pub access_token: AccessToken,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let folders: Arc<dyn FolderRepository> = Arc::new(repo.clone());
        let categories: Arc<dyn CategoryRepository> = Arc::new(repo.clone());
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo);
        Self {
            folders,
            categories,
            questions,
            auth: Arc::new(StaticAuth::new(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD)),
            access_token: AccessToken::default(),
        }
    }

    /// Swap the auth gateway, e.g. to configure local admin credentials.
    #[must_use]
    pub fn with_auth(mut self, auth: Arc<dyn AuthGateway>) -> Self {
        self.auth = auth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::model::{QuestionDraft, QuestionKind};
    use quiz_core::time::fixed_now;

    fn folder(name: &str, offset: i64) -> Folder {
        Folder::new(FolderId::random(), name, fixed_now() + Duration::seconds(offset)).unwrap()
    }

    fn category(folder: &Folder, name: &str) -> Category {
        Category::new(CategoryId::random(), folder.id(), name, fixed_now()).unwrap()
    }

    fn question(category: &Category, prompt: &str, active: bool, offset: i64) -> Question {
        let content = QuestionDraft::new(QuestionKind::Text, prompt, "x")
            .validate()
            .unwrap();
        Question::new(
            QuestionId::random(),
            category.id(),
            content,
            active,
            fixed_now() + Duration::seconds(offset),
        )
    }

    #[tokio::test]
    async fn folders_list_oldest_first() {
        let repo = InMemoryRepository::new();
        repo.insert_folder(&folder("Later", 10)).await.unwrap();
        repo.insert_folder(&folder("Earlier", 0)).await.unwrap();

        let names: Vec<String> = repo
            .list_folders()
            .await
            .unwrap()
            .iter()
            .map(|f| f.name().to_owned())
            .collect();
        assert_eq!(names, ["Earlier", "Later"]);
    }

    #[tokio::test]
    async fn deleting_folder_cascades() {
        let repo = InMemoryRepository::new();
        let f = folder("Science", 0);
        repo.insert_folder(&f).await.unwrap();
        let c = category(&f, "Physics");
        repo.insert_category(&c).await.unwrap();
        let q = question(&c, "g?", true, 0);
        repo.insert_question(&q).await.unwrap();

        repo.delete_folder(f.id()).await.unwrap();

        assert!(matches!(repo.get_category(c.id()).await, Err(StorageError::NotFound)));
        assert!(matches!(repo.get_question(q.id()).await, Err(StorageError::NotFound)));
        assert!(matches!(repo.delete_folder(f.id()).await, Err(StorageError::NotFound)));
    }

    #[tokio::test]
    async fn category_insert_requires_folder() {
        let repo = InMemoryRepository::new();
        let orphan = category(&folder("Ghost", 0), "Nowhere");
        assert!(matches!(
            repo.insert_category(&orphan).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn question_query_filters_and_orders() {
        let repo = InMemoryRepository::new();
        let f = folder("Science", 0);
        repo.insert_folder(&f).await.unwrap();
        let a = category(&f, "A");
        let b = category(&f, "B");
        repo.insert_category(&a).await.unwrap();
        repo.insert_category(&b).await.unwrap();
        repo.insert_question(&question(&a, "a1", true, 0)).await.unwrap();
        repo.insert_question(&question(&a, "a2", false, 5)).await.unwrap();
        repo.insert_question(&question(&b, "b1", true, 10)).await.unwrap();

        let newest_first = repo
            .list_questions(&QuestionQuery::for_category(a.id()).ordered(SortOrder::Descending))
            .await
            .unwrap();
        let prompts: Vec<&str> = newest_first.iter().map(Question::prompt).collect();
        assert_eq!(prompts, ["a2", "a1"]);

        let active = repo
            .list_questions(&QuestionQuery::for_categories([a.id(), b.id()]).active_only())
            .await
            .unwrap();
        let prompts: Vec<&str> = active.iter().map(Question::prompt).collect();
        assert_eq!(prompts, ["a1", "b1"]);

        let none = repo
            .list_questions(&QuestionQuery::for_categories([]))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn toggling_and_updating_questions() {
        let repo = InMemoryRepository::new();
        let f = folder("F", 0);
        repo.insert_folder(&f).await.unwrap();
        let c = category(&f, "C");
        repo.insert_category(&c).await.unwrap();
        let q = question(&c, "old", true, 0);
        repo.insert_question(&q).await.unwrap();

        let toggled = repo.set_question_active(q.id(), false).await.unwrap();
        assert!(!toggled.is_active());

        let content = QuestionDraft::new(QuestionKind::Text, "new", "y")
            .validate()
            .unwrap();
        let updated = repo.update_question(q.id(), &content).await.unwrap();
        assert_eq!(updated.prompt(), "new");
        assert!(!updated.is_active());
    }
}

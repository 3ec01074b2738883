use async_trait::async_trait;
use quiz_core::model::{
    Category, CategoryId, Folder, FolderId, Question, QuestionContent, QuestionId,
};
use serde_json::json;

use super::RestClient;
use super::query::RestQuery;
use super::rows::{CategoryRow, FolderRow, QuestionContentPatch, QuestionRow};
use crate::repository::{
    CategoryRepository, FolderRepository, QuestionQuery, QuestionRepository, QuestionScope,
    SortOrder, StorageError,
};

const FOLDERS: &str = "folders";
const CATEGORIES: &str = "categories";
const QUESTIONS: &str = "questions";

/// Repository implementation over the hosted REST API. Cascading deletes are
/// enforced by the backend's foreign keys.
#[derive(Clone)]
pub struct RemoteRepository {
    client: RestClient,
}

impl RemoteRepository {
    pub(crate) fn new(client: RestClient) -> Self {
        Self { client }
    }
}

fn by_id(id: impl std::fmt::Display) -> RestQuery {
    RestQuery::empty().eq("id", id)
}

fn single<T>(rows: Vec<T>) -> Result<T, StorageError> {
    rows.into_iter().next().ok_or(StorageError::NotFound)
}

/// Query parameters for a question listing.
pub(crate) fn question_list_query(query: &QuestionQuery) -> RestQuery {
    let mut rest = RestQuery::select_all();
    rest = match &query.scope {
        QuestionScope::Category(id) => rest.eq("category_id", id),
        QuestionScope::Categories(ids) => rest.in_list("category_id", ids),
    };
    if query.active_only {
        rest = rest.eq("is_active", true);
    }
    rest.order_by("created_at", query.order)
}

#[async_trait]
impl FolderRepository for RemoteRepository {
    async fn list_folders(&self) -> Result<Vec<Folder>, StorageError> {
        let query = RestQuery::select_all().order_by("created_at", SortOrder::Ascending);
        self.client
            .select::<FolderRow>(FOLDERS, &query)
            .await?
            .into_iter()
            .map(FolderRow::into_folder)
            .collect()
    }

    async fn get_folder(&self, id: FolderId) -> Result<Folder, StorageError> {
        let query = RestQuery::select_all().eq("id", id);
        single(self.client.select::<FolderRow>(FOLDERS, &query).await?)?.into_folder()
    }

    async fn insert_folder(&self, folder: &Folder) -> Result<Folder, StorageError> {
        self.client
            .insert::<_, FolderRow>(FOLDERS, &FolderRow::from_folder(folder))
            .await?
            .into_folder()
    }

    async fn rename_folder(&self, id: FolderId, name: &str) -> Result<Folder, StorageError> {
        self.client
            .update::<_, FolderRow>(FOLDERS, &by_id(id), &json!({ "name": name }))
            .await?
            .into_folder()
    }

    async fn delete_folder(&self, id: FolderId) -> Result<(), StorageError> {
        self.client.delete(FOLDERS, &by_id(id)).await
    }
}

#[async_trait]
impl CategoryRepository for RemoteRepository {
    async fn list_categories(&self, folder_id: FolderId) -> Result<Vec<Category>, StorageError> {
        let query = RestQuery::select_all()
            .eq("folder_id", folder_id)
            .order_by("created_at", SortOrder::Ascending);
        self.client
            .select::<CategoryRow>(CATEGORIES, &query)
            .await?
            .into_iter()
            .map(CategoryRow::into_category)
            .collect()
    }

    async fn get_category(&self, id: CategoryId) -> Result<Category, StorageError> {
        let query = RestQuery::select_all().eq("id", id);
        single(self.client.select::<CategoryRow>(CATEGORIES, &query).await?)?.into_category()
    }

    async fn insert_category(&self, category: &Category) -> Result<Category, StorageError> {
        self.client
            .insert::<_, CategoryRow>(CATEGORIES, &CategoryRow::from_category(category))
            .await?
            .into_category()
    }

    async fn rename_category(
        &self,
        id: CategoryId,
        name: &str,
    ) -> Result<Category, StorageError> {
        self.client
            .update::<_, CategoryRow>(CATEGORIES, &by_id(id), &json!({ "name": name }))
            .await?
            .into_category()
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), StorageError> {
        self.client.delete(CATEGORIES, &by_id(id)).await
    }
}

#[async_trait]
impl QuestionRepository for RemoteRepository {
    async fn list_questions(&self, query: &QuestionQuery) -> Result<Vec<Question>, StorageError> {
        if query.is_empty_scope() {
            return Ok(Vec::new());
        }
        self.client
            .select::<QuestionRow>(QUESTIONS, &question_list_query(query))
            .await?
            .into_iter()
            .map(QuestionRow::into_question)
            .collect()
    }

    async fn get_question(&self, id: QuestionId) -> Result<Question, StorageError> {
        let query = RestQuery::select_all().eq("id", id);
        single(self.client.select::<QuestionRow>(QUESTIONS, &query).await?)?.into_question()
    }

    async fn insert_question(&self, question: &Question) -> Result<Question, StorageError> {
        self.client
            .insert::<_, QuestionRow>(QUESTIONS, &QuestionRow::from_question(question))
            .await?
            .into_question()
    }

    async fn update_question(
        &self,
        id: QuestionId,
        content: &QuestionContent,
    ) -> Result<Question, StorageError> {
        self.client
            .update::<_, QuestionRow>(QUESTIONS, &by_id(id), &QuestionContentPatch::new(content))
            .await?
            .into_question()
    }

    async fn set_question_active(
        &self,
        id: QuestionId,
        is_active: bool,
    ) -> Result<Question, StorageError> {
        self.client
            .update::<_, QuestionRow>(QUESTIONS, &by_id(id), &json!({ "is_active": is_active }))
            .await?
            .into_question()
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        self.client.delete(QUESTIONS, &by_id(id)).await
    }
}

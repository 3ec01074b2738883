//! Wire shapes of the three collections.

use chrono::{DateTime, Utc};
use quiz_core::model::{
    Category, CategoryId, Folder, FolderId, Question, QuestionContent, QuestionId, QuestionKind,
};
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct FolderRow {
    pub id: FolderId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl FolderRow {
    pub fn from_folder(folder: &Folder) -> Self {
        Self {
            id: folder.id(),
            name: folder.name().to_owned(),
            created_at: folder.created_at(),
        }
    }

    pub fn into_folder(self) -> Result<Folder, StorageError> {
        Folder::new(self.id, self.name, self.created_at).map_err(ser)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CategoryRow {
    pub id: CategoryId,
    pub folder_id: FolderId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl CategoryRow {
    pub fn from_category(category: &Category) -> Self {
        Self {
            id: category.id(),
            folder_id: category.folder_id(),
            name: category.name().to_owned(),
            created_at: category.created_at(),
        }
    }

    pub fn into_category(self) -> Result<Category, StorageError> {
        Category::new(self.id, self.folder_id, self.name, self.created_at).map_err(ser)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct QuestionRow {
    pub id: QuestionId,
    pub category_id: CategoryId,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub question: String,
    pub correct_answer: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl QuestionRow {
    pub fn from_question(question: &Question) -> Self {
        let mut row = Self {
            id: question.id(),
            category_id: question.category_id(),
            kind: question.kind(),
            question: String::new(),
            correct_answer: String::new(),
            options: None,
            image_url: None,
            is_active: question.is_active(),
            created_at: question.created_at(),
        };
        row.apply_content(question.content());
        row
    }

    fn apply_content(&mut self, content: &QuestionContent) {
        self.kind = content.kind();
        self.question = content.prompt().to_owned();
        self.correct_answer = content.correct_answer().to_owned();
        self.options = (!content.options().is_empty()).then(|| content.options().to_vec());
        self.image_url = content.image_url().map(str::to_owned);
    }

    pub fn into_question(self) -> Result<Question, StorageError> {
        let content = QuestionContent::from_persisted(
            self.kind,
            self.question,
            self.correct_answer,
            self.options,
            self.image_url,
        )
        .map_err(ser)?;
        Ok(Question::new(
            self.id,
            self.category_id,
            content,
            self.is_active,
            self.created_at,
        ))
    }
}

/// PATCH body replacing the editable part of a question.
#[derive(Debug, Serialize)]
pub(crate) struct QuestionContentPatch<'a> {
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub question: &'a str,
    pub correct_answer: &'a str,
    pub options: Option<&'a [String]>,
    pub image_url: Option<&'a str>,
}

impl<'a> QuestionContentPatch<'a> {
    pub fn new(content: &'a QuestionContent) -> Self {
        Self {
            kind: content.kind(),
            question: content.prompt(),
            correct_answer: content.correct_answer(),
            options: (!content.options().is_empty()).then(|| content.options()),
            image_url: content.image_url(),
        }
    }
}

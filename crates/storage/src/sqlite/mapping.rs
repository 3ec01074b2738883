use chrono::{DateTime, Utc};
use quiz_core::model::{
    Category, CategoryId, Folder, FolderId, Question, QuestionContent, QuestionId, QuestionKind,
};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use std::str::FromStr;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Maps constraint violations onto the storage taxonomy.
pub(crate) fn db_err(e: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return StorageError::Conflict;
        }
        if db.is_foreign_key_violation() {
            return StorageError::NotFound;
        }
    }
    StorageError::Connection(e.to_string())
}

fn id_col<T: FromStr>(row: &SqliteRow, col: &str) -> Result<T, StorageError>
where
    T::Err: core::fmt::Display,
{
    row.try_get::<String, _>(col)
        .map_err(ser)?
        .parse::<T>()
        .map_err(ser)
}

pub(crate) fn options_to_json(options: &[String]) -> Result<Option<String>, StorageError> {
    if options.is_empty() {
        return Ok(None);
    }
    serde_json::to_string(options).map(Some).map_err(ser)
}

pub(crate) fn map_folder_row(row: &SqliteRow) -> Result<Folder, StorageError> {
    Folder::new(
        id_col::<FolderId>(row, "id")?,
        row.try_get::<String, _>("name").map_err(ser)?,
        row.try_get::<DateTime<Utc>, _>("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_category_row(row: &SqliteRow) -> Result<Category, StorageError> {
    Category::new(
        id_col::<CategoryId>(row, "id")?,
        id_col::<FolderId>(row, "folder_id")?,
        row.try_get::<String, _>("name").map_err(ser)?,
        row.try_get::<DateTime<Utc>, _>("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_question_row(row: &SqliteRow) -> Result<Question, StorageError> {
    let kind: QuestionKind = row
        .try_get::<String, _>("type")
        .map_err(ser)?
        .parse()
        .map_err(ser)?;
    let options = row
        .try_get::<Option<String>, _>("options")
        .map_err(ser)?
        .map(|raw| serde_json::from_str::<Vec<String>>(&raw))
        .transpose()
        .map_err(ser)?;

    let content = QuestionContent::from_persisted(
        kind,
        row.try_get("question").map_err(ser)?,
        row.try_get("correct_answer").map_err(ser)?,
        options,
        row.try_get("image_url").map_err(ser)?,
    )
    .map_err(ser)?;

    Ok(Question::new(
        id_col::<QuestionId>(row, "id")?,
        id_col::<CategoryId>(row, "category_id")?,
        content,
        row.try_get::<i64, _>("is_active").map_err(ser)? != 0,
        row.try_get("created_at").map_err(ser)?,
    ))
}

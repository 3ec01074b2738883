use quiz_core::model::{Question, QuestionContent, QuestionId};
use sqlx::{QueryBuilder, Sqlite};

use super::SqliteRepository;
use super::mapping::{db_err, map_question_row, options_to_json};
use crate::repository::{QuestionQuery, QuestionRepository, QuestionScope, SortOrder, StorageError};

const QUESTION_COLUMNS: &str =
    "id, category_id, type, question, correct_answer, options, image_url, is_active, created_at";

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn list_questions(&self, query: &QuestionQuery) -> Result<Vec<Question>, StorageError> {
        if query.is_empty_scope() {
            return Ok(Vec::new());
        }

        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE "));
        match &query.scope {
            QuestionScope::Category(id) => {
                qb.push("category_id = ").push_bind(id.to_string());
            }
            QuestionScope::Categories(ids) => {
                qb.push("category_id IN (");
                let mut sep = qb.separated(", ");
                for id in ids {
                    sep.push_bind(id.to_string());
                }
                sep.push_unseparated(")");
            }
        }
        if query.active_only {
            qb.push(" AND is_active = 1");
        }
        qb.push(match query.order {
            SortOrder::Ascending => " ORDER BY created_at ASC, rowid ASC",
            SortOrder::Descending => " ORDER BY created_at DESC, rowid DESC",
        });

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.iter().map(map_question_row).collect()
    }

    async fn get_question(&self, id: QuestionId) -> Result<Question, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE id = ?1"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        match row {
            Some(row) => map_question_row(&row),
            None => Err(StorageError::NotFound),
        }
    }

    async fn insert_question(&self, question: &Question) -> Result<Question, StorageError> {
        sqlx::query(
            r"
            INSERT INTO questions
                (id, category_id, type, question, correct_answer, options, image_url, is_active, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ",
        )
        .bind(question.id().to_string())
        .bind(question.category_id().to_string())
        .bind(question.kind().as_str())
        .bind(question.prompt())
        .bind(question.correct_answer())
        .bind(options_to_json(question.options())?)
        .bind(question.image_url())
        .bind(i64::from(question.is_active()))
        .bind(question.created_at())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(question.clone())
    }

    async fn update_question(
        &self,
        id: QuestionId,
        content: &QuestionContent,
    ) -> Result<Question, StorageError> {
        let res = sqlx::query(
            r"
            UPDATE questions
            SET type = ?1, question = ?2, correct_answer = ?3, options = ?4, image_url = ?5
            WHERE id = ?6
            ",
        )
        .bind(content.kind().as_str())
        .bind(content.prompt())
        .bind(content.correct_answer())
        .bind(options_to_json(content.options())?)
        .bind(content.image_url())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        self.get_question(id).await
    }

    async fn set_question_active(
        &self,
        id: QuestionId,
        is_active: bool,
    ) -> Result<Question, StorageError> {
        let res = sqlx::query("UPDATE questions SET is_active = ?1 WHERE id = ?2")
            .bind(i64::from(is_active))
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        self.get_question(id).await
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM questions WHERE id = ?1")
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

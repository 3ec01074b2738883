use std::sync::Arc;

use quiz_core::model::{CategoryId, Question, QuestionDraft, QuestionId};
use storage::repository::{QuestionQuery, QuestionRepository, SortOrder};

use crate::Clock;
use crate::error::QuestionServiceError;

/// Question authoring: create, edit, duplicate, toggle, delete.
#[derive(Clone)]
pub struct QuestionService {
    clock: Clock,
    questions: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    #[must_use]
    pub fn new(clock: Clock, questions: Arc<dyn QuestionRepository>) -> Self {
        Self { clock, questions }
    }

    /// All questions of a category, newest first, inactive included.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn list_for_admin(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Question>, QuestionServiceError> {
        let query = QuestionQuery::for_category(category_id).ordered(SortOrder::Descending);
        Ok(self.questions.list_questions(&query).await?)
    }

    /// Validate the draft and persist it as a new question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Validation` before any storage call if the draft is invalid.
    /// Returns `QuestionServiceError::Storage` if persistence fails.
    pub async fn create_question(
        &self,
        category_id: CategoryId,
        draft: QuestionDraft,
    ) -> Result<Question, QuestionServiceError> {
        let is_active = draft.is_active;
        let content = draft.validate()?;
        let question = Question::new(
            QuestionId::random(),
            category_id,
            content,
            is_active,
            self.clock.now(),
        );
        let stored = self.questions.insert_question(&question).await?;
        log::info!(
            "created {} question {} in category {category_id}",
            stored.kind(),
            stored.id()
        );
        Ok(stored)
    }

    /// Replace the content of an existing question. The active flag is left as is.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Validation` if the draft is invalid.
    /// Returns `QuestionServiceError::Storage` if the question is missing or the update fails.
    pub async fn update_question(
        &self,
        id: QuestionId,
        draft: QuestionDraft,
    ) -> Result<Question, QuestionServiceError> {
        let content = draft.validate()?;
        let updated = self.questions.update_question(id, &content).await?;
        log::info!("updated question {id}");
        Ok(updated)
    }

    /// Insert a copy of the question with a `(Copy)` suffix on its prompt.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if the source is missing or the insert fails.
    pub async fn duplicate_question(&self, id: QuestionId) -> Result<Question, QuestionServiceError> {
        let source = self.questions.get_question(id).await?;
        let copy = Question::new(
            QuestionId::random(),
            source.category_id(),
            source.duplicate_content(),
            source.is_active(),
            self.clock.now(),
        );
        let stored = self.questions.insert_question(&copy).await?;
        log::info!("duplicated question {id} as {}", stored.id());
        Ok(stored)
    }

    /// Flip the active flag and return the updated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if the question is missing or the update fails.
    pub async fn toggle_active(&self, id: QuestionId) -> Result<Question, QuestionServiceError> {
        let current = self.questions.get_question(id).await?;
        self.set_active(id, !current.is_active()).await
    }

    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if the question is missing or the update fails.
    pub async fn set_active(
        &self,
        id: QuestionId,
        is_active: bool,
    ) -> Result<Question, QuestionServiceError> {
        let updated = self.questions.set_question_active(id, is_active).await?;
        log::debug!("question {id} active={is_active}");
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` with `NotFound` if it was already gone.
    pub async fn delete_question(&self, id: QuestionId) -> Result<(), QuestionServiceError> {
        self.questions.delete_question(id).await?;
        log::info!("deleted question {id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::model::{Category, Folder, FolderId, QuestionKind, QuestionValidationError};
    use quiz_core::time::{fixed_clock, fixed_now};
    use storage::repository::{CategoryRepository, FolderRepository, InMemoryRepository};

    async fn setup() -> (InMemoryRepository, CategoryId) {
        let repo = InMemoryRepository::new();
        let folder = Folder::new(FolderId::random(), "F", fixed_now()).unwrap();
        repo.insert_folder(&folder).await.unwrap();
        let category = Category::new(CategoryId::random(), folder.id(), "C", fixed_now()).unwrap();
        repo.insert_category(&category).await.unwrap();
        (repo, category.id())
    }

    #[tokio::test]
    async fn invalid_multiple_choice_is_rejected_before_persistence() {
        let (repo, category_id) = setup().await;
        let svc = QuestionService::new(fixed_clock(), Arc::new(repo.clone()));

        let draft = QuestionDraft::new(QuestionKind::MultipleChoice, "Capital?", "Lyon")
            .with_options(["Paris", "Berlin"]);
        assert!(matches!(
            svc.create_question(category_id, draft).await,
            Err(QuestionServiceError::Validation(
                QuestionValidationError::AnswerNotInOptions
            ))
        ));
        assert!(svc.list_for_admin(category_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn admin_list_is_newest_first() {
        let (repo, category_id) = setup().await;
        let mut clock = fixed_clock();
        let first = QuestionService::new(clock, Arc::new(repo.clone()))
            .create_question(category_id, QuestionDraft::new(QuestionKind::Text, "first", "1"))
            .await
            .unwrap();
        clock.advance(Duration::seconds(5));
        let second = QuestionService::new(clock, Arc::new(repo.clone()))
            .create_question(category_id, QuestionDraft::new(QuestionKind::Text, "second", "2"))
            .await
            .unwrap();

        let svc = QuestionService::new(clock, Arc::new(repo));
        let ids: Vec<QuestionId> = svc
            .list_for_admin(category_id)
            .await
            .unwrap()
            .iter()
            .map(Question::id)
            .collect();
        assert_eq!(ids, vec![second.id(), first.id()]);
    }

    #[tokio::test]
    async fn duplicate_toggle_and_delete() {
        let (repo, category_id) = setup().await;
        let svc = QuestionService::new(fixed_clock(), Arc::new(repo));
        let original = svc
            .create_question(
                category_id,
                QuestionDraft::new(QuestionKind::TrueFalse, "Sky is blue", "true"),
            )
            .await
            .unwrap();

        let copy = svc.duplicate_question(original.id()).await.unwrap();
        assert_ne!(copy.id(), original.id());
        assert_eq!(copy.prompt(), "Sky is blue (Copy)");

        let toggled = svc.toggle_active(copy.id()).await.unwrap();
        assert!(!toggled.is_active());
        let toggled = svc.toggle_active(copy.id()).await.unwrap();
        assert!(toggled.is_active());

        svc.delete_question(copy.id()).await.unwrap();
        assert_eq!(svc.list_for_admin(category_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_keeps_active_flag() {
        let (repo, category_id) = setup().await;
        let svc = QuestionService::new(fixed_clock(), Arc::new(repo));
        let q = svc
            .create_question(
                category_id,
                QuestionDraft::new(QuestionKind::Text, "Q", "A").with_active(false),
            )
            .await
            .unwrap();
        let updated = svc
            .update_question(q.id(), QuestionDraft::new(QuestionKind::Text, "Q2", "B"))
            .await
            .unwrap();
        assert_eq!(updated.prompt(), "Q2");
        assert!(!updated.is_active());
    }
}

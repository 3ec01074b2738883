use std::sync::Arc;

use rand::Rng;

use quiz_core::model::{Category, CategoryId, Folder, FolderId, Question, QuizSettings};
use storage::repository::{
    CategoryRepository, FolderRepository, QuestionQuery, QuestionRepository, StorageError,
};

use super::sampler::QuestionSampler;
use super::session::QuizSession;
use crate::error::QuizError;

/// Public quiz flow: folder and category pickers, then a sampled session.
#[derive(Clone)]
pub struct QuizService {
    settings: QuizSettings,
    folders: Arc<dyn FolderRepository>,
    categories: Arc<dyn CategoryRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(
        settings: QuizSettings,
        folders: Arc<dyn FolderRepository>,
        categories: Arc<dyn CategoryRepository>,
        questions: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self {
            settings,
            folders,
            categories,
            questions,
        }
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    /// # Errors
    ///
    /// Returns `QuizError::Storage` if repository access fails.
    pub async fn list_folders(&self) -> Result<Vec<Folder>, QuizError> {
        Ok(self.folders.list_folders().await?)
    }

    /// # Errors
    ///
    /// Returns `QuizError::Storage` if repository access fails.
    pub async fn list_categories(&self, folder_id: FolderId) -> Result<Vec<Category>, QuizError> {
        Ok(self.categories.list_categories(folder_id).await?)
    }

    async fn active_questions(&self, category_id: CategoryId) -> Result<Vec<Question>, StorageError> {
        self.questions
            .list_questions(&QuestionQuery::for_category(category_id).active_only())
            .await
    }

    /// Fetch the category's active questions once and sample a session from them.
    /// Fetch failures end up as an unavailable session rather than an error.
    pub async fn start_session(&self, category_id: CategoryId) -> QuizSession {
        let fetched = self.active_questions(category_id).await;
        let mut rng = rand::rng();
        self.session_from(category_id, fetched, &mut rng)
    }

    /// Same as `start_session` with a caller-provided RNG.
    pub async fn start_session_with<R: Rng + Send>(
        &self,
        category_id: CategoryId,
        rng: &mut R,
    ) -> QuizSession {
        let fetched = self.active_questions(category_id).await;
        self.session_from(category_id, fetched, rng)
    }

    fn session_from<R: Rng + ?Sized>(
        &self,
        category_id: CategoryId,
        fetched: Result<Vec<Question>, StorageError>,
        rng: &mut R,
    ) -> QuizSession {
        match fetched {
            Ok(pool) => {
                let available = pool.len();
                let sample = QuestionSampler::new(self.settings.sample_size()).sample(pool, rng);
                log::info!(
                    "quiz for category {category_id}: {} of {available} active questions",
                    sample.len()
                );
                QuizSession::start(sample)
            }
            Err(err) => {
                log::warn!("failed to load questions for category {category_id}: {err}");
                QuizSession::fetch_failed(err.to_string())
            }
        }
    }
}

use std::sync::Arc;

use quiz_core::model::QuizSettings;
use storage::auth::{MemorySessionStore, SessionStore};
use storage::remote::RemoteConfig;
use storage::repository::Storage;

use crate::Clock;
use crate::auth_service::AuthService;
use crate::category_service::CategoryService;
use crate::error::AppServicesError;
use crate::export::{ExportService, HttpImageSource, ImageSource};
use crate::folder_service::FolderService;
use crate::question_service::QuestionService;
use crate::quiz::QuizService;

/// Assembles the app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    folders: Arc<FolderService>,
    categories: Arc<CategoryService>,
    questions: Arc<QuestionService>,
    quiz: Arc<QuizService>,
    export: Arc<ExportService>,
    auth: Arc<AuthService>,
}

impl AppServices {
    /// Wire every service to the given storage.
    #[must_use]
    pub fn from_storage(
        storage: Storage,
        clock: Clock,
        settings: QuizSettings,
        session_store: Arc<dyn SessionStore>,
    ) -> Self {
        Self::with_image_source(
            storage,
            clock,
            settings,
            session_store,
            Arc::new(HttpImageSource::default()),
        )
    }

    /// Same as [`AppServices::from_storage`] with a custom image source for exports.
    #[must_use]
    pub fn with_image_source(
        storage: Storage,
        clock: Clock,
        settings: QuizSettings,
        session_store: Arc<dyn SessionStore>,
        images: Arc<dyn ImageSource>,
    ) -> Self {
        let Storage {
            folders,
            categories,
            questions,
            auth,
            access_token,
        } = storage;

        Self {
            folders: Arc::new(FolderService::new(clock, Arc::clone(&folders))),
            categories: Arc::new(CategoryService::new(clock, Arc::clone(&categories))),
            questions: Arc::new(QuestionService::new(clock, Arc::clone(&questions))),
            quiz: Arc::new(QuizService::new(
                settings,
                Arc::clone(&folders),
                Arc::clone(&categories),
                Arc::clone(&questions),
            )),
            export: Arc::new(ExportService::new(folders, categories, questions, images)),
            auth: Arc::new(AuthService::new(clock, auth, session_store, access_token)),
        }
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        settings: QuizSettings,
        session_store: Arc<dyn SessionStore>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(storage, clock, settings, session_store))
    }

    /// Build services backed by the hosted REST backend.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Remote` if the HTTP client cannot be built.
    pub fn new_remote(
        config: &RemoteConfig,
        clock: Clock,
        settings: QuizSettings,
        session_store: Arc<dyn SessionStore>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::remote(config)?;
        Ok(Self::from_storage(storage, clock, settings, session_store))
    }

    /// Volatile services for tests and previews.
    #[must_use]
    pub fn in_memory(clock: Clock, settings: QuizSettings) -> Self {
        Self::from_storage(
            Storage::in_memory(),
            clock,
            settings,
            Arc::new(MemorySessionStore::default()),
        )
    }

    #[must_use]
    pub fn folders(&self) -> Arc<FolderService> {
        Arc::clone(&self.folders)
    }

    #[must_use]
    pub fn categories(&self) -> Arc<CategoryService> {
        Arc::clone(&self.categories)
    }

    #[must_use]
    pub fn questions(&self) -> Arc<QuestionService> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn export(&self) -> Arc<ExportService> {
        Arc::clone(&self.export)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }
}

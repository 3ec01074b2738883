use std::sync::Arc;

use quiz_core::model::QuizSettings;
use services::{
    AuthService, CategoryService, ExportService, FolderService, QuestionService, QuizService,
};

/// Services the desktop views need, supplied by the composition root.
pub trait UiApp: Send + Sync {
    fn folders(&self) -> Arc<FolderService>;
    fn categories(&self) -> Arc<CategoryService>;
    fn questions(&self) -> Arc<QuestionService>;
    fn quiz(&self) -> Arc<QuizService>;
    fn export(&self) -> Arc<ExportService>;
    fn auth(&self) -> Arc<AuthService>;
}

#[derive(Clone)]
pub struct AppContext {
    folders: Arc<FolderService>,
    categories: Arc<CategoryService>,
    questions: Arc<QuestionService>,
    quiz: Arc<QuizService>,
    export: Arc<ExportService>,
    auth: Arc<AuthService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            folders: app.folders(),
            categories: app.categories(),
            questions: app.questions(),
            quiz: app.quiz(),
            export: app.export(),
            auth: app.auth(),
        }
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

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.quiz.settings()
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

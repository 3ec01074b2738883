//! Printable question sheets with an optional answer key.

mod grouping;
mod images;
mod layout;
mod render;

use std::collections::HashMap;
use std::sync::Arc;

use printpdf::image_crate::DynamicImage;
use rand::Rng;

use quiz_core::model::{CategoryId, FolderId, Question, QuestionId};
use storage::repository::{CategoryRepository, FolderRepository, QuestionQuery, QuestionRepository};

use crate::error::ExportError;

pub use grouping::{QuestionGroup, export_file_name, group_by_category};
pub use images::{HttpImageSource, ImageFetchError, ImageSource, load_images};

/// Knobs for a single export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub include_answers: bool,
    pub only_active: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_answers: true,
            only_active: false,
        }
    }
}

/// A rendered document ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedPdf {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct ExportService {
    folders: Arc<dyn FolderRepository>,
    categories: Arc<dyn CategoryRepository>,
    questions: Arc<dyn QuestionRepository>,
    images: Arc<dyn ImageSource>,
}

impl ExportService {
    #[must_use]
    pub fn new(
        folders: Arc<dyn FolderRepository>,
        categories: Arc<dyn CategoryRepository>,
        questions: Arc<dyn QuestionRepository>,
        images: Arc<dyn ImageSource>,
    ) -> Self {
        Self {
            folders,
            categories,
            questions,
            images,
        }
    }

    /// Export the active questions of every category in a folder.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::NoQuestions` if the folder has nothing to print,
    /// `ExportError::Storage` on lookup failures, and `ExportError::Render`
    /// if the document cannot be produced.
    pub async fn export_folder(
        &self,
        folder_id: FolderId,
        options: ExportOptions,
    ) -> Result<ExportedPdf, ExportError> {
        let folder = self.folders.get_folder(folder_id).await?;
        let categories = self.categories.list_categories(folder_id).await?;
        let names: HashMap<CategoryId, String> = categories
            .iter()
            .map(|c| (c.id(), c.name().to_owned()))
            .collect();
        let questions = if categories.is_empty() {
            Vec::new()
        } else {
            self.questions
                .list_questions(
                    &QuestionQuery::for_categories(categories.iter().map(|c| c.id()))
                        .active_only(),
                )
                .await?
        };
        let title = format!("{} Questions", folder.name());
        self.export_questions(&title, questions, &names, options)
            .await
    }

    /// Export the active questions of one category.
    ///
    /// # Errors
    ///
    /// Same as [`ExportService::export_folder`].
    pub async fn export_category(
        &self,
        category_id: CategoryId,
        options: ExportOptions,
    ) -> Result<ExportedPdf, ExportError> {
        let category = self.categories.get_category(category_id).await?;
        let questions = self
            .questions
            .list_questions(&QuestionQuery::for_category(category_id).active_only())
            .await?;
        let names = HashMap::from([(category.id(), category.name().to_owned())]);
        let title = format!("{} Questions", category.name());
        self.export_questions(&title, questions, &names, options)
            .await
    }

    /// Export an arbitrary question list, e.g. an admin view that still shows
    /// inactive questions.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::NoQuestions` when nothing is left after filtering.
    pub async fn export_questions(
        &self,
        title: &str,
        questions: Vec<Question>,
        names: &HashMap<CategoryId, String>,
        options: ExportOptions,
    ) -> Result<ExportedPdf, ExportError> {
        let questions = filter_questions(questions, options)?;
        let images = load_images(self.images.as_ref(), &questions).await;
        let mut rng = rand::rng();
        build_pdf(title, questions, names, &images, options, &mut rng)
    }

    /// Same as [`ExportService::export_questions`] with a caller-provided RNG.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::NoQuestions` when nothing is left after filtering.
    pub async fn export_questions_with<R: Rng + Send>(
        &self,
        title: &str,
        questions: Vec<Question>,
        names: &HashMap<CategoryId, String>,
        options: ExportOptions,
        rng: &mut R,
    ) -> Result<ExportedPdf, ExportError> {
        let questions = filter_questions(questions, options)?;
        let images = load_images(self.images.as_ref(), &questions).await;
        build_pdf(title, questions, names, &images, options, rng)
    }
}

fn filter_questions(
    questions: Vec<Question>,
    options: ExportOptions,
) -> Result<Vec<Question>, ExportError> {
    let questions: Vec<Question> = questions
        .into_iter()
        .filter(|q| !options.only_active || q.is_active())
        .collect();
    if questions.is_empty() {
        return Err(ExportError::NoQuestions);
    }
    Ok(questions)
}

fn build_pdf<R: Rng + ?Sized>(
    title: &str,
    questions: Vec<Question>,
    names: &HashMap<CategoryId, String>,
    images: &HashMap<QuestionId, DynamicImage>,
    options: ExportOptions,
    rng: &mut R,
) -> Result<ExportedPdf, ExportError> {
    let count = questions.len();
    let groups = group_by_category(questions, names, rng);
    let bytes = render::render_pdf(title, &groups, images, options.include_answers)?;
    log::info!(
        "exported {count} questions in {} groups as \"{title}\" ({} bytes)",
        groups.len(),
        bytes.len()
    );
    Ok(ExportedPdf {
        file_name: export_file_name(title),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quiz_core::model::{Category, Folder, QuestionDraft, QuestionKind};
    use quiz_core::time::fixed_now;
    use storage::repository::{InMemoryRepository, StorageError};

    struct NoImages;

    #[async_trait]
    impl ImageSource for NoImages {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>, ImageFetchError> {
            Err(ImageFetchError::Status(404))
        }
    }

    fn service(repo: &Arc<InMemoryRepository>) -> ExportService {
        ExportService::new(repo.clone(), repo.clone(), repo.clone(), Arc::new(NoImages))
    }

    async fn seed(repo: &InMemoryRepository, inactive_only: bool) -> (FolderId, CategoryId) {
        let folder = Folder::new(FolderId::random(), "World Capitals", fixed_now()).unwrap();
        repo.insert_folder(&folder).await.unwrap();
        let category =
            Category::new(CategoryId::random(), folder.id(), "Europe", fixed_now()).unwrap();
        repo.insert_category(&category).await.unwrap();
        let question = Question::new(
            QuestionId::random(),
            category.id(),
            QuestionDraft::new(QuestionKind::Text, "Capital of France?", "Paris")
                .validate()
                .unwrap(),
            !inactive_only,
            fixed_now(),
        );
        repo.insert_question(&question).await.unwrap();
        (folder.id(), category.id())
    }

    #[tokio::test]
    async fn folder_export_is_named_after_folder() {
        let repo = Arc::new(InMemoryRepository::new());
        let (folder_id, _) = seed(&repo, false).await;
        let pdf = service(&repo)
            .export_folder(folder_id, ExportOptions::default())
            .await
            .unwrap();
        assert_eq!(pdf.file_name, "world-capitals-questions-questions.pdf");
        assert!(pdf.bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn inactive_only_category_has_nothing_to_export() {
        let repo = Arc::new(InMemoryRepository::new());
        let (folder_id, category_id) = seed(&repo, true).await;
        let svc = service(&repo);
        assert!(matches!(
            svc.export_category(category_id, ExportOptions::default()).await,
            Err(ExportError::NoQuestions)
        ));
        assert!(matches!(
            svc.export_folder(folder_id, ExportOptions::default()).await,
            Err(ExportError::NoQuestions)
        ));
    }

    #[tokio::test]
    async fn only_active_filters_explicit_lists() {
        let repo = Arc::new(InMemoryRepository::new());
        let (_, category_id) = seed(&repo, true).await;
        let questions = repo
            .list_questions(&QuestionQuery::for_category(category_id))
            .await
            .unwrap();
        let svc = service(&repo);
        let names = HashMap::new();

        let all = svc
            .export_questions("Europe", questions.clone(), &names, ExportOptions::default())
            .await
            .unwrap();
        assert!(all.bytes.starts_with(b"%PDF"));

        let options = ExportOptions {
            only_active: true,
            ..ExportOptions::default()
        };
        assert!(matches!(
            svc.export_questions("Europe", questions, &names, options).await,
            Err(ExportError::NoQuestions)
        ));
    }

    #[tokio::test]
    async fn unknown_folder_is_a_storage_error() {
        let repo = Arc::new(InMemoryRepository::new());
        assert!(matches!(
            service(&repo)
                .export_folder(FolderId::random(), ExportOptions::default())
                .await,
            Err(ExportError::Storage(StorageError::NotFound))
        ));
    }
}

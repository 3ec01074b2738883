use std::sync::Arc;

use quiz_core::model::{Folder, FolderId, QuestionDraft, QuestionKind};
use storage::repository::{
    DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD, FolderRepository, Storage, StorageError,
};

use super::test_harness::{ViewKind, services_with_storage, setup_view_harness, test_services};

#[tokio::test(flavor = "current_thread")]
async fn quiz_intro_smoke_renders_start_button() {
    let services = test_services();
    let mut harness = setup_view_harness(ViewKind::Quiz, &services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Start Quiz"), "missing start button in {html}");
    assert!(html.contains("answer 10 questions"), "missing sample size in {html}");
    assert!(html.contains("Admin Login"), "missing login link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_form() {
    let services = test_services();
    let mut harness = setup_view_harness(ViewKind::Login, &services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Admin Login"), "missing title in {html}");
    assert!(html.contains("login-email"), "missing email input in {html}");
    assert!(html.contains("login-password"), "missing password input in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_requires_sign_in() {
    let services = test_services();
    services.folders().create_folder("Hidden").await.unwrap();
    let mut harness = setup_view_harness(ViewKind::Admin, &services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("login-email"), "missing login form in {html}");
    assert!(!html.contains("Hidden"), "folder leaked to signed-out view: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_lists_folders() {
    let services = test_services();
    services
        .auth()
        .sign_in(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD)
        .await
        .unwrap();
    services.folders().create_folder("Geography").await.unwrap();

    let mut harness = setup_view_harness(ViewKind::Admin, &services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Geography"), "missing folder in {html}");
    assert!(html.contains("Created Nov 14, 2023"), "missing created date in {html}");
    assert!(html.contains("Export PDF"), "missing export action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_folder_view_smoke_lists_categories() {
    let services = test_services();
    services
        .auth()
        .sign_in(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD)
        .await
        .unwrap();
    let folder = services.folders().create_folder("Geography").await.unwrap();
    services
        .categories()
        .create_category(folder.id(), "Capitals")
        .await
        .unwrap();

    let mut harness = setup_view_harness(ViewKind::AdminFolder(folder.id()), &services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Geography Categories"), "missing heading in {html}");
    assert!(html.contains("Capitals"), "missing category in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_category_view_smoke_lists_questions() {
    let services = test_services();
    services
        .auth()
        .sign_in(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD)
        .await
        .unwrap();
    let folder = services.folders().create_folder("Geography").await.unwrap();
    let category = services
        .categories()
        .create_category(folder.id(), "Capitals")
        .await
        .unwrap();
    services
        .questions()
        .create_question(
            category.id(),
            QuestionDraft::new(QuestionKind::Text, "Capital of France?", "Paris"),
        )
        .await
        .unwrap();
    services
        .questions()
        .create_question(
            category.id(),
            QuestionDraft::new(QuestionKind::TrueFalse, "Rome is in Spain", "false")
                .with_active(false),
        )
        .await
        .unwrap();

    let mut harness = setup_view_harness(ViewKind::AdminCategory(category.id()), &services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Capitals Questions"), "missing heading in {html}");
    assert!(html.contains("Capital of France?"), "missing question in {html}");
    assert!(html.contains("Answer: Paris"), "missing answer in {html}");
    assert!(html.contains("Text Input"), "missing kind label in {html}");
    assert!(html.contains("Inactive"), "missing inactive badge in {html}");
    assert!(html.contains("Activate"), "missing toggle in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_session_smoke_renders_first_question() {
    let services = test_services();
    let folder = services.folders().create_folder("Science").await.unwrap();
    let category = services
        .categories()
        .create_category(folder.id(), "Physics")
        .await
        .unwrap();
    services
        .questions()
        .create_question(
            category.id(),
            QuestionDraft::new(QuestionKind::TrueFalse, "Light is faster than sound", "true"),
        )
        .await
        .unwrap();

    let mut harness = setup_view_harness(ViewKind::QuizSession(category.id()), &services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 1"), "missing progress in {html}");
    assert!(html.contains("Light is faster than sound"), "missing prompt in {html}");
    assert!(html.contains("True"), "missing choice in {html}");
    assert!(html.contains("False"), "missing choice in {html}");
    assert!(html.contains("Check Answer"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_session_smoke_renders_empty_category() {
    let services = test_services();
    let folder = services.folders().create_folder("Science").await.unwrap();
    let category = services
        .categories()
        .create_category(folder.id(), "Chemistry")
        .await
        .unwrap();

    let mut harness = setup_view_harness(ViewKind::QuizSession(category.id()), &services);
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("No questions available in this category."),
        "missing empty state in {html}"
    );
}

struct FailingFolders;

#[async_trait::async_trait]
impl FolderRepository for FailingFolders {
    async fn list_folders(&self) -> Result<Vec<Folder>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_folder(&self, _id: FolderId) -> Result<Folder, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn insert_folder(&self, _folder: &Folder) -> Result<Folder, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn rename_folder(&self, _id: FolderId, _name: &str) -> Result<Folder, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn delete_folder(&self, _id: FolderId) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn admin_folder_list_smoke_renders_error_state() {
    let storage = Storage {
        folders: Arc::new(FailingFolders),
        ..Storage::in_memory()
    };
    let services = services_with_storage(storage);
    services
        .auth()
        .sign_in(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD)
        .await
        .unwrap();

    let mut harness = setup_view_harness(ViewKind::Admin, &services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Error loading folders"), "missing error in {html}");
}

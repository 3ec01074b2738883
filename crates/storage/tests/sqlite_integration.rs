use chrono::Duration;
use quiz_core::model::{
    Category, CategoryId, Folder, FolderId, Question, QuestionDraft, QuestionId, QuestionKind,
};
use quiz_core::time::fixed_now;
use storage::repository::{
    CategoryRepository, FolderRepository, QuestionQuery, QuestionRepository, SortOrder,
    StorageError,
};
use storage::sqlite::SqliteRepository;

async fn repo(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

fn question(category: CategoryId, draft: QuestionDraft, offset: i64) -> Question {
    let active = draft.is_active;
    Question::new(
        QuestionId::random(),
        category,
        draft.validate().unwrap(),
        active,
        fixed_now() + Duration::seconds(offset),
    )
}

async fn seed_folder(repo: &SqliteRepository, name: &str) -> (Folder, Category) {
    let folder = Folder::new(FolderId::random(), name, fixed_now()).unwrap();
    repo.insert_folder(&folder).await.unwrap();
    let category = Category::new(CategoryId::random(), folder.id(), "General", fixed_now()).unwrap();
    repo.insert_category(&category).await.unwrap();
    (folder, category)
}

#[tokio::test]
async fn sqlite_round_trips_every_question_kind() {
    let repo = repo("memdb_kinds").await;
    let (_, category) = seed_folder(&repo, "Kinds").await;

    let drafts = [
        QuestionDraft::new(QuestionKind::Text, "6 x 7?", "42"),
        QuestionDraft::new(QuestionKind::TrueFalse, "Water is wet", "true"),
        QuestionDraft::new(QuestionKind::MultipleChoice, "Pick b", "b").with_options(["a", "b", "c"]),
        QuestionDraft::new(QuestionKind::Image, "What animal?", "cat")
            .with_image_url("https://example.com/cat.png"),
    ];
    for (i, draft) in drafts.into_iter().enumerate() {
        let q = question(category.id(), draft, i64::try_from(i).unwrap());
        repo.insert_question(&q).await.unwrap();
        let fetched = repo.get_question(q.id()).await.unwrap();
        assert_eq!(fetched, q);
    }

    let listed = repo
        .list_questions(&QuestionQuery::for_category(category.id()).ordered(SortOrder::Descending))
        .await
        .unwrap();
    let kinds: Vec<QuestionKind> = listed.iter().map(Question::kind).collect();
    assert_eq!(
        kinds,
        vec![
            QuestionKind::Image,
            QuestionKind::MultipleChoice,
            QuestionKind::TrueFalse,
            QuestionKind::Text
        ]
    );
}

#[tokio::test]
async fn sqlite_lists_questions_with_relative_image_paths() {
    let repo = repo("memdb_relative_image").await;
    let (_, category) = seed_folder(&repo, "Pictures").await;
    let text = question(
        category.id(),
        QuestionDraft::new(QuestionKind::Text, "2 + 2?", "4"),
        0,
    );
    let image = question(
        category.id(),
        QuestionDraft::new(QuestionKind::Image, "What is this?", "cat")
            .with_image_url("quiz-images/cat.png"),
        1,
    );
    repo.insert_question(&text).await.unwrap();
    repo.insert_question(&image).await.unwrap();

    let listed = repo
        .list_questions(&QuestionQuery::for_category(category.id()))
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);
    assert!(
        listed
            .iter()
            .any(|q| q.image_url() == Some("quiz-images/cat.png"))
    );
}

#[tokio::test]
async fn sqlite_folder_delete_cascades() {
    let repo = repo("memdb_cascade").await;
    let (folder, category) = seed_folder(&repo, "Doomed").await;
    let q = question(
        category.id(),
        QuestionDraft::new(QuestionKind::Text, "Q", "A"),
        0,
    );
    repo.insert_question(&q).await.unwrap();

    repo.delete_folder(folder.id()).await.unwrap();

    assert!(repo.list_folders().await.unwrap().iter().all(|f| f.id() != folder.id()));
    assert!(matches!(repo.get_category(category.id()).await, Err(StorageError::NotFound)));
    assert!(matches!(repo.get_question(q.id()).await, Err(StorageError::NotFound)));
    assert!(matches!(repo.delete_folder(folder.id()).await, Err(StorageError::NotFound)));
}

#[tokio::test]
async fn sqlite_filters_active_questions_across_categories() {
    let repo = repo("memdb_active").await;
    let (folder, first) = seed_folder(&repo, "Mixed").await;
    let second = Category::new(CategoryId::random(), folder.id(), "Second", fixed_now()).unwrap();
    repo.insert_category(&second).await.unwrap();

    let live = question(first.id(), QuestionDraft::new(QuestionKind::Text, "live", "x"), 0);
    let hidden = question(
        first.id(),
        QuestionDraft::new(QuestionKind::Text, "hidden", "x").with_active(false),
        1,
    );
    let other = question(second.id(), QuestionDraft::new(QuestionKind::Text, "other", "x"), 2);
    for q in [&live, &hidden, &other] {
        repo.insert_question(q).await.unwrap();
    }

    let active = repo
        .list_questions(&QuestionQuery::for_categories([first.id(), second.id()]).active_only())
        .await
        .unwrap();
    let prompts: Vec<&str> = active.iter().map(Question::prompt).collect();
    assert_eq!(prompts, ["live", "other"]);

    let toggled = repo.set_question_active(hidden.id(), true).await.unwrap();
    assert!(toggled.is_active());
}

#[tokio::test]
async fn sqlite_rejects_orphans_and_duplicates() {
    let repo = repo("memdb_constraints").await;
    let orphan = Category::new(CategoryId::random(), FolderId::random(), "Orphan", fixed_now()).unwrap();
    assert!(matches!(
        repo.insert_category(&orphan).await,
        Err(StorageError::NotFound)
    ));

    let (folder, _) = seed_folder(&repo, "Dup").await;
    assert!(matches!(
        repo.insert_folder(&folder).await,
        Err(StorageError::Conflict)
    ));
}

#[tokio::test]
async fn sqlite_rename_and_update() {
    let repo = repo("memdb_rename").await;
    let (folder, category) = seed_folder(&repo, "Old").await;

    let renamed = repo.rename_folder(folder.id(), "New").await.unwrap();
    assert_eq!(renamed.name(), "New");
    let renamed = repo.rename_category(category.id(), "Renamed").await.unwrap();
    assert_eq!(renamed.name(), "Renamed");
    assert!(matches!(
        repo.rename_folder(FolderId::random(), "x").await,
        Err(StorageError::NotFound)
    ));

    let q = question(category.id(), QuestionDraft::new(QuestionKind::Text, "Q", "A"), 0);
    repo.insert_question(&q).await.unwrap();
    let content = QuestionDraft::new(QuestionKind::MultipleChoice, "Q2", "y")
        .with_options(["x", "y"])
        .validate()
        .unwrap();
    let updated = repo.update_question(q.id(), &content).await.unwrap();
    assert_eq!(updated.kind(), QuestionKind::MultipleChoice);
    assert_eq!(updated.options(), ["x".to_string(), "y".to_string()]);
    assert_eq!(updated.created_at(), q.created_at());
}

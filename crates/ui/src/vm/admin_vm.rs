use std::collections::HashSet;
use std::hash::Hash;

use quiz_core::model::{Category, CategoryId, Folder, FolderId, Question, QuestionId, QuestionKind};

use crate::vm::time_fmt::format_date;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderRowVm {
    pub id: FolderId,
    pub name: String,
    pub created_label: String,
}

impl From<&Folder> for FolderRowVm {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id(),
            name: folder.name().to_owned(),
            created_label: format!("Created {}", format_date(folder.created_at())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryRowVm {
    pub id: CategoryId,
    pub name: String,
    pub created_label: String,
}

impl From<&Category> for CategoryRowVm {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id(),
            name: category.name().to_owned(),
            created_label: format!("Created {}", format_date(category.created_at())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionRowVm {
    pub id: QuestionId,
    pub prompt: String,
    pub kind_label: &'static str,
    pub answer_label: String,
    pub is_active: bool,
    pub toggle_label: &'static str,
}

impl From<&Question> for QuestionRowVm {
    fn from(question: &Question) -> Self {
        let answer_label = match question.kind() {
            QuestionKind::MultipleChoice => format!(
                "Answer: {} (options: {})",
                question.correct_answer(),
                question.options().join(", ")
            ),
            _ => format!("Answer: {}", question.correct_answer()),
        };
        Self {
            id: question.id(),
            prompt: question.prompt().to_owned(),
            kind_label: question.kind().label(),
            answer_label,
            is_active: question.is_active(),
            toggle_label: if question.is_active() {
                "Deactivate"
            } else {
                "Activate"
            },
        }
    }
}

/// A listed item with a stable id.
pub trait ListRow {
    type Id: Copy + Eq + Hash;

    fn row_id(&self) -> Self::Id;
}

impl ListRow for FolderRowVm {
    type Id = FolderId;

    fn row_id(&self) -> FolderId {
        self.id
    }
}

impl ListRow for CategoryRowVm {
    type Id = CategoryId;

    fn row_id(&self) -> CategoryId {
        self.id
    }
}

impl ListRow for Question {
    type Id = QuestionId;

    fn row_id(&self) -> QuestionId {
        self.id()
    }
}

/// Ids deleted from a loaded list; their rows stay hidden until the next load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemovedRows<K: Eq + Hash> {
    ids: HashSet<K>,
}

impl<K: Eq + Hash> Default for RemovedRows<K> {
    fn default() -> Self {
        Self {
            ids: HashSet::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> RemovedRows<K> {
    /// Hide `id` when the delete went through; a failed delete changes nothing.
    pub fn record<E>(&mut self, id: K, outcome: &Result<(), E>) -> bool {
        outcome.is_ok() && self.ids.insert(id)
    }

    #[must_use]
    pub fn contains(&self, id: K) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn visible<R: ListRow<Id = K>>(&self, rows: &[R]) -> Vec<R>
    where
        R: Clone,
    {
        rows.iter()
            .filter(|row| !self.contains(row.row_id()))
            .cloned()
            .collect()
    }
}

#[must_use]
pub fn map_folder_rows(folders: &[Folder]) -> Vec<FolderRowVm> {
    folders.iter().map(FolderRowVm::from).collect()
}

#[must_use]
pub fn map_category_rows(categories: &[Category]) -> Vec<CategoryRowVm> {
    categories.iter().map(CategoryRowVm::from).collect()
}

#[must_use]
pub fn map_question_rows(questions: &[Question]) -> Vec<QuestionRowVm> {
    questions.iter().map(QuestionRowVm::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionDraft;
    use quiz_core::time::fixed_now;

    fn folder_rows(names: &[&str]) -> Vec<FolderRowVm> {
        let folders: Vec<Folder> = names
            .iter()
            .map(|name| Folder::new(FolderId::random(), *name, fixed_now()).unwrap())
            .collect();
        map_folder_rows(&folders)
    }

    #[test]
    fn deleted_row_is_hidden_immediately() {
        let rows = folder_rows(&["Science", "History", "Art"]);
        let mut removed = RemovedRows::default();

        assert!(removed.record(rows[1].id, &Ok::<(), String>(())));
        let names: Vec<String> = removed.visible(&rows).into_iter().map(|row| row.name).collect();
        assert_eq!(names, vec!["Science", "Art"]);
    }

    #[test]
    fn failed_delete_keeps_the_list_unchanged() {
        let rows = folder_rows(&["Science", "History"]);
        let mut removed = RemovedRows::default();

        assert!(!removed.record(rows[0].id, &Err("offline")));
        assert_eq!(removed.visible(&rows), rows);
    }

    #[test]
    fn question_list_hides_deleted_questions() {
        let content = QuestionDraft::new(QuestionKind::Text, "2 + 2?", "4")
            .validate()
            .unwrap();
        let keep = Question::new(QuestionId::random(), CategoryId::random(), content.clone(), true, fixed_now());
        let gone = Question::new(QuestionId::random(), keep.category_id(), content, true, fixed_now());
        let mut removed = RemovedRows::default();
        removed.record(gone.id(), &Ok::<(), String>(()));

        let visible = removed.visible(&[keep.clone(), gone]);
        assert_eq!(visible, vec![keep]);
    }

    #[test]
    fn question_row_summarises_choices() {
        let content = QuestionDraft::new(QuestionKind::MultipleChoice, "Largest planet?", "Jupiter")
            .with_options(["Mars", "Jupiter"])
            .validate()
            .unwrap();
        let question = Question::new(
            QuestionId::random(),
            CategoryId::random(),
            content,
            false,
            fixed_now(),
        );
        let row = QuestionRowVm::from(&question);
        assert_eq!(row.answer_label, "Answer: Jupiter (options: Mars, Jupiter)");
        assert_eq!(row.toggle_label, "Activate");
        assert_eq!(row.kind_label, QuestionKind::MultipleChoice.label());
    }

    #[test]
    fn folder_row_shows_creation_date() {
        let folder = Folder::new(FolderId::random(), "Science", fixed_now()).unwrap();
        assert_eq!(FolderRowVm::from(&folder).created_label, "Created Nov 14, 2023");
    }
}

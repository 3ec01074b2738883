mod categories;
mod export;
mod folders;
mod question_dialog;
mod questions;
mod rows;

use dioxus::prelude::*;

use quiz_core::model::{CategoryId, FolderId};

use crate::views::AdminGuard;

use categories::CategoryList;
use folders::FolderList;
use questions::QuestionList;

#[component]
pub fn AdminView() -> Element {
    rsx! {
        AdminGuard { FolderList {} }
    }
}

#[component]
pub fn AdminFolderView(folder_id: FolderId) -> Element {
    rsx! {
        AdminGuard { CategoryList { folder_id } }
    }
}

#[component]
pub fn AdminCategoryView(category_id: CategoryId) -> Element {
    rsx! {
        AdminGuard { QuestionList { category_id } }
    }
}

mod picker;
mod results;
mod session;

use dioxus::prelude::*;
use dioxus_router::Link;

use quiz_core::model::{CategoryId, FolderId};

use crate::context::AppContext;
use crate::routes::Route;

pub use picker::{CategoryPicker, FolderPicker};
pub use session::QuizSessionView;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Intro,
    Folders,
    Categories(FolderId),
    Quiz(FolderId, CategoryId),
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let sample_size = ctx.settings().sample_size();
    let mut stage = use_signal(|| Stage::Intro);

    match stage() {
        Stage::Intro => rsx! {
            div { class: "page quiz-intro",
                h2 { "Quiz Time" }
                p {
                    "Test your knowledge with our interactive quiz system. Select a category and answer {sample_size} questions to test your knowledge."
                }
                div { class: "actions",
                    button {
                        id: "quiz-start",
                        class: "btn btn-primary",
                        onclick: move |_| stage.set(Stage::Folders),
                        "Start Quiz"
                    }
                    Link { class: "btn btn-secondary", to: Route::Login {}, "Admin Login" }
                }
            }
        },
        Stage::Folders => rsx! {
            FolderPicker { on_select: move |folder_id: FolderId| stage.set(Stage::Categories(folder_id)) }
        },
        Stage::Categories(folder_id) => rsx! {
            CategoryPicker {
                folder_id,
                on_back: move |()| stage.set(Stage::Folders),
                on_select: move |category_id: CategoryId| stage.set(Stage::Quiz(folder_id, category_id)),
            }
        },
        Stage::Quiz(folder_id, category_id) => rsx! {
            QuizSessionView {
                key: "{category_id}",
                category_id,
                on_leave: move |()| stage.set(Stage::Categories(folder_id)),
            }
        },
    }
}

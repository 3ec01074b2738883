use dioxus::prelude::*;

use quiz_core::model::{CategoryId, FolderId};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{CategoryRowVm, map_category_rows, map_folder_rows};

#[component]
pub fn FolderPicker(on_select: EventHandler<FolderId>) -> Element {
    let ctx = use_context::<AppContext>();
    let resource = use_resource(move || {
        let quiz = ctx.quiz();
        async move {
            let folders = quiz
                .list_folders()
                .await
                .map_err(|_| ViewError::Load("Error loading folders"))?;
            Ok::<_, ViewError>(map_folder_rows(&folders))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h3 { "Select a Folder" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! { p { class: "loading", "Loading..." } },
                ViewState::Error(err) => rsx! { p { class: "error", "{err.message()}" } },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { class: "empty", "No folders available" }
                    }
                    div { class: "picker",
                        for row in rows {
                            PickerButton {
                                key: "{row.id}",
                                label: row.name.clone(),
                                on_pick: move |()| on_select.call(row.id),
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
pub fn CategoryPicker(
    folder_id: FolderId,
    on_back: EventHandler<()>,
    on_select: EventHandler<CategoryId>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let resource = use_resource(move || {
        let quiz = ctx.quiz();
        async move {
            let categories = quiz
                .list_categories(folder_id)
                .await
                .map_err(|_| ViewError::Load("Error loading categories"))?;
            Ok::<_, ViewError>(map_category_rows(&categories))
        }
    });
    let state: ViewState<Vec<CategoryRowVm>> = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            button { class: "btn btn-link", onclick: move |_| on_back.call(()), "← Back to Folders" }
            h3 { "Select a Category" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! { p { class: "loading", "Loading..." } },
                ViewState::Error(err) => rsx! { p { class: "error", "{err.message()}" } },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { class: "empty", "No categories available in this folder" }
                    }
                    div { class: "picker",
                        for row in rows {
                            PickerButton {
                                key: "{row.id}",
                                label: row.name.clone(),
                                on_pick: move |()| on_select.call(row.id),
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn PickerButton(label: String, on_pick: EventHandler<()>) -> Element {
    rsx! {
        button {
            class: "picker-item",
            onclick: move |_| on_pick.call(()),
            "{label}"
        }
    }
}

use std::collections::HashMap;

use dioxus::prelude::*;
use dioxus_router::Link;

use quiz_core::model::{CategoryId, Question, QuestionId};
use services::ExportOptions;

use super::export::finish_export;
use super::question_dialog::QuestionDialog;
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, toast_error, toast_success, use_toasts, view_state_from_resource};
use crate::vm::{DialogMode, QuestionFormVm, QuestionRowVm, RemovedRows, map_question_rows};

#[derive(Clone, Debug, PartialEq)]
struct CategoryHeader {
    name: String,
    folder: Option<Route>,
}

#[derive(Clone, Debug, PartialEq)]
struct OpenDialog {
    key: String,
    mode: DialogMode,
    form: QuestionFormVm,
}

#[component]
pub fn QuestionList(category_id: CategoryId) -> Element {
    let ctx = use_context::<AppContext>();
    let toasts = use_toasts();
    let mut busy = use_signal(|| false);
    let mut dialog = use_signal(|| None::<OpenDialog>);
    let mut confirm_delete = use_signal(|| None::<QuestionId>);
    let mut removed = use_signal(RemovedRows::<QuestionId>::default);

    let header = use_resource({
        let ctx = ctx.clone();
        move || {
            let categories = ctx.categories();
            async move {
                let category = categories.get_category(category_id).await.map_err(|err| {
                    log::warn!("loading category {category_id} failed: {err}");
                    ViewError::Load("Error loading categories")
                })?;
                Ok::<_, ViewError>(CategoryHeader {
                    name: category.name().to_owned(),
                    folder: Some(Route::AdminFolder {
                        folder_id: category.folder_id(),
                    }),
                })
            }
        }
    });
    let header = match view_state_from_resource(&header) {
        ViewState::Ready(header) => header,
        _ => CategoryHeader {
            name: String::new(),
            folder: None,
        },
    };

    // Full question records are kept for editing; rows are derived for display.
    let mut resource = use_resource({
        let ctx = ctx.clone();
        move || {
            let questions = ctx.questions();
            async move {
                questions.list_for_admin(category_id).await.map_err(|err| {
                    log::warn!("listing questions of {category_id} failed: {err}");
                    ViewError::Load("Error loading questions")
                })
            }
        }
    });
    let state = view_state_from_resource(&resource);
    let loaded: Vec<Question> = match &state {
        ViewState::Ready(questions) => removed.read().visible(questions),
        _ => Vec::new(),
    };

    let save = use_callback({
        let ctx = ctx.clone();
        move |(mode, form): (DialogMode, QuestionFormVm)| {
            let questions = ctx.questions();
            busy.set(true);
            spawn(async move {
                let (result, done, failed) = match mode {
                    DialogMode::Create => (
                        questions.create_question(category_id, form.to_draft()).await,
                        "Question created successfully",
                        "Error creating question",
                    ),
                    DialogMode::Edit(id) => (
                        questions.update_question(id, form.to_draft()).await,
                        "Question updated successfully",
                        "Error updating question",
                    ),
                };
                match result {
                    Ok(_) => {
                        toast_success(toasts, done);
                        dialog.set(None);
                        resource.restart();
                    }
                    Err(err) => {
                        log::warn!("saving question failed: {err}");
                        toast_error(toasts, failed);
                    }
                }
                busy.set(false);
            });
        }
    });

    let duplicate = use_callback({
        let ctx = ctx.clone();
        move |id: QuestionId| {
            let questions = ctx.questions();
            busy.set(true);
            spawn(async move {
                match questions.duplicate_question(id).await {
                    Ok(_) => {
                        toast_success(toasts, "Question duplicated successfully");
                        resource.restart();
                    }
                    Err(err) => {
                        log::warn!("duplicate question {id} failed: {err}");
                        toast_error(toasts, "Error duplicating question. Please try again.");
                    }
                }
                busy.set(false);
            });
        }
    });

    let toggle = use_callback({
        let ctx = ctx.clone();
        move |id: QuestionId| {
            let questions = ctx.questions();
            busy.set(true);
            spawn(async move {
                match questions.toggle_active(id).await {
                    Ok(question) => {
                        let message = if question.is_active() {
                            "Question activated successfully"
                        } else {
                            "Question deactivated successfully"
                        };
                        toast_success(toasts, message);
                        resource.restart();
                    }
                    Err(err) => {
                        log::warn!("toggle question {id} failed: {err}");
                        toast_error(toasts, "Error updating question status");
                    }
                }
                busy.set(false);
            });
        }
    });

    let delete = use_callback({
        let ctx = ctx.clone();
        move |id: QuestionId| {
            let questions = ctx.questions();
            busy.set(true);
            spawn(async move {
                let outcome = questions.delete_question(id).await;
                match &outcome {
                    Ok(()) => toast_success(toasts, "Question deleted successfully"),
                    Err(err) => {
                        log::warn!("delete question {id} failed: {err}");
                        toast_error(toasts, "Error deleting question. Please try again.");
                    }
                }
                removed.write().record(id, &outcome);
                busy.set(false);
            });
        }
    });

    let export = use_callback({
        let title = format!("{} Questions", header.name);
        let name = header.name.clone();
        let questions = loaded.clone();
        move |()| {
            let exporter = ctx.export();
            let title = title.clone();
            let names = HashMap::from([(category_id, name.clone())]);
            let questions = questions.clone();
            busy.set(true);
            spawn(async move {
                let result = exporter
                    .export_questions(&title, questions, &names, ExportOptions::default())
                    .await;
                finish_export(toasts, result);
                busy.set(false);
            });
        }
    });

    let editing = loaded.clone();
    let open_edit = move |id: QuestionId| {
        if let Some(question) = editing.iter().find(|q| q.id() == id) {
            dialog.set(Some(OpenDialog {
                key: id.to_string(),
                mode: DialogMode::Edit(id),
                form: QuestionFormVm::from_question(question),
            }));
        }
    };
    let open_edit = use_callback(open_edit);

    let rows = map_question_rows(&loaded);

    rsx! {
        div { class: "page admin",
            if let Some(folder) = header.folder.clone() {
                Link { class: "back-link", to: folder, "← Back to Categories" }
            }
            h2 { "{header.name} Questions" }
            div { class: "actions",
                button {
                    id: "question-add",
                    class: "btn btn-primary",
                    disabled: busy(),
                    onclick: move |_| {
                        dialog.set(Some(OpenDialog {
                            key: "create".to_owned(),
                            mode: DialogMode::Create,
                            form: QuestionFormVm::default(),
                        }));
                    },
                    "Add Question"
                }
                button {
                    class: "btn btn-secondary",
                    disabled: busy() || rows.is_empty(),
                    onclick: move |_| export.call(()),
                    "Export PDF"
                }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! { p { class: "loading", "Loading..." } },
                ViewState::Error(err) => rsx! { p { class: "error", "{err.message()}" } },
                ViewState::Ready(_) => rsx! {
                    if rows.is_empty() {
                        p { class: "empty", "No questions in this category yet." }
                    }
                    ul { class: "rows",
                        for row in rows.clone() {
                            QuestionRow {
                                key: "{row.id}",
                                row: row.clone(),
                                busy: busy(),
                                confirming: confirm_delete() == Some(row.id),
                                on_edit: move |()| open_edit.call(row.id),
                                on_duplicate: move |()| duplicate.call(row.id),
                                on_toggle: move |()| toggle.call(row.id),
                                on_delete: move |()| confirm_delete.set(Some(row.id)),
                                on_confirm: move |confirmed: bool| {
                                    confirm_delete.set(None);
                                    if confirmed {
                                        delete.call(row.id);
                                    }
                                },
                            }
                        }
                    }
                },
            }
            if let Some(open) = dialog() {
                QuestionDialog {
                    key: "{open.key}",
                    mode: open.mode,
                    initial: open.form,
                    busy: busy(),
                    on_save: move |form: QuestionFormVm| save.call((open.mode, form)),
                    on_cancel: move |()| dialog.set(None),
                }
            }
        }
    }
}

#[component]
fn QuestionRow(
    row: QuestionRowVm,
    busy: bool,
    confirming: bool,
    on_edit: EventHandler<()>,
    on_duplicate: EventHandler<()>,
    on_toggle: EventHandler<()>,
    on_delete: EventHandler<()>,
    on_confirm: EventHandler<bool>,
) -> Element {
    let class = if row.is_active { "row" } else { "row row-inactive" };

    rsx! {
        li { class,
            div { class: "row-main",
                span { class: "row-title", "{row.prompt}" }
                span { class: "badge", "{row.kind_label}" }
                if !row.is_active {
                    span { class: "badge badge-muted", "Inactive" }
                }
                span { class: "row-meta", "{row.answer_label}" }
            }
            if confirming {
                div { class: "row-actions",
                    span { class: "row-warning", "Delete this question?" }
                    button {
                        class: "btn btn-danger",
                        disabled: busy,
                        onclick: move |_| on_confirm.call(true),
                        "Delete"
                    }
                    button { class: "btn btn-secondary", onclick: move |_| on_confirm.call(false), "Cancel" }
                }
            } else {
                div { class: "row-actions",
                    button { class: "btn btn-secondary", disabled: busy, onclick: move |_| on_edit.call(()), "Edit" }
                    button { class: "btn btn-secondary", disabled: busy, onclick: move |_| on_duplicate.call(()), "Duplicate" }
                    button { class: "btn btn-secondary", disabled: busy, onclick: move |_| on_toggle.call(()), "{row.toggle_label}" }
                    button { class: "btn btn-danger", disabled: busy, onclick: move |_| on_delete.call(()), "Delete" }
                }
            }
        }
    }
}

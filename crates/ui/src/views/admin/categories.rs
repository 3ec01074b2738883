use dioxus::prelude::*;
use dioxus_router::Link;

use quiz_core::model::{CategoryId, FolderId};
use services::ExportOptions;

use super::export::finish_export;
use super::rows::{CreateNameForm, NameRow};
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, toast_error, toast_success, use_toasts, view_state_from_resource};
use crate::vm::{RemovedRows, map_category_rows};

#[component]
pub fn CategoryList(folder_id: FolderId) -> Element {
    let ctx = use_context::<AppContext>();
    let toasts = use_toasts();
    let mut busy = use_signal(|| false);
    let mut removed = use_signal(RemovedRows::<CategoryId>::default);

    let folder = use_resource({
        let ctx = ctx.clone();
        move || {
            let folders = ctx.folders();
            async move {
                folders
                    .get_folder(folder_id)
                    .await
                    .map(|folder| folder.name().to_owned())
                    .map_err(|err| {
                        log::warn!("loading folder {folder_id} failed: {err}");
                        ViewError::Load("Error loading folder information")
                    })
            }
        }
    });
    let folder_name = match view_state_from_resource(&folder) {
        ViewState::Ready(name) => name,
        _ => String::new(),
    };

    let mut resource = use_resource({
        let ctx = ctx.clone();
        move || {
            let categories = ctx.categories();
            async move {
                let list = categories.list_categories(folder_id).await.map_err(|err| {
                    log::warn!("listing categories of {folder_id} failed: {err}");
                    ViewError::Load("Error loading categories")
                })?;
                Ok::<_, ViewError>(map_category_rows(&list))
            }
        }
    });
    let state = view_state_from_resource(&resource).map(|rows| removed.read().visible(&rows));

    let create = use_callback({
        let ctx = ctx.clone();
        move |name: String| {
            let categories = ctx.categories();
            busy.set(true);
            spawn(async move {
                match categories.create_category(folder_id, &name).await {
                    Ok(_) => {
                        toast_success(toasts, "Category created successfully");
                        resource.restart();
                    }
                    Err(err) => {
                        log::warn!("create category failed: {err}");
                        toast_error(toasts, "Error creating category");
                    }
                }
                busy.set(false);
            });
        }
    });

    let rename = use_callback({
        let ctx = ctx.clone();
        move |(id, name): (CategoryId, String)| {
            let categories = ctx.categories();
            busy.set(true);
            spawn(async move {
                match categories.rename_category(id, &name).await {
                    Ok(_) => {
                        toast_success(toasts, "Category updated successfully");
                        resource.restart();
                    }
                    Err(err) => {
                        log::warn!("rename category {id} failed: {err}");
                        toast_error(toasts, "Error updating category");
                    }
                }
                busy.set(false);
            });
        }
    });

    let delete = use_callback({
        let ctx = ctx.clone();
        move |id: CategoryId| {
            let categories = ctx.categories();
            busy.set(true);
            spawn(async move {
                let outcome = categories.delete_category(id).await;
                match &outcome {
                    Ok(()) => toast_success(toasts, "Category deleted successfully"),
                    Err(err) => {
                        log::warn!("delete category {id} failed: {err}");
                        toast_error(toasts, "Error deleting category");
                    }
                }
                removed.write().record(id, &outcome);
                busy.set(false);
            });
        }
    });

    let export = use_callback(move |id: CategoryId| {
        let exporter = ctx.export();
        busy.set(true);
        spawn(async move {
            let result = exporter.export_category(id, ExportOptions::default()).await;
            finish_export(toasts, result);
            busy.set(false);
        });
    });

    rsx! {
        div { class: "page admin",
            Link { class: "back-link", to: Route::Admin {}, "← Back to Folders" }
            h2 { "{folder_name} Categories" }
            CreateNameForm {
                placeholder: "New category name",
                busy: busy(),
                on_create: create,
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! { p { class: "loading", "Loading..." } },
                ViewState::Error(err) => rsx! { p { class: "error", "{err.message()}" } },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { class: "empty", "No categories in this folder yet." }
                    }
                    ul { class: "rows",
                        for row in rows {
                            NameRow {
                                key: "{row.id}",
                                name: row.name.clone(),
                                created_label: row.created_label.clone(),
                                to: Route::AdminCategory { category_id: row.id },
                                busy: busy(),
                                on_rename: move |name: String| rename.call((row.id, name)),
                                on_delete: move |()| delete.call(row.id),
                                on_export: move |()| export.call(row.id),
                            }
                        }
                    }
                },
            }
        }
    }
}

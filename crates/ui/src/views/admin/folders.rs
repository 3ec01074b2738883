use dioxus::prelude::*;

use quiz_core::model::FolderId;
use services::ExportOptions;

use super::export::finish_export;
use super::rows::{CreateNameForm, NameRow};
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, toast_error, toast_success, use_toasts, view_state_from_resource};
use crate::vm::{RemovedRows, map_folder_rows};

#[component]
pub fn FolderList() -> Element {
    let ctx = use_context::<AppContext>();
    let toasts = use_toasts();
    let mut busy = use_signal(|| false);
    let mut removed = use_signal(RemovedRows::<FolderId>::default);

    let mut resource = use_resource({
        let ctx = ctx.clone();
        move || {
            let folders = ctx.folders();
            async move {
                let list = folders.list_folders().await.map_err(|err| {
                    log::warn!("listing folders failed: {err}");
                    ViewError::Load("Error loading folders")
                })?;
                Ok::<_, ViewError>(map_folder_rows(&list))
            }
        }
    });
    let state = view_state_from_resource(&resource).map(|rows| removed.read().visible(&rows));

    let create = use_callback({
        let ctx = ctx.clone();
        move |name: String| {
            let folders = ctx.folders();
            busy.set(true);
            spawn(async move {
                match folders.create_folder(&name).await {
                    Ok(_) => {
                        toast_success(toasts, "Folder created successfully");
                        resource.restart();
                    }
                    Err(err) => {
                        log::warn!("create folder failed: {err}");
                        toast_error(toasts, "Error creating folder");
                    }
                }
                busy.set(false);
            });
        }
    });

    let rename = use_callback({
        let ctx = ctx.clone();
        move |(id, name): (FolderId, String)| {
            let folders = ctx.folders();
            busy.set(true);
            spawn(async move {
                match folders.rename_folder(id, &name).await {
                    Ok(_) => {
                        toast_success(toasts, "Folder name updated successfully");
                        resource.restart();
                    }
                    Err(err) => {
                        log::warn!("rename folder {id} failed: {err}");
                        toast_error(toasts, "Error updating folder name");
                    }
                }
                busy.set(false);
            });
        }
    });

    let delete = use_callback({
        let ctx = ctx.clone();
        move |id: FolderId| {
            let folders = ctx.folders();
            busy.set(true);
            spawn(async move {
                let outcome = folders.delete_folder(id).await;
                match &outcome {
                    Ok(()) => toast_success(toasts, "Folder deleted successfully"),
                    Err(err) => {
                        log::warn!("delete folder {id} failed: {err}");
                        toast_error(toasts, "Error deleting folder");
                    }
                }
                removed.write().record(id, &outcome);
                busy.set(false);
            });
        }
    });

    let export = use_callback(move |id: FolderId| {
        let exporter = ctx.export();
        busy.set(true);
        spawn(async move {
            let result = exporter.export_folder(id, ExportOptions::default()).await;
            finish_export(toasts, result);
            busy.set(false);
        });
    });

    rsx! {
        div { class: "page admin",
            h2 { "Folders" }
            CreateNameForm {
                placeholder: "New folder name",
                busy: busy(),
                on_create: create,
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! { p { class: "loading", "Loading..." } },
                ViewState::Error(err) => rsx! { p { class: "error", "{err.message()}" } },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { class: "empty", "No folders yet. Create one above." }
                    }
                    ul { class: "rows",
                        for row in rows {
                            NameRow {
                                key: "{row.id}",
                                name: row.name.clone(),
                                created_label: row.created_label.clone(),
                                to: Route::AdminFolder { folder_id: row.id },
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

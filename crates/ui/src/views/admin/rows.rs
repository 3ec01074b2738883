use dioxus::prelude::*;
use dioxus_router::Link;

use crate::routes::Route;

/// Name input with a create button, cleared after submit.
#[component]
pub(super) fn CreateNameForm(placeholder: &'static str, busy: bool, on_create: EventHandler<String>) -> Element {
    let mut name = use_signal(String::new);
    let blank = name.read().trim().is_empty();

    rsx! {
        div { class: "create-row",
            input {
                class: "row-input",
                r#type: "text",
                placeholder,
                value: "{name}",
                oninput: move |evt| name.set(evt.value()),
                onkeydown: move |evt| {
                    if matches!(evt.data.key(), Key::Enter) && !name.read().trim().is_empty() {
                        evt.prevent_default();
                        on_create.call(name.read().trim().to_owned());
                        name.set(String::new());
                    }
                },
            }
            button {
                class: "btn btn-primary",
                disabled: busy || blank,
                onclick: move |_| {
                    on_create.call(name.read().trim().to_owned());
                    name.set(String::new());
                },
                "Create"
            }
        }
    }
}

/// Folder or category row: link, inline rename, delete confirmation and export.
#[component]
pub(super) fn NameRow(
    name: String,
    created_label: String,
    to: Route,
    busy: bool,
    on_rename: EventHandler<String>,
    on_delete: EventHandler<()>,
    on_export: EventHandler<()>,
) -> Element {
    let mut draft = use_signal(|| None::<String>);
    let mut confirming = use_signal(|| false);

    if let Some(value) = draft() {
        let blank = value.trim().is_empty();
        return rsx! {
            li { class: "row row-editing",
                input {
                    class: "row-input",
                    r#type: "text",
                    value: "{value}",
                    oninput: move |evt| draft.set(Some(evt.value())),
                    onkeydown: move |evt| match evt.data.key() {
                        Key::Enter => {
                            evt.prevent_default();
                            let value = draft().unwrap_or_default();
                            if !value.trim().is_empty() {
                                on_rename.call(value.trim().to_owned());
                                draft.set(None);
                            }
                        }
                        Key::Escape => {
                            evt.prevent_default();
                            draft.set(None);
                        }
                        _ => {}
                    },
                }
                button {
                    class: "btn btn-primary",
                    disabled: busy || blank,
                    onclick: move |_| {
                        let value = draft().unwrap_or_default();
                        on_rename.call(value.trim().to_owned());
                        draft.set(None);
                    },
                    "Save"
                }
                button { class: "btn btn-secondary", onclick: move |_| draft.set(None), "Cancel" }
            }
        };
    }

    let rename_from = name.clone();
    rsx! {
        li { class: "row",
            div { class: "row-main",
                Link { class: "row-title", to, "{name}" }
                span { class: "row-meta", "{created_label}" }
            }
            if confirming() {
                div { class: "row-actions",
                    span { class: "row-warning", "Delete \"{name}\" and everything in it?" }
                    button {
                        class: "btn btn-danger",
                        disabled: busy,
                        onclick: move |_| {
                            confirming.set(false);
                            on_delete.call(());
                        },
                        "Delete"
                    }
                    button { class: "btn btn-secondary", onclick: move |_| confirming.set(false), "Cancel" }
                }
            } else {
                div { class: "row-actions",
                    button {
                        class: "btn btn-secondary",
                        disabled: busy,
                        onclick: move |_| on_export.call(()),
                        "Export PDF"
                    }
                    button {
                        class: "btn btn-secondary",
                        disabled: busy,
                        onclick: move |_| draft.set(Some(rename_from.clone())),
                        "Rename"
                    }
                    button {
                        class: "btn btn-danger",
                        disabled: busy,
                        onclick: move |_| confirming.set(true),
                        "Delete"
                    }
                }
            }
        }
    }
}

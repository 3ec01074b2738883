use dioxus::prelude::*;

use quiz_core::model::{MIN_CHOICE_OPTIONS, QuestionKind};

use crate::vm::{DialogMode, QuestionFormVm};

/// Modal form for adding or editing a question. Validation errors stay inline
/// and nothing is saved until the form is valid.
#[component]
pub fn QuestionDialog(
    mode: DialogMode,
    initial: QuestionFormVm,
    busy: bool,
    on_save: EventHandler<QuestionFormVm>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut form = use_signal(|| initial.clone());
    let mut error = use_signal(|| None::<String>);

    let on_submit = move |_: MouseEvent| match form.read().validate() {
        Ok(_) => {
            error.set(None);
            on_save.call(form.read().clone());
        }
        Err(err) => error.set(Some(err.to_string())),
    };

    let current = form.read().clone();
    let option_count = current.options.len();
    let option_rows: Vec<(usize, usize, String)> = current
        .options
        .iter()
        .cloned()
        .enumerate()
        .map(|(index, value)| (index, index + 1, value))
        .collect();

    rsx! {
        div { class: "dialog-backdrop",
            div { class: "dialog", role: "dialog",
                h3 { "{mode.title()}" }
                label { r#for: "question-kind", "Question Type" }
                select {
                    id: "question-kind",
                    value: "{current.kind.as_str()}",
                    onchange: move |evt| {
                        if let Ok(kind) = evt.value().parse::<QuestionKind>() {
                            form.write().kind = kind;
                        }
                    },
                    for kind in QuestionKind::ALL {
                        option {
                            key: "{kind.as_str()}",
                            value: "{kind.as_str()}",
                            selected: kind == current.kind,
                            "{kind.label()}"
                        }
                    }
                }
                label { r#for: "question-prompt", "Question" }
                textarea {
                    id: "question-prompt",
                    value: "{current.prompt}",
                    oninput: move |evt| form.write().prompt = evt.value(),
                }
                if current.shows_options() {
                    div { class: "options",
                        label { "Options" }
                        for (index, number, value) in option_rows {
                            div { key: "{index}", class: "option-row",
                                input {
                                    r#type: "text",
                                    placeholder: "Option {number}",
                                    value: "{value}",
                                    oninput: move |evt| form.write().set_option(index, evt.value()),
                                }
                                button {
                                    class: "btn btn-secondary",
                                    r#type: "button",
                                    disabled: option_count <= MIN_CHOICE_OPTIONS,
                                    onclick: move |_| form.write().remove_option(index),
                                    "Remove"
                                }
                            }
                        }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| form.write().add_option(),
                            "Add Option"
                        }
                    }
                }
                if current.shows_image_url() {
                    label { r#for: "question-image", "Image URL" }
                    input {
                        id: "question-image",
                        r#type: "url",
                        value: "{current.image_url}",
                        oninput: move |evt| form.write().image_url = evt.value(),
                    }
                }
                label { r#for: "question-answer", "Correct Answer" }
                input {
                    id: "question-answer",
                    r#type: "text",
                    placeholder: "{current.answer_hint()}",
                    value: "{current.correct_answer}",
                    oninput: move |evt| form.write().correct_answer = evt.value(),
                }
                label { class: "checkbox",
                    input {
                        r#type: "checkbox",
                        checked: current.is_active,
                        onchange: move |evt| form.write().is_active = evt.checked(),
                    }
                    "Active"
                }
                if let Some(message) = error() {
                    p { class: "form-error", "{message}" }
                }
                div { class: "actions",
                    button {
                        class: "btn btn-secondary",
                        disabled: busy,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        id: "question-save",
                        class: "btn btn-primary",
                        disabled: busy,
                        onclick: on_submit,
                        "{mode.submit_label()}"
                    }
                }
            }
        }
    }
}

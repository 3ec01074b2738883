use std::time::Duration;

use dioxus::prelude::*;

use crate::vm::{ToastKind, Toasts};

const TOAST_LIFETIME: Duration = Duration::from_secs(3);

/// Shared toast list provided by the root component.
#[must_use]
pub fn use_toasts() -> Signal<Toasts> {
    use_context::<Signal<Toasts>>()
}

pub fn toast_success(toasts: Signal<Toasts>, message: impl Into<String>) {
    show(toasts, ToastKind::Success, message.into());
}

pub fn toast_error(toasts: Signal<Toasts>, message: impl Into<String>) {
    show(toasts, ToastKind::Error, message.into());
}

fn show(mut toasts: Signal<Toasts>, kind: ToastKind, message: String) {
    let id = match kind {
        ToastKind::Success => toasts.write().success(message),
        ToastKind::Error => toasts.write().error(message),
    };
    spawn(async move {
        tokio::time::sleep(TOAST_LIFETIME).await;
        toasts.write().dismiss(id);
    });
}

#[component]
pub fn ToastHost() -> Element {
    let mut toasts = use_toasts();
    let items = toasts.read().items().to_vec();

    rsx! {
        div { class: "toasts",
            for toast in items {
                div {
                    key: "{toast.id}",
                    class: match toast.kind {
                        ToastKind::Success => "toast toast-success",
                        ToastKind::Error => "toast toast-error",
                    },
                    onclick: move |_| toasts.write().dismiss(toast.id),
                    "{toast.message}"
                }
            }
        }
    }
}

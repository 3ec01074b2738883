use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::use_navigator;

use services::AuthError;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{toast_error, toast_success, use_toasts};

/// Email of the signed-in admin, mirrored from `AuthService` for rendering.
#[derive(Clone, Copy)]
pub struct AuthState {
    pub email: Signal<Option<String>>,
}

#[must_use]
pub fn use_auth_state() -> AuthState {
    use_context::<AuthState>()
}

const SIGNED_OUT_POLL: Duration = Duration::from_secs(30);
const MIN_REFRESH_WAIT: Duration = Duration::from_secs(1);

/// Sleep before the next background refresh check.
fn refresh_wait(due_in: Option<Duration>) -> Duration {
    due_in.map_or(SIGNED_OUT_POLL, |due| due.max(MIN_REFRESH_WAIT))
}

/// Refreshes the admin token in the background one margin before it expires
/// and mirrors the outcome into `state`.
pub fn use_session_refresh(state: AuthState) {
    let ctx = use_context::<AppContext>();
    use_future(move || {
        let auth = ctx.auth();
        async move {
            loop {
                tokio::time::sleep(refresh_wait(auth.refresh_due_in())).await;
                let email = match auth.ensure_fresh().await {
                    Ok(session) => session.map(|session| session.email),
                    Err(err) => {
                        log::warn!("background session refresh failed: {err}");
                        continue;
                    }
                };
                let mut signed_in = state.email;
                if *signed_in.peek() != email {
                    signed_in.set(email);
                }
            }
        }
    });
}

/// Renders `children` for a signed-in admin and the login form otherwise.
/// Refreshes a stale token on mount.
#[component]
pub fn AdminGuard(children: Element) -> Element {
    let ctx = use_context::<AppContext>();
    let auth_state = use_auth_state();

    let fresh = use_resource(move || {
        let auth = ctx.auth();
        async move { auth.ensure_fresh().await.ok().flatten().map(|s| s.email) }
    });

    use_effect(move || {
        let checked = fresh.read().clone();
        if let Some(email) = checked {
            let mut state = auth_state.email;
            if *state.peek() != email {
                state.set(email);
            }
        }
    });

    if auth_state.email.read().is_none() {
        return rsx! { LoginForm {} };
    }
    children
}

/// The `/login` page; goes to the admin console once signed in.
#[component]
pub fn LoginView() -> Element {
    let navigator = use_navigator();
    rsx! {
        LoginForm {
            on_signed_in: move |()| {
                navigator.push(Route::Admin {});
            },
        }
    }
}

#[component]
pub fn LoginForm(on_signed_in: Option<EventHandler<()>>) -> Element {
    let ctx = use_context::<AppContext>();
    let toasts = use_toasts();
    let auth_state = use_auth_state();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let auth = ctx.auth();
        let email_value = email.read().trim().to_owned();
        let password_value = password.read().clone();
        let mut signed_in = auth_state.email;
        busy.set(true);
        spawn(async move {
            match auth.sign_in(&email_value, &password_value).await {
                Ok(session) => {
                    error.set(None);
                    signed_in.set(Some(session.email));
                    toast_success(toasts, "Signed in");
                    if let Some(handler) = on_signed_in {
                        handler.call(());
                    }
                }
                Err(AuthError::InvalidCredentials) => {
                    error.set(Some("Invalid email or password".to_owned()));
                }
                Err(err) => {
                    log::warn!("sign-in failed: {err}");
                    toast_error(toasts, "Error signing in. Please try again.");
                }
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "page page-narrow",
            h2 { "Admin Login" }
            form { class: "form", onsubmit: on_submit,
                label { r#for: "login-email", "Email" }
                input {
                    id: "login-email",
                    r#type: "email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                label { r#for: "login-password", "Password" }
                input {
                    id: "login-password",
                    r#type: "password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                if let Some(message) = error() {
                    p { class: "form-error", "{message}" }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Signing in..." } else { "Sign in" }
                }
            }
        }
    }
}

use dioxus::prelude::*;
use dioxus_router::Router;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{AuthState, use_session_refresh};
use crate::vm::Toasts;

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let email = use_signal(|| ctx.auth().current().map(|session| session.email));
    use_context_provider(|| AuthState { email });
    use_session_refresh(AuthState { email });
    let toasts = use_signal(Toasts::default);
    use_context_provider(|| toasts);

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Quiz" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}

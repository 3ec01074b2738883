use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};

use quiz_core::model::{CategoryId, FolderId};

use crate::context::AppContext;
use crate::views::{
    AdminCategoryView, AdminFolderView, AdminView, LoginView, QuizView, ToastHost, toast_error,
    toast_success, use_auth_state, use_toasts,
};

#[derive(Clone, Routable, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", QuizView)] Quiz {},
        #[route("/login", LoginView)] Login {},
        #[route("/admin", AdminView)] Admin {},
        #[route("/admin/folders/:folder_id", AdminFolderView)] AdminFolder { folder_id: FolderId },
        #[route("/admin/categories/:category_id", AdminCategoryView)] AdminCategory { category_id: CategoryId },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            TopBar {}
            main { class: "content",
                Outlet::<Route> {}
            }
            ToastHost {}
        }
    }
}

#[component]
fn TopBar() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let toasts = use_toasts();
    let auth_state = use_auth_state();
    let signed_in = auth_state.email.read().clone();

    let on_logout = move |_| {
        let auth = ctx.auth();
        let mut email = auth_state.email;
        spawn(async move {
            match auth.sign_out().await {
                Ok(()) => toast_success(toasts, "Signed out"),
                Err(err) => {
                    log::warn!("sign-out failed: {err}");
                    toast_error(toasts, "Error signing out");
                }
            }
            email.set(None);
            navigator.push(Route::Quiz {});
        });
    };

    rsx! {
        nav { class: "topbar",
            h1 { "Quiz" }
            ul {
                li { Link { to: Route::Quiz {}, "Home" } }
                li { Link { to: Route::Admin {}, "Admin" } }
            }
            if let Some(email) = signed_in {
                div { class: "topbar-user",
                    span { "{email}" }
                    button { class: "btn btn-secondary", onclick: on_logout, "Logout" }
                }
            }
        }
    }
}

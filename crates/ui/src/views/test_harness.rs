use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{CategoryId, FolderId, QuizSettings};
use quiz_core::time::fixed_clock;
use services::{
    AppServices, AuthService, CategoryService, ExportService, FolderService, QuestionService,
    QuizService,
};
use storage::auth::MemorySessionStore;
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::quiz::QuizSessionView;
use crate::views::{
    AdminCategoryView, AdminFolderView, AdminView, AuthState, LoginView, QuizView, ToastHost,
};
use crate::vm::Toasts;

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn folders(&self) -> Arc<FolderService> {
        self.services.folders()
    }

    fn categories(&self) -> Arc<CategoryService> {
        self.services.categories()
    }

    fn questions(&self) -> Arc<QuestionService> {
        self.services.questions()
    }

    fn quiz(&self) -> Arc<QuizService> {
        self.services.quiz()
    }

    fn export(&self) -> Arc<ExportService> {
        self.services.export()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Quiz,
    Login,
    Admin,
    AdminFolder(FolderId),
    AdminCategory(CategoryId),
    QuizSession(CategoryId),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let ctx = use_context_provider(|| build_app_context(&app));
    let email = use_signal(|| ctx.auth().current().map(|session| session.email));
    use_context_provider(|| AuthState { email });
    let toasts = use_signal(Toasts::default);
    use_context_provider(|| toasts);
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    let body = match view {
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Admin => rsx! { AdminView {} },
        ViewKind::AdminFolder(folder_id) => rsx! { AdminFolderView { folder_id } },
        ViewKind::AdminCategory(category_id) => rsx! { AdminCategoryView { category_id } },
        ViewKind::QuizSession(category_id) => rsx! {
            QuizSessionView { category_id, on_leave: move |()| {} }
        },
    };
    rsx! {
        {body}
        ToastHost {}
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let pending resources settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Services over fresh in-memory storage with a fixed clock.
pub fn test_services() -> AppServices {
    AppServices::in_memory(fixed_clock(), QuizSettings::default())
}

/// Services over caller-provided storage, for failure injection.
pub fn services_with_storage(storage: Storage) -> AppServices {
    AppServices::from_storage(
        storage,
        fixed_clock(),
        QuizSettings::default(),
        Arc::new(MemorySessionStore::default()),
    )
}

pub fn setup_view_harness(view: ViewKind, services: &AppServices) -> ViewHarness {
    let app = Arc::new(TestApp {
        services: services.clone(),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom }
}

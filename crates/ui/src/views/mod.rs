mod admin;
mod auth;
mod quiz;
mod state;
mod toast;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use admin::{AdminCategoryView, AdminFolderView, AdminView};
pub use auth::{AdminGuard, AuthState, LoginForm, LoginView, use_auth_state, use_session_refresh};
pub use quiz::QuizView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use toast::{ToastHost, toast_error, toast_success, use_toasts};

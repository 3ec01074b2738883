#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth_service;
pub mod category_service;
pub mod error;
pub mod export;
pub mod folder_service;
pub mod question_service;
pub mod quiz;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use auth_service::AuthService;
pub use category_service::CategoryService;
pub use error::{
    AppServicesError, AuthError, CategoryServiceError, ExportError, FolderServiceError,
    QuestionServiceError, QuizError, SessionError,
};
pub use export::{ExportOptions, ExportService, ExportedPdf};
pub use folder_service::FolderService;
pub use question_service::QuestionService;
pub use quiz::{
    AdvanceTicket, Countdown, CountdownTick, Feedback, QuizService, QuizSession, SessionState,
    Unavailable,
};

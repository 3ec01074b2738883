pub mod auth;
pub mod remote;
pub mod repository;
pub mod sqlite;

pub use auth::{
    AccessToken, AuthGateway, AuthGatewayError, AuthSession, FileSessionStore,
    MemorySessionStore, SessionStore, SessionStoreError, StaticAuth,
};
pub use repository::{
    CategoryRepository, FolderRepository, InMemoryRepository, QuestionQuery, QuestionRepository,
    SortOrder, Storage, StorageError,
};

mod category;
mod folder;
mod ids;
mod question;
mod settings;

pub use ids::{CategoryId, FolderId, ParseIdError, QuestionId};

pub use category::{Category, CategoryError, normalize_category_name};
pub use folder::{Folder, FolderError, normalize_folder_name};
pub use question::{
    MIN_CHOICE_OPTIONS, Question, QuestionContent, QuestionDraft, QuestionKind,
    QuestionKindError, QuestionValidationError,
};
pub use settings::{MAX_AUTO_ADVANCE_SECS, MAX_SAMPLE_SIZE, QuizSettings, SettingsError};

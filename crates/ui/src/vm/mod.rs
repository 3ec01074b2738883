mod admin_vm;
mod notifications;
mod question_form_vm;
mod quiz_vm;
mod time_fmt;

pub use admin_vm::{
    CategoryRowVm, FolderRowVm, ListRow, QuestionRowVm, RemovedRows, map_category_rows,
    map_folder_rows, map_question_rows,
};
pub use notifications::{Toast, ToastKind, Toasts};
pub use question_form_vm::{DEFAULT_OPTION_SLOTS, DialogMode, QuestionFormVm};
pub use quiz_vm::{
    AnswerInputVm, ChoiceState, ChoiceVm, FeedbackVm, QuizCardVm, QuizResultVm, map_quiz_card,
    map_quiz_result, unavailable_message,
};
pub use time_fmt::format_date;

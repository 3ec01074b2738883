use quiz_core::model::{
    MIN_CHOICE_OPTIONS, Question, QuestionContent, QuestionDraft, QuestionId, QuestionKind,
    QuestionValidationError,
};

/// Empty option inputs shown for a new multiple-choice question.
pub const DEFAULT_OPTION_SLOTS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogMode {
    Create,
    Edit(QuestionId),
}

impl DialogMode {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            DialogMode::Create => "Add Question",
            DialogMode::Edit(_) => "Edit Question",
        }
    }

    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self {
            DialogMode::Create => "Create",
            DialogMode::Edit(_) => "Save Changes",
        }
    }
}

/// Raw form fields of the question dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionFormVm {
    pub kind: QuestionKind,
    pub prompt: String,
    pub correct_answer: String,
    pub options: Vec<String>,
    pub image_url: String,
    pub is_active: bool,
}

impl Default for QuestionFormVm {
    fn default() -> Self {
        Self {
            kind: QuestionKind::Text,
            prompt: String::new(),
            correct_answer: String::new(),
            options: vec![String::new(); DEFAULT_OPTION_SLOTS],
            image_url: String::new(),
            is_active: true,
        }
    }
}

impl QuestionFormVm {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        let mut options = question.options().to_vec();
        if options.len() < DEFAULT_OPTION_SLOTS {
            options.resize(DEFAULT_OPTION_SLOTS, String::new());
        }
        Self {
            kind: question.kind(),
            prompt: question.prompt().to_owned(),
            correct_answer: question.correct_answer().to_owned(),
            options,
            image_url: question.image_url().unwrap_or_default().to_owned(),
            is_active: question.is_active(),
        }
    }

    pub fn set_option(&mut self, index: usize, value: String) {
        if let Some(slot) = self.options.get_mut(index) {
            *slot = value;
        }
    }

    pub fn add_option(&mut self) {
        self.options.push(String::new());
    }

    /// Never drops below the minimum number of option inputs.
    pub fn remove_option(&mut self, index: usize) {
        if self.options.len() > MIN_CHOICE_OPTIONS && index < self.options.len() {
            self.options.remove(index);
        }
    }

    #[must_use]
    pub fn shows_options(&self) -> bool {
        self.kind == QuestionKind::MultipleChoice
    }

    #[must_use]
    pub fn shows_image_url(&self) -> bool {
        self.kind == QuestionKind::Image
    }

    #[must_use]
    pub fn answer_hint(&self) -> &'static str {
        match self.kind {
            QuestionKind::TrueFalse => "Enter true or false",
            QuestionKind::MultipleChoice => "Must match one of the options",
            QuestionKind::Text | QuestionKind::Image => "Enter the correct answer",
        }
    }

    #[must_use]
    pub fn to_draft(&self) -> QuestionDraft {
        QuestionDraft::new(self.kind, self.prompt.clone(), self.correct_answer.clone())
            .with_options(self.options.clone())
            .with_image_url(self.image_url.clone())
            .with_active(self.is_active)
    }

    /// # Errors
    ///
    /// Returns the first `QuestionValidationError` of the current fields.
    pub fn validate(&self) -> Result<QuestionContent, QuestionValidationError> {
        self.to_draft().validate()
    }
}

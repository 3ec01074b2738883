use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::{CategoryId, QuestionId};

/// Minimum number of non-blank options a multiple-choice question needs.
pub const MIN_CHOICE_OPTIONS: usize = 2;

const TRUE_FALSE_CHOICES: [&str; 2] = ["True", "False"];

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionValidationError {
    #[error("Question text is required")]
    EmptyPrompt,

    #[error("Correct answer is required")]
    EmptyAnswer,

    #[error("Multiple choice questions require at least 2 options")]
    TooFewOptions,

    #[error("Correct answer must be one of the options")]
    AnswerNotInOptions,

    #[error("True/False questions must have \"true\" or \"false\" as answer")]
    InvalidTrueFalseAnswer,

    #[error("Image URL is required for image-based questions")]
    MissingImageUrl,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionKindError {
    #[error("unknown question type: {0}")]
    Unknown(String),
}

//
// ─── QUESTION KIND ─────────────────────────────────────────────────────────────
//

/// The four supported question formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "truefalse")]
    TrueFalse,
    #[serde(rename = "multichoice")]
    MultipleChoice,
    #[serde(rename = "image")]
    Image,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 4] = [
        QuestionKind::Text,
        QuestionKind::TrueFalse,
        QuestionKind::MultipleChoice,
        QuestionKind::Image,
    ];

    /// Storage/wire tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKind::Text => "text",
            QuestionKind::TrueFalse => "truefalse",
            QuestionKind::MultipleChoice => "multichoice",
            QuestionKind::Image => "image",
        }
    }

    /// Human readable label for pickers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::Text => "Text Input",
            QuestionKind::TrueFalse => "True/False",
            QuestionKind::MultipleChoice => "Multiple Choice",
            QuestionKind::Image => "Image-based",
        }
    }

    /// True when the answer is typed rather than picked.
    #[must_use]
    pub fn is_free_text(self) -> bool {
        matches!(self, QuestionKind::Text | QuestionKind::Image)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionKind {
    type Err = QuestionKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(QuestionKind::Text),
            "truefalse" => Ok(QuestionKind::TrueFalse),
            "multichoice" => Ok(QuestionKind::MultipleChoice),
            "image" => Ok(QuestionKind::Image),
            other => Err(QuestionKindError::Unknown(other.to_owned())),
        }
    }
}

//
// ─── DRAFT (unvalidated input) ─────────────────────────────────────────────────
//

/// Raw question definition as captured by the editor form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub kind: QuestionKind,
    pub prompt: String,
    pub correct_answer: String,
    pub options: Vec<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
}

impl QuestionDraft {
    pub fn new(
        kind: QuestionKind,
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            prompt: prompt.into(),
            correct_answer: correct_answer.into(),
            options: Vec::new(),
            image_url: None,
            is_active: true,
        }
    }

    #[must_use]
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Prefills a draft from an existing question, e.g. for the edit dialog.
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            kind: question.kind(),
            prompt: question.prompt().to_owned(),
            correct_answer: question.correct_answer().to_owned(),
            options: question.options().to_vec(),
            image_url: question.image_url().map(str::to_owned),
            is_active: question.is_active(),
        }
    }

    /// Trim, check the per-kind invariants and drop fields that do not apply to the kind.
    ///
    /// # Errors
    ///
    /// Returns the first `QuestionValidationError` encountered.
    pub fn validate(self) -> Result<QuestionContent, QuestionValidationError> {
        let prompt = self.prompt.trim();
        if prompt.is_empty() {
            return Err(QuestionValidationError::EmptyPrompt);
        }
        let correct_answer = self.correct_answer.trim();
        if correct_answer.is_empty() {
            return Err(QuestionValidationError::EmptyAnswer);
        }

        let mut options = None;
        let mut image_url = None;

        match self.kind {
            QuestionKind::Text => {}
            QuestionKind::TrueFalse => {
                let normalized = correct_answer.to_lowercase();
                if normalized != "true" && normalized != "false" {
                    return Err(QuestionValidationError::InvalidTrueFalseAnswer);
                }
            }
            QuestionKind::MultipleChoice => {
                let kept: Vec<String> = self
                    .options
                    .iter()
                    .map(|opt| opt.trim())
                    .filter(|opt| !opt.is_empty())
                    .map(str::to_owned)
                    .collect();
                if kept.len() < MIN_CHOICE_OPTIONS {
                    return Err(QuestionValidationError::TooFewOptions);
                }
                if !kept.iter().any(|opt| opt == correct_answer) {
                    return Err(QuestionValidationError::AnswerNotInOptions);
                }
                options = Some(kept);
            }
            QuestionKind::Image => {
                let raw = self
                    .image_url
                    .as_deref()
                    .map(str::trim)
                    .filter(|url| !url.is_empty())
                    .ok_or(QuestionValidationError::MissingImageUrl)?;
                image_url = Some(raw.to_owned());
            }
        }

        Ok(QuestionContent {
            kind: self.kind,
            prompt: prompt.to_owned(),
            correct_answer: correct_answer.to_owned(),
            options,
            image_url,
        })
    }
}

//
// ─── VALIDATED CONTENT ─────────────────────────────────────────────────────────
//

/// The editable part of a question after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionContent {
    kind: QuestionKind,
    prompt: String,
    correct_answer: String,
    options: Option<Vec<String>>,
    image_url: Option<String>,
}

impl QuestionContent {
    /// Rehydrate content from persisted columns, re-checking the invariants.
    ///
    /// # Errors
    ///
    /// Returns `QuestionValidationError` if the stored row is inconsistent.
    pub fn from_persisted(
        kind: QuestionKind,
        prompt: String,
        correct_answer: String,
        options: Option<Vec<String>>,
        image_url: Option<String>,
    ) -> Result<Self, QuestionValidationError> {
        QuestionDraft {
            kind,
            prompt,
            correct_answer,
            options: options.unwrap_or_default(),
            image_url,
            is_active: true,
        }
        .validate()
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Options for multiple-choice questions; empty otherwise.
    #[must_use]
    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    category_id: CategoryId,
    content: QuestionContent,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl Question {
    #[must_use]
    pub fn new(
        id: QuestionId,
        category_id: CategoryId,
        content: QuestionContent,
        is_active: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            category_id,
            content,
            is_active,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    #[must_use]
    pub fn content(&self) -> &QuestionContent {
        &self.content
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.content.kind()
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        self.content.prompt()
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        self.content.correct_answer()
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        self.content.options()
    }

    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.content.image_url()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Choices offered to the quiz taker: the options, `True`/`False`, or none for typed answers.
    #[must_use]
    pub fn answer_choices(&self) -> Vec<&str> {
        match self.kind() {
            QuestionKind::MultipleChoice => self.options().iter().map(String::as_str).collect(),
            QuestionKind::TrueFalse => TRUE_FALSE_CHOICES.to_vec(),
            QuestionKind::Text | QuestionKind::Image => Vec::new(),
        }
    }

    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: QuestionContent) -> Self {
        self.content = content;
        self
    }

    /// Content for a copy of this question; the prompt gets a `(Copy)` suffix.
    #[must_use]
    pub fn duplicate_content(&self) -> QuestionContent {
        QuestionContent {
            prompt: format!("{} (Copy)", self.prompt()),
            ..self.content.clone()
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn question(content: QuestionContent) -> Question {
        Question::new(
            QuestionId::random(),
            CategoryId::random(),
            content,
            true,
            fixed_now(),
        )
    }

    #[test]
    fn kind_round_trips_through_tag() {
        for kind in QuestionKind::ALL {
            assert_eq!(kind.as_str().parse::<QuestionKind>().unwrap(), kind);
        }
        assert!(matches!(
            "essay".parse::<QuestionKind>(),
            Err(QuestionKindError::Unknown(_))
        ));
    }

    #[test]
    fn blank_prompt_and_answer_are_rejected() {
        let err = QuestionDraft::new(QuestionKind::Text, "  ", "42")
            .validate()
            .unwrap_err();
        assert_eq!(err, QuestionValidationError::EmptyPrompt);

        let err = QuestionDraft::new(QuestionKind::Text, "Answer?", " ")
            .validate()
            .unwrap_err();
        assert_eq!(err, QuestionValidationError::EmptyAnswer);
    }

    #[test]
    fn multiple_choice_requires_two_options() {
        let err = QuestionDraft::new(QuestionKind::MultipleChoice, "Pick", "a")
            .with_options(["a", " ", "", ""])
            .validate()
            .unwrap_err();
        assert_eq!(err, QuestionValidationError::TooFewOptions);
    }

    #[test]
    fn multiple_choice_answer_must_be_an_option() {
        let err = QuestionDraft::new(QuestionKind::MultipleChoice, "Capital of France?", "Lyon")
            .with_options(["Paris", "Berlin", "", ""])
            .validate()
            .unwrap_err();
        assert_eq!(err, QuestionValidationError::AnswerNotInOptions);
    }

    #[test]
    fn multiple_choice_drops_blank_options() {
        let content =
            QuestionDraft::new(QuestionKind::MultipleChoice, "Capital of France?", " Paris ")
                .with_options(["Paris", " Berlin ", "", "  "])
                .validate()
                .unwrap();
        assert_eq!(content.options(), ["Paris".to_string(), "Berlin".to_string()]);
        assert_eq!(content.correct_answer(), "Paris");
    }

    #[test]
    fn true_false_answer_is_case_insensitive() {
        assert!(
            QuestionDraft::new(QuestionKind::TrueFalse, "Sky is blue", "TRUE")
                .validate()
                .is_ok()
        );
        let err = QuestionDraft::new(QuestionKind::TrueFalse, "Sky is blue", "yes")
            .validate()
            .unwrap_err();
        assert_eq!(err, QuestionValidationError::InvalidTrueFalseAnswer);
    }

    #[test]
    fn image_question_needs_url() {
        let err = QuestionDraft::new(QuestionKind::Image, "What is this?", "cat")
            .validate()
            .unwrap_err();
        assert_eq!(err, QuestionValidationError::MissingImageUrl);

        let err = QuestionDraft::new(QuestionKind::Image, "What is this?", "cat")
            .with_image_url("   ")
            .validate()
            .unwrap_err();
        assert_eq!(err, QuestionValidationError::MissingImageUrl);

        let content = QuestionDraft::new(QuestionKind::Image, "What is this?", "cat")
            .with_image_url(" https://example.com/cat.png ")
            .validate()
            .unwrap();
        assert_eq!(content.image_url(), Some("https://example.com/cat.png"));
    }

    #[test]
    fn image_question_accepts_relative_reference() {
        let content = QuestionDraft::new(QuestionKind::Image, "What is this?", "cat")
            .with_image_url("images/cat.png")
            .validate()
            .unwrap();
        assert_eq!(content.image_url(), Some("images/cat.png"));

        let stored = QuestionContent::from_persisted(
            QuestionKind::Image,
            "What is this?".to_owned(),
            "cat".to_owned(),
            None,
            Some("quiz-images/cat.png".to_owned()),
        )
        .unwrap();
        assert_eq!(stored.image_url(), Some("quiz-images/cat.png"));
    }

    #[test]
    fn fields_not_matching_kind_are_dropped() {
        let content = QuestionDraft::new(QuestionKind::Text, "2*21?", "42")
            .with_options(["a", "b"])
            .with_image_url("https://example.com/x.png")
            .validate()
            .unwrap();
        assert!(content.options().is_empty());
        assert_eq!(content.image_url(), None);
    }

    #[test]
    fn answer_choices_follow_kind() {
        let tf = question(
            QuestionDraft::new(QuestionKind::TrueFalse, "Q", "true")
                .validate()
                .unwrap(),
        );
        assert_eq!(tf.answer_choices(), vec!["True", "False"]);

        let text = question(
            QuestionDraft::new(QuestionKind::Text, "Q", "x")
                .validate()
                .unwrap(),
        );
        assert!(text.answer_choices().is_empty());
    }

    #[test]
    fn duplicate_content_appends_copy_suffix() {
        let q = question(
            QuestionDraft::new(QuestionKind::Text, "Largest planet?", "Jupiter")
                .validate()
                .unwrap(),
        );
        let copy = q.duplicate_content();
        assert_eq!(copy.prompt(), "Largest planet? (Copy)");
        assert_eq!(copy.correct_answer(), "Jupiter");
    }

    #[test]
    fn draft_from_question_round_trips_content() {
        let q = question(
            QuestionDraft::new(QuestionKind::MultipleChoice, "Pick", "b")
                .with_options(["a", "b"])
                .validate()
                .unwrap(),
        );
        let draft = QuestionDraft::from_question(&q.clone().with_active(false));
        assert!(!draft.is_active);
        assert_eq!(draft.validate().unwrap(), *q.content());
    }
}

use quiz_core::grading::{Score, is_correct};
use quiz_core::model::QuestionId;
use services::{QuizSession, SessionState, Unavailable};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChoiceState {
    Idle,
    Selected,
    Correct,
    Wrong,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceVm {
    pub label: String,
    pub checked: bool,
    pub state: ChoiceState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerInputVm {
    Choices(Vec<ChoiceVm>),
    FreeText,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub correct: bool,
    pub message: String,
}

/// Everything the question card renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizCardVm {
    pub question_id: QuestionId,
    pub progress_label: String,
    pub progress_percent: u32,
    pub prompt: String,
    pub image_url: Option<String>,
    pub input: AnswerInputVm,
    pub answer: String,
    pub submitted: bool,
    pub can_submit: bool,
    pub feedback: Option<FeedbackVm>,
    pub next_label: &'static str,
}

fn choice_state(label: &str, answer: &str, expected: &str, submitted: bool) -> ChoiceState {
    let chosen = answer == label;
    if !submitted {
        return if chosen {
            ChoiceState::Selected
        } else {
            ChoiceState::Idle
        };
    }
    if is_correct(label, expected) {
        ChoiceState::Correct
    } else if chosen {
        ChoiceState::Wrong
    } else {
        ChoiceState::Idle
    }
}

/// Card for the current question, `None` when the session is not in progress.
#[must_use]
pub fn map_quiz_card(session: &QuizSession) -> Option<QuizCardVm> {
    let question = session.current_question()?;
    let id = question.id();
    let answer = session.answer_for(id).unwrap_or_default().to_owned();
    let submitted = session.is_submitted(id);

    let choices = question.answer_choices();
    let input = if choices.is_empty() {
        AnswerInputVm::FreeText
    } else {
        AnswerInputVm::Choices(
            choices
                .into_iter()
                .map(|label| ChoiceVm {
                    label: label.to_owned(),
                    checked: answer == label,
                    state: choice_state(label, &answer, question.correct_answer(), submitted),
                })
                .collect(),
        )
    };

    let feedback = session.feedback_for(id).map(|feedback| FeedbackVm {
        correct: feedback.correct,
        message: if feedback.correct {
            "Correct!".to_owned()
        } else {
            format!("Incorrect. The correct answer is: {}", feedback.expected)
        },
    });

    Some(QuizCardVm {
        question_id: id,
        progress_label: format!("Question {} of {}", session.position(), session.total()),
        progress_percent: session.progress_percent(),
        prompt: question.prompt().to_owned(),
        image_url: question.image_url().map(str::to_owned),
        input,
        can_submit: !submitted && !answer.trim().is_empty(),
        answer,
        submitted,
        feedback,
        next_label: if session.is_last() { "Finish" } else { "Next" },
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResultVm {
    pub correct: usize,
    pub total: usize,
    pub percentage: u32,
    pub headline: &'static str,
    pub celebrate: bool,
}

#[must_use]
pub fn map_quiz_result(score: Score) -> QuizResultVm {
    QuizResultVm {
        correct: score.correct,
        total: score.total,
        percentage: score.percentage(),
        headline: score.band().headline(),
        celebrate: score.celebrate(),
    }
}

/// Message for a session that never started; `None` for other states.
#[must_use]
pub fn unavailable_message(session: &QuizSession) -> Option<&'static str> {
    match session.state() {
        SessionState::Unavailable(Unavailable::Empty) => {
            Some("No questions available in this category.")
        }
        SessionState::Unavailable(Unavailable::FetchFailed(_)) => Some("Error loading questions"),
        _ => None,
    }
}

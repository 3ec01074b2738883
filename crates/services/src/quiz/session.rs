use std::collections::{HashMap, HashSet};

use quiz_core::grading::{Score, is_correct};
use quiz_core::model::{Question, QuestionId};

use crate::error::SessionError;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Why a quiz could not start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    /// The category has no active questions.
    Empty,
    FetchFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    InProgress { index: usize },
    Complete,
    Unavailable(Unavailable),
}

/// Handle for a pending auto-advance. Only honoured while the session is
/// still on the question it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceTicket {
    index: usize,
    generation: u64,
}

/// Result shown after an answer is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub correct: bool,
    pub expected: String,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz over a fixed, already sampled list of questions.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    answers: HashMap<QuestionId, String>,
    submitted: HashSet<QuestionId>,
    state: SessionState,
    generation: u64,
}

impl QuizSession {
    #[must_use]
    pub fn loading() -> Self {
        Self::with_state(Vec::new(), SessionState::Loading)
    }

    /// Start over the given questions; an empty list yields `Unavailable(Empty)`.
    #[must_use]
    pub fn start(questions: Vec<Question>) -> Self {
        if questions.is_empty() {
            return Self::with_state(questions, SessionState::Unavailable(Unavailable::Empty));
        }
        Self::with_state(questions, SessionState::InProgress { index: 0 })
    }

    #[must_use]
    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self::with_state(
            Vec::new(),
            SessionState::Unavailable(Unavailable::FetchFailed(message.into())),
        )
    }

    fn with_state(questions: Vec<Question>, state: SessionState) -> Self {
        Self {
            questions,
            answers: HashMap::new(),
            submitted: HashSet::new(),
            state,
            generation: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            SessionState::InProgress { index } => Some(index),
            _ => None,
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current_index().and_then(|i| self.questions.get(i))
    }

    /// 1-based position of the current question; the total once complete.
    #[must_use]
    pub fn position(&self) -> usize {
        match self.state {
            SessionState::InProgress { index } => index + 1,
            SessionState::Complete => self.total(),
            _ => 0,
        }
    }

    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        if self.total() == 0 {
            return 0;
        }
        u32::try_from(self.position() * 100 / self.total()).unwrap_or(100)
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        matches!(self.state, SessionState::InProgress { index } if index + 1 == self.total())
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }

    #[must_use]
    pub fn answer_for(&self, id: QuestionId) -> Option<&str> {
        self.answers.get(&id).map(String::as_str)
    }

    #[must_use]
    pub fn is_submitted(&self, id: QuestionId) -> bool {
        self.submitted.contains(&id)
    }

    /// Correctness of a submitted answer; `None` until submitted.
    #[must_use]
    pub fn feedback_for(&self, id: QuestionId) -> Option<Feedback> {
        if !self.is_submitted(id) {
            return None;
        }
        let question = self.find(id)?;
        let answer = self.answer_for(id).unwrap_or_default();
        Some(Feedback {
            correct: is_correct(answer, question.correct_answer()),
            expected: question.correct_answer().to_owned(),
        })
    }

    fn find(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    fn ensure_in_progress(&self, id: QuestionId) -> Result<(), SessionError> {
        if self.find(id).is_none() {
            return Err(SessionError::UnknownQuestion(id));
        }
        if self.current_index().is_none() {
            return Err(SessionError::NotInProgress);
        }
        Ok(())
    }

    /// Store or overwrite the answer text for a question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownQuestion` if the id is not part of this quiz,
    /// `SessionError::NotInProgress` once the quiz is over.
    pub fn record_answer(
        &mut self,
        id: QuestionId,
        text: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.ensure_in_progress(id)?;
        self.answers.insert(id, text.into());
        Ok(())
    }

    /// Mark a question submitted. Does not advance; the returned ticket
    /// drives the auto-advance countdown.
    ///
    /// # Errors
    ///
    /// Same conditions as `record_answer`.
    pub fn submit(&mut self, id: QuestionId) -> Result<AdvanceTicket, SessionError> {
        self.ensure_in_progress(id)?;
        self.submitted.insert(id);
        Ok(AdvanceTicket {
            index: self.current_index().unwrap_or_default(),
            generation: self.generation,
        })
    }

    /// Move to the next question, or complete after the last one.
    pub fn advance(&mut self) -> &SessionState {
        if let SessionState::InProgress { index } = self.state {
            self.generation += 1;
            self.state = if index + 1 < self.total() {
                SessionState::InProgress { index: index + 1 }
            } else {
                SessionState::Complete
            };
        }
        &self.state
    }

    /// Advance on behalf of a countdown. Stale tickets are ignored.
    pub fn advance_with(&mut self, ticket: AdvanceTicket) -> bool {
        let current = matches!(self.state, SessionState::InProgress { index } if index == ticket.index);
        if !current || ticket.generation != self.generation {
            return false;
        }
        self.advance();
        true
    }

    /// Correct answers over every sampled question; unanswered ones count as wrong.
    #[must_use]
    pub fn score(&self) -> Score {
        let correct = self
            .questions
            .iter()
            .filter(|q| {
                self.answer_for(q.id())
                    .is_some_and(|answer| is_correct(answer, q.correct_answer()))
            })
            .count();
        Score::new(correct, self.total())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use quiz_core::model::{CategoryId, QuestionDraft, QuestionKind};
    use quiz_core::time::fixed_now;

    pub(crate) fn question(draft: QuestionDraft) -> Question {
        Question::new(
            QuestionId::random(),
            CategoryId::random(),
            draft.validate().unwrap(),
            true,
            fixed_now(),
        )
    }

    pub(crate) fn session_of(n: usize) -> QuizSession {
        QuizSession::start(
            (0..n)
                .map(|i| question(QuestionDraft::new(QuestionKind::Text, format!("Q{i}"), "yes")))
                .collect(),
        )
    }

    #[test]
    fn empty_start_is_unavailable() {
        let session = QuizSession::start(Vec::new());
        assert_eq!(session.state(), &SessionState::Unavailable(Unavailable::Empty));
        assert!(session.current_question().is_none());
        assert_eq!(session.score(), Score::new(0, 0));
    }

    #[test]
    fn advancing_n_times_completes_on_the_last_call() {
        let mut session = session_of(4);
        for call in 1..=4 {
            let state = session.advance().clone();
            if call < 4 {
                assert_eq!(state, SessionState::InProgress { index: call });
            } else {
                assert_eq!(state, SessionState::Complete);
            }
        }
        assert_eq!(session.advance(), &SessionState::Complete);
    }

    #[test]
    fn all_correct_scores_full_marks() {
        let mut session = session_of(3);
        let ids: Vec<QuestionId> = session.questions().iter().map(Question::id).collect();
        for id in &ids {
            session.record_answer(*id, "YES").unwrap();
        }
        assert_eq!(session.score(), Score::new(3, 3));
    }

    #[test]
    fn no_answers_scores_zero() {
        let session = session_of(5);
        assert_eq!(session.score(), Score::new(0, 5));
    }

    #[test]
    fn true_matches_capitalised_answer() {
        let q = question(QuestionDraft::new(QuestionKind::TrueFalse, "Fire is hot", "true"));
        let id = q.id();
        let mut session = QuizSession::start(vec![q]);
        session.record_answer(id, "True").unwrap();
        session.submit(id).unwrap();
        assert_eq!(
            session.feedback_for(id),
            Some(Feedback {
                correct: true,
                expected: "true".into()
            })
        );
        assert_eq!(session.score(), Score::new(1, 1));
    }

    #[test]
    fn unknown_question_is_rejected() {
        let mut session = session_of(1);
        let stranger = QuestionId::random();
        assert_eq!(
            session.record_answer(stranger, "x"),
            Err(SessionError::UnknownQuestion(stranger))
        );
        assert_eq!(
            session.submit(stranger),
            Err(SessionError::UnknownQuestion(stranger))
        );
    }

    #[test]
    fn answers_overwrite_and_submit_does_not_advance() {
        let mut session = session_of(2);
        let id = session.current_question().unwrap().id();
        session.record_answer(id, "no").unwrap();
        session.record_answer(id, "yes").unwrap();
        assert_eq!(session.answer_for(id), Some("yes"));
        assert!(session.feedback_for(id).is_none());

        session.submit(id).unwrap();
        assert!(session.is_submitted(id));
        assert_eq!(session.position(), 1);
        assert_eq!(session.progress_percent(), 50);
    }

    #[test]
    fn stale_ticket_after_manual_advance_is_ignored() {
        let mut session = session_of(3);
        let first = session.current_question().unwrap().id();
        let ticket = session.submit(first).unwrap();

        session.advance();
        assert!(!session.advance_with(ticket));
        assert_eq!(session.position(), 2);

        let second = session.current_question().unwrap().id();
        let ticket = session.submit(second).unwrap();
        assert!(session.advance_with(ticket));
        assert_eq!(session.position(), 3);
        assert!(!session.advance_with(ticket));
    }

    #[test]
    fn last_question_flags_and_completion() {
        let mut session = session_of(1);
        assert!(session.is_last());
        let id = session.current_question().unwrap().id();
        let ticket = session.submit(id).unwrap();
        assert!(session.advance_with(ticket));
        assert!(session.is_complete());
        assert_eq!(session.record_answer(id, "x"), Err(SessionError::NotInProgress));
        assert_eq!(session.progress_percent(), 100);
    }

    #[test]
    fn fetch_failure_is_terminal() {
        let mut session = QuizSession::fetch_failed("offline");
        assert_eq!(
            session.state(),
            &SessionState::Unavailable(Unavailable::FetchFailed("offline".into()))
        );
        assert_eq!(
            session.advance(),
            &SessionState::Unavailable(Unavailable::FetchFailed("offline".into()))
        );
    }
}

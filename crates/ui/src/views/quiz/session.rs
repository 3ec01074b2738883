use std::time::Duration;

use dioxus::prelude::*;

use quiz_core::model::CategoryId;
use services::{AdvanceTicket, Countdown, CountdownTick, QuizSession, SessionState, Unavailable};

use super::results::QuizResults;
use crate::context::AppContext;
use crate::views::{toast_error, use_toasts};
use crate::vm::{
    AnswerInputVm, ChoiceState, ChoiceVm, QuizCardVm, map_quiz_card, map_quiz_result, unavailable_message,
};

/// Pending auto-advance shown under the feedback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingAdvance {
    ticket: AdvanceTicket,
    remaining: u32,
}

#[component]
pub fn QuizSessionView(category_id: CategoryId, on_leave: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let auto_advance_secs = ctx.settings().auto_advance_secs();
    let toasts = use_toasts();
    let mut session = use_signal(QuizSession::loading);
    let mut pending = use_signal(|| None::<PendingAdvance>);

    let mut loader = use_resource(move || {
        let quiz = ctx.quiz();
        async move {
            pending.set(None);
            session.set(QuizSession::loading());
            let started = quiz.start_session(category_id).await;
            if let SessionState::Unavailable(Unavailable::FetchFailed(message)) = started.state() {
                log::warn!("quiz for category {category_id} failed to load: {message}");
                toast_error(toasts, "Error loading questions");
            }
            session.set(started);
        }
    });

    let on_answer = move |text: String| {
        let Some(id) = session.read().current_question().map(|q| q.id()) else {
            return;
        };
        if session.read().is_submitted(id) {
            return;
        }
        if let Err(err) = session.write().record_answer(id, text) {
            log::debug!("answer ignored: {err}");
        }
    };

    let on_submit = move |()| {
        let Some(id) = session.read().current_question().map(|q| q.id()) else {
            return;
        };
        let has_answer = session
            .read()
            .answer_for(id)
            .is_some_and(|answer| !answer.trim().is_empty());
        if !has_answer || session.read().is_submitted(id) {
            return;
        }
        let ticket = match session.write().submit(id) {
            Ok(ticket) => ticket,
            Err(err) => {
                log::debug!("submit ignored: {err}");
                return;
            }
        };

        let mut countdown = Countdown::new(ticket, auto_advance_secs);
        pending.set(Some(PendingAdvance {
            ticket,
            remaining: countdown.remaining(),
        }));
        spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(1)).await;
                let current = *pending.peek();
                if current.map(|p| p.ticket) != Some(ticket) {
                    break;
                }
                match countdown.tick() {
                    CountdownTick::Remaining(remaining) => {
                        pending.set(Some(PendingAdvance { ticket, remaining }));
                    }
                    CountdownTick::Fire(ticket) => {
                        pending.set(None);
                        session.write().advance_with(ticket);
                        break;
                    }
                    CountdownTick::Idle => break,
                }
            }
        });
    };

    let on_next = move |()| {
        pending.set(None);
        session.write().advance();
    };

    let on_restart = move |()| loader.restart();

    let guard = session.read();
    let body = match guard.state() {
        SessionState::Loading => rsx! { p { class: "loading", "Loading questions..." } },
        SessionState::Unavailable(_) => {
            let message = unavailable_message(&guard).unwrap_or_default();
            rsx! {
                div { class: "empty",
                    p { "{message}" }
                    button { class: "btn btn-secondary", onclick: move |_| on_leave.call(()), "Back to Categories" }
                }
            }
        }
        SessionState::Complete => rsx! {
            QuizResults {
                result: map_quiz_result(guard.score()),
                on_restart,
                on_leave,
            }
        },
        SessionState::InProgress { .. } => match map_quiz_card(&guard) {
            Some(card) => rsx! {
                QuestionCard {
                    card,
                    countdown: pending().map(|p| p.remaining),
                    on_answer,
                    on_submit,
                    on_next,
                }
            },
            None => rsx! {},
        },
    };

    rsx! {
        div { class: "page quiz-session", {body} }
    }
}

#[component]
fn QuestionCard(
    card: QuizCardVm,
    countdown: Option<u32>,
    on_answer: EventHandler<String>,
    on_submit: EventHandler<()>,
    on_next: EventHandler<()>,
) -> Element {
    let disabled = card.submitted;
    let answer = card.answer.clone();
    let input = match card.input.clone() {
        AnswerInputVm::Choices(choices) => rsx! {
            div { class: "choices",
                for (index, choice) in choices.into_iter().enumerate() {
                    ChoiceOption {
                        key: "{index}",
                        choice,
                        disabled,
                        on_answer,
                    }
                }
            }
        },
        AnswerInputVm::FreeText => rsx! {
            input {
                id: "quiz-answer",
                class: "answer-input",
                r#type: "text",
                placeholder: "Type your answer...",
                value: "{answer}",
                disabled,
                oninput: move |evt| on_answer.call(evt.value()),
                onkeydown: move |evt| {
                    if matches!(evt.data.key(), Key::Enter) {
                        evt.prevent_default();
                        on_submit.call(());
                    }
                },
            }
        },
    };

    rsx! {
        div { class: "quiz-progress",
            span { "{card.progress_label}" }
            div { class: "progress-bar",
                div { class: "progress-fill", style: "width: {card.progress_percent}%" }
            }
        }
        div { class: "question-card",
            h3 { class: "question-prompt", "{card.prompt}" }
            if let Some(url) = card.image_url.clone() {
                img { class: "question-image", src: "{url}", alt: "Question" }
            }
            {input}
            if let Some(feedback) = card.feedback.clone() {
                p {
                    class: if feedback.correct { "feedback feedback-correct" } else { "feedback feedback-wrong" },
                    "{feedback.message}"
                }
            }
            if card.submitted {
                div { class: "quiz-next",
                    if let Some(seconds) = countdown {
                        span { class: "countdown", "Next question in {seconds}s" }
                    }
                    button {
                        id: "quiz-next",
                        class: "btn btn-primary",
                        onclick: move |_| on_next.call(()),
                        "{card.next_label}"
                    }
                }
            } else {
                button {
                    id: "quiz-submit",
                    class: "btn btn-primary",
                    disabled: !card.can_submit,
                    onclick: move |_| on_submit.call(()),
                    "Check Answer"
                }
            }
        }
    }
}

#[component]
fn ChoiceOption(
    choice: ChoiceVm,
    disabled: bool,
    on_answer: EventHandler<String>,
) -> Element {
    let class = match choice.state {
        ChoiceState::Idle => "choice",
        ChoiceState::Selected => "choice choice-selected",
        ChoiceState::Correct => "choice choice-correct",
        ChoiceState::Wrong => "choice choice-wrong",
    };
    let label = choice.label.clone();
    let checked = choice.checked;

    rsx! {
        label { class,
            input {
                r#type: "radio",
                name: "answer",
                value: "{choice.label}",
                checked,
                disabled,
                onchange: move |_| on_answer.call(label.clone()),
            }
            span { "{choice.label}" }
        }
    }
}

use dioxus::prelude::*;

use crate::vm::QuizResultVm;

#[component]
pub fn QuizResults(
    result: QuizResultVm,
    on_restart: EventHandler<()>,
    on_leave: EventHandler<()>,
) -> Element {
    let class = if result.celebrate {
        "quiz-results celebrate"
    } else {
        "quiz-results"
    };

    rsx! {
        div { class,
            h2 { "{result.headline}" }
            p { class: "score", "{result.correct}/{result.total}" }
            p { class: "percentage", "{result.percentage}% Correct" }
            div { class: "actions",
                button {
                    id: "quiz-restart",
                    class: "btn btn-primary",
                    onclick: move |_| on_restart.call(()),
                    "Try Again"
                }
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| on_leave.call(()),
                    "Back to Categories"
                }
            }
        }
    }
}

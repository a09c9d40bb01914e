use dioxus::prelude::*;

use quiz_core::model::{LoadingPhase, ResultContent, Screen, Session};

use crate::vm::question_vm;

use super::QuizIntent;
use super::question::QuestionScreen;

/// Renders whichever screen the session is on. Pure over its props, so it can
/// be rendered without a running quiz.
#[component]
pub fn ScreenView(
    session: Session,
    question_count: usize,
    speaking: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    match session.screen() {
        Screen::Start => rsx! {
            StartScreen { question_count, on_intent }
        },
        Screen::Loading(phase) => rsx! {
            LoadingScreen { phase, on_intent }
        },
        Screen::Quiz => match question_vm(&session) {
            Some(vm) => {
                let number = vm.number;
                rsx! {
                    QuestionScreen { key: "{number}", vm, speaking, on_intent }
                }
            }
            None => rsx! {
                LoadingScreen { phase: LoadingPhase::GeneratingQuestions, on_intent }
            },
        },
        Screen::Result => rsx! {
            ResultScreen {
                score: session.score(),
                total: session.total(),
                content: session.result().cloned(),
                on_intent,
            }
        },
        Screen::Error => rsx! {
            ErrorScreen { message: session.error_message().to_string(), on_intent }
        },
    }
}

#[component]
fn StartScreen(question_count: usize, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        section { class: "screen screen--start",
            h2 { class: "screen-title", "Test your vocabulary" }
            p { class: "screen-lead",
                "Answer {question_count} fill-in-the-blank questions written at Eiken Grade Pre-1 level. "
                "Each one comes with its own picture and an explanation."
            }
            p { class: "screen-hint", "Tip: press 1-4 to answer and Enter to continue." }
            button {
                class: "btn btn-primary",
                onclick: move |_| on_intent.call(QuizIntent::Start),
                "Start quiz"
            }
        }
    }
}

#[component]
fn LoadingScreen(phase: LoadingPhase, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        section { class: "screen screen--loading", aria_busy: "true",
            div { class: "spinner" }
            p { class: "loading-message", "{phase.message()}" }
            button {
                class: "btn btn-secondary",
                onclick: move |_| on_intent.call(QuizIntent::Reset),
                "Cancel"
            }
        }
    }
}

#[component]
fn ResultScreen(
    score: usize,
    total: usize,
    content: Option<ResultContent>,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let Some(content) = content else {
        return rsx! {
            LoadingScreen { phase: LoadingPhase::AnalyzingResults, on_intent }
        };
    };

    rsx! {
        section { class: "screen screen--result",
            p { class: "result-score", "{score} / {total}" }
            h2 { class: "result-rank", "{content.rank}" }
            p { class: "result-message", "{content.message}" }
            button {
                class: "btn btn-primary",
                onclick: move |_| on_intent.call(QuizIntent::Reset),
                "Play again"
            }
        }
    }
}

#[component]
fn ErrorScreen(message: String, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        section { class: "screen screen--error", role: "alert",
            h2 { class: "screen-title", "Something went wrong" }
            p { class: "error-message", "{message}" }
            button {
                class: "btn btn-primary",
                onclick: move |_| on_intent.call(QuizIntent::Reset),
                "Back to start"
            }
        }
    }
}

use dioxus::prelude::*;

use crate::vm::{BROKEN_IMAGE_FALLBACK_URL, ChoiceVm, QuestionVm};

use super::QuizIntent;

#[component]
pub(super) fn QuestionScreen(
    vm: QuestionVm,
    speaking: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let mut image_broken = use_signal(|| false);
    let mut image_loaded = use_signal(|| false);
    let image_url = if image_broken() {
        BROKEN_IMAGE_FALLBACK_URL.to_string()
    } else {
        vm.image_url.clone()
    };
    let image_class = if vm.image_is_placeholder {
        "question-image question-image--placeholder"
    } else {
        "question-image"
    };
    let speech_label = if speaking { "Stop" } else { "Listen" };

    rsx! {
        section { class: "screen screen--quiz",
            div { class: "quiz-progress",
                div { class: "quiz-progress-track",
                    div {
                        class: "quiz-progress-bar",
                        style: "width: {vm.progress_percent}%",
                    }
                }
                div { class: "quiz-progress-meta",
                    span { class: "quiz-progress-label", "Question {vm.number} of {vm.total}" }
                    span { class: "quiz-score", "Score: {vm.score}" }
                }
            }

            div { class: "question-figure",
                if !image_loaded() {
                    div { class: "question-image-loading", aria_hidden: "true",
                        div { class: "spinner" }
                    }
                }
                img {
                    class: "{image_class}",
                    src: "{image_url}",
                    alt: "Illustration for question {vm.number}",
                    onload: move |_| image_loaded.set(true),
                    onerror: move |_| {
                        if image_broken() {
                            image_loaded.set(true);
                        } else {
                            image_broken.set(true);
                        }
                    },
                }
            }

            div { class: "question-body",
                p { class: "question-prompt", dangerous_inner_html: "{vm.prompt_html}" }
                button {
                    class: "btn btn-ghost speech-toggle",
                    aria_pressed: "{speaking}",
                    onclick: move |_| on_intent.call(QuizIntent::ToggleSpeech),
                    "{speech_label}"
                }
            }

            div { class: "choices",
                for choice in vm.choices.iter().cloned() {
                    ChoiceButton {
                        key: "{choice.key}",
                        choice: choice.clone(),
                        locked: vm.answered,
                        on_intent,
                    }
                }
            }

            if let Some(feedback) = vm.feedback.clone() {
                div { class: "{feedback.class()}",
                    h3 { class: "feedback-heading", "{feedback.heading}" }
                    p { class: "feedback-answer", "Answer: {feedback.answer}" }
                    div {
                        class: "feedback-explanation",
                        dangerous_inner_html: "{feedback.explanation_html}",
                    }
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| on_intent.call(QuizIntent::Next),
                        "{vm.next_label}"
                    }
                }
            }
        }
    }
}

#[component]
fn ChoiceButton(choice: ChoiceVm, locked: bool, on_intent: EventHandler<QuizIntent>) -> Element {
    let label = choice.label.clone();
    rsx! {
        button {
            class: "choice {choice.state.class()}",
            disabled: locked,
            onclick: move |_| on_intent.call(QuizIntent::Select(label.clone())),
            span { class: "choice-key", "{choice.key}" }
            span { class: "choice-label", "{choice.label}" }
        }
    }
}

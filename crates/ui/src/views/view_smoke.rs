use dioxus::prelude::*;
use quiz_core::model::{Advance, ResultContent, Session};

use super::test_harness::batch;
use super::ScreenView;

#[derive(Props, Clone, PartialEq)]
struct SmokeProps {
    session: Session,
    speaking: bool,
}

#[component]
fn Smoke(props: SmokeProps) -> Element {
    rsx! {
        ScreenView {
            session: props.session,
            question_count: 3,
            speaking: props.speaking,
            on_intent: |_| {},
        }
    }
}

fn render(session: Session, speaking: bool) -> String {
    let mut dom = VirtualDom::new_with_props(Smoke, SmokeProps { session, speaking });
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}

fn in_quiz() -> Session {
    let mut session = Session::new();
    let token = session.begin_start().expect("start");
    session.begin_quiz(token, batch());
    session
}

#[test]
fn start_screen_names_question_count() {
    let html = render(Session::new(), false);
    assert!(html.contains("Answer 3 fill-in-the-blank questions"), "{html}");
    assert!(html.contains("Start quiz"), "{html}");
}

#[test]
fn loading_screen_shows_phase_message() {
    let mut session = Session::new();
    session.begin_start();
    let html = render(session, false);
    assert!(html.contains("Creating your English quiz..."), "{html}");
    assert!(html.contains("Cancel"), "{html}");
}

#[test]
fn question_screen_renders_choices_and_progress() {
    let html = render(in_quiz(), false);
    assert!(html.contains("Question 1 of 3"), "{html}");
    assert!(html.contains("width: 33%"), "{html}");
    assert_eq!(html.matches("choice--open").count(), 4, "{html}");
    assert!(html.contains("Listen"), "{html}");
    assert!(!html.contains("feedback"), "{html}");
    assert!(html.contains("question-image-loading"), "{html}");
}

#[test]
fn speaking_flips_the_speech_toggle() {
    let html = render(in_quiz(), true);
    assert!(html.contains("Stop"), "{html}");
}

#[test]
fn answered_question_shows_explanation() {
    let mut session = in_quiz();
    session.select_answer("decisive");
    let html = render(session, false);
    assert!(html.contains("Not quite"), "{html}");
    assert!(html.contains("<strong>redundant</strong> fits the blank."), "{html}");
    assert!(html.contains("Next question"), "{html}");
}

#[test]
fn result_screen_waits_for_content() {
    let mut session = in_quiz();
    let mut token = None;
    for i in 0..3 {
        let question = session.current_question().expect("question");
        let choice = if i == 0 {
            question.answer().to_string()
        } else {
            question.choices()[0].clone()
        };
        session.select_answer(&choice);
        if let Advance::Finished { token: t, .. } = session.advance() {
            token = Some(t);
        }
    }
    let html = render(session.clone(), false);
    assert!(html.contains("Analyzing your results..."), "{html}");

    session.finish(
        token.expect("finished"),
        ResultContent::new("Word Explorer", "Keep going!"),
    );
    let html = render(session, false);
    assert!(html.contains("1 / 3"), "{html}");
    assert!(html.contains("Word Explorer"), "{html}");
    assert!(html.contains("Play again"), "{html}");
}

use dioxus::prelude::Key;
use quiz_core::model::{LoadingPhase, Screen};

use crate::views::test_harness::{QuizHarness, SLOW_IMAGE, Script};

use super::QuizIntent;

#[tokio::test(flavor = "current_thread")]
async fn quiz_intents_play_a_full_game() {
    let mut harness = QuizHarness::new(Script::Batch);
    assert!(harness.render().contains("Start quiz"));

    harness.dispatch(QuizIntent::Start);
    harness.settle(|s| s.screen() == Screen::Quiz).await;

    let html = harness.render();
    assert!(html.contains("Question 1 of 3"), "{html}");
    assert!(html.contains("data:image/jpeg;base64,QUJD"), "{html}");
    assert!(html.contains("<strong class=\"emphasis\">report</strong>"), "{html}");

    // First answer right, second wrong, third right.
    for (i, pick_right) in [true, false, true].into_iter().enumerate() {
        let session = harness.session();
        let question = session.current_question().expect("question");
        let choice = if pick_right {
            question.answer().to_string()
        } else {
            question
                .choices()
                .iter()
                .find(|c| !question.is_correct(c))
                .cloned()
                .expect("distractor")
        };

        harness.dispatch(QuizIntent::Select(choice));
        let html = harness.render();
        if pick_right {
            assert!(html.contains("Correct!"), "{html}");
            assert!(html.contains("choice--correct"), "{html}");
        } else {
            assert!(html.contains("Not quite"), "{html}");
            assert!(html.contains("choice--wrong"), "{html}");
            assert!(html.contains("choice--revealed"), "{html}");
        }

        harness.dispatch(QuizIntent::Next);
        if i < 2 {
            let next = i + 1;
            harness.settle(move |s| s.current_index() == next).await;
            assert!(harness.render().contains(&format!("Question {} of 3", next + 1)));
        }
    }

    harness.settle(|s| s.screen() == Screen::Result).await;
    let html = harness.render();
    assert!(html.contains("2 / 3"), "{html}");
    assert!(html.contains("Vocabulary Master"), "{html}");
    assert_eq!(harness.gateway.closing_calls(), [(2usize, 3usize)]);

    harness.dispatch(QuizIntent::Reset);
    assert_eq!(harness.session().screen(), Screen::Start);
    assert!(harness.render().contains("Start quiz"));
}

#[tokio::test(flavor = "current_thread")]
async fn select_is_locked_after_the_first_pick() {
    let mut harness = QuizHarness::new(Script::Batch);
    harness.dispatch(QuizIntent::Start);
    harness.settle(|s| s.screen() == Screen::Quiz).await;

    let answer = harness
        .session()
        .current_question()
        .expect("question")
        .answer()
        .to_string();
    harness.dispatch(QuizIntent::Select(answer.clone()));
    harness.dispatch(QuizIntent::Select("decisive".to_string()));

    let session = harness.session();
    assert_eq!(session.selected_answer(), Some(answer.as_str()));
    assert_eq!(session.score(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn failed_generation_shows_error_and_returns_to_start() {
    let mut harness = QuizHarness::new(Script::Fail);
    harness.dispatch(QuizIntent::Start);
    harness.settle(|s| s.screen() == Screen::Error).await;

    let html = harness.render();
    assert!(html.contains("Something went wrong"), "{html}");
    assert!(html.contains("QUIZ_AI_API_KEY"), "{html}");

    harness.dispatch(QuizIntent::Reset);
    assert_eq!(harness.session().screen(), Screen::Start);
}

#[tokio::test(flavor = "current_thread")]
async fn cancel_while_loading_returns_to_start() {
    let mut harness = QuizHarness::new(Script::Hang);
    harness.dispatch(QuizIntent::Start);
    harness.drive_async().await;

    assert_eq!(
        harness.session().screen(),
        Screen::Loading(LoadingPhase::GeneratingQuestions)
    );
    let html = harness.render();
    assert!(html.contains("Creating your English quiz..."), "{html}");

    harness.dispatch(QuizIntent::Reset);
    harness.drive_async().await;
    assert_eq!(harness.session().screen(), Screen::Start);
    assert!(harness.render().contains("Start quiz"));
}

#[tokio::test(flavor = "current_thread")]
async fn reset_after_double_start_stops_image_generation() {
    let mut harness = QuizHarness::new(Script::SlowImages);
    harness.dispatch(QuizIntent::Start);
    harness.dispatch(QuizIntent::Start);
    harness
        .settle(|s| s.screen() == Screen::Loading(LoadingPhase::GeneratingImages))
        .await;

    assert_eq!(harness.gateway.question_calls(), 1);
    assert_eq!(harness.gateway.image_calls(), 3);

    harness.dispatch(QuizIntent::Reset);
    assert_eq!(harness.session().screen(), Screen::Start);

    tokio::time::sleep(SLOW_IMAGE * 2).await;
    harness.drive_async().await;
    harness.drive_async().await;

    assert_eq!(harness.gateway.images_finished(), 0);
    assert_eq!(harness.gateway.image_calls(), 3);
    assert_eq!(harness.session().screen(), Screen::Start);
}

#[tokio::test(flavor = "current_thread")]
async fn keyboard_shortcuts_answer_and_advance() {
    let mut harness = QuizHarness::new(Script::Batch);

    // Nothing to answer before the quiz starts.
    assert!(!harness.press(Key::Character("1".into())));
    assert!(!harness.press(Key::Enter));

    harness.dispatch(QuizIntent::Start);
    harness.settle(|s| s.screen() == Screen::Quiz).await;

    // Enter does nothing until the question is answered; keys outside 1-4 are ignored.
    assert!(!harness.press(Key::Enter));
    assert!(!harness.press(Key::Character("5".into())));
    assert!(!harness.press(Key::Character("x".into())));

    // The answer sits at position 2 in every generated question.
    assert!(harness.press(Key::Character("2".into())));
    let session = harness.session();
    assert_eq!(session.selected_answer(), Some("redundant"));
    assert_eq!(session.score(), 1);

    // Further digits are locked out once answered.
    assert!(!harness.press(Key::Character("1".into())));
    assert!(harness.render().contains("Correct!"));

    assert!(harness.press(Key::Enter));
    harness.settle(|s| s.current_index() == 1).await;
    assert!(harness.render().contains("Question 2 of 3"));
    assert!(!harness.session().is_answered());
}

use quiz_core::model::{DEFAULT_PLACEHOLDER_URL, Question, Screen, Session};

use super::markup_vm::{markdown_to_html, prompt_to_html};

/// Swapped in by the page when an illustration fails to load.
pub const BROKEN_IMAGE_FALLBACK_URL: &str = "https://picsum.photos/800/450";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChoiceState {
    Open,
    /// The user's pick, and it was right.
    Correct,
    /// The user's pick, and it was wrong.
    Wrong,
    /// The right answer the user missed.
    Revealed,
    Dimmed,
}

impl ChoiceState {
    #[must_use]
    pub fn for_choice(question: &Question, selected: Option<&str>, choice: &str) -> Self {
        let Some(selected) = selected else {
            return Self::Open;
        };
        let is_answer = question.is_correct(choice);
        match (choice == selected, is_answer) {
            (true, true) => Self::Correct,
            (true, false) => Self::Wrong,
            (false, true) => Self::Revealed,
            (false, false) => Self::Dimmed,
        }
    }

    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Open => "choice--open",
            Self::Correct => "choice--correct",
            Self::Wrong => "choice--wrong",
            Self::Revealed => "choice--revealed",
            Self::Dimmed => "choice--dimmed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceVm {
    /// 1-based keyboard shortcut.
    pub key: usize,
    pub label: String,
    pub state: ChoiceState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub correct: bool,
    pub heading: &'static str,
    pub answer: String,
    pub explanation_html: String,
}

impl FeedbackVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.correct {
            "feedback feedback--correct"
        } else {
            "feedback feedback--wrong"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub number: usize,
    pub total: usize,
    pub score: usize,
    pub progress_percent: usize,
    pub prompt_html: String,
    /// Plain prompt text for speech playback.
    pub speech_text: String,
    pub image_url: String,
    pub image_is_placeholder: bool,
    pub choices: Vec<ChoiceVm>,
    pub answered: bool,
    pub feedback: Option<FeedbackVm>,
    pub next_label: &'static str,
}

impl QuestionVm {
    /// Choice label for a 1-based shortcut key.
    #[must_use]
    pub fn choice_for_key(&self, key: usize) -> Option<&str> {
        self.choices
            .iter()
            .find(|choice| choice.key == key)
            .map(|choice| choice.label.as_str())
    }
}

/// Build the question screen model, or `None` when there is nothing to show.
#[must_use]
pub fn question_vm(session: &Session) -> Option<QuestionVm> {
    if session.screen() != Screen::Quiz {
        return None;
    }
    let question = session.current_question()?;
    let selected = session.selected_answer();
    let number = session.question_number();
    let total = session.total();

    let choices = question
        .choices()
        .iter()
        .enumerate()
        .map(|(index, label)| ChoiceVm {
            key: index + 1,
            label: label.clone(),
            state: ChoiceState::for_choice(question, selected, label),
        })
        .collect();

    let feedback = session.last_answer_correct().map(|correct| FeedbackVm {
        correct,
        heading: if correct { "Correct!" } else { "Not quite" },
        answer: question.answer().to_string(),
        explanation_html: markdown_to_html(question.explanation()),
    });

    let (image_url, image_is_placeholder) = question.image().map_or_else(
        || (DEFAULT_PLACEHOLDER_URL.to_string(), true),
        |image| (image.as_str().to_string(), image.is_placeholder()),
    );

    Some(QuestionVm {
        number,
        total,
        score: session.score(),
        progress_percent: number * 100 / total.max(1),
        prompt_html: prompt_to_html(question.prompt()),
        speech_text: question.prompt().plain_text(),
        image_url,
        image_is_placeholder,
        choices,
        answered: session.is_answered(),
        feedback,
        next_label: if session.is_last_question() {
            "See results"
        } else {
            "Next question"
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{ImageRef, QuestionDraft};

    fn question(answer: &str) -> Question {
        QuestionDraft {
            question: "It is sadly ( ) that farmers go hungry.".into(),
            choices: vec![
                "indefinite".into(),
                "ironic".into(),
                "restless".into(),
                "superficial".into(),
            ],
            answer: answer.into(),
            explanation: "**ironic**: 皮肉な".into(),
            image_prompt: "farmers".into(),
        }
        .validate()
        .unwrap()
        .with_image(ImageRef::from_base64("image/jpeg", "QUJD").unwrap())
    }

    fn session(count: usize) -> Session {
        let mut session = Session::new();
        let token = session.begin_start().unwrap();
        session.begin_quiz(token, (0..count).map(|_| question("ironic")).collect());
        session
    }

    #[test]
    fn unanswered_question_has_open_choices() {
        let vm = question_vm(&session(3)).unwrap();
        assert_eq!((vm.number, vm.total, vm.progress_percent), (1, 3, 33));
        assert!(vm.choices.iter().all(|c| c.state == ChoiceState::Open));
        assert!(vm.feedback.is_none());
        assert_eq!(vm.next_label, "Next question");
        assert_eq!(vm.choice_for_key(2), Some("ironic"));
        assert_eq!(vm.speech_text, "It is sadly ( ) that farmers go hungry.");
        assert!(!vm.image_is_placeholder);
    }

    #[test]
    fn wrong_pick_reveals_the_answer() {
        let mut session = session(1);
        session.select_answer("restless");
        let vm = question_vm(&session).unwrap();

        let states: Vec<ChoiceState> = vm.choices.iter().map(|c| c.state).collect();
        assert_eq!(
            states,
            [
                ChoiceState::Dimmed,
                ChoiceState::Revealed,
                ChoiceState::Wrong,
                ChoiceState::Dimmed
            ]
        );
        let feedback = vm.feedback.unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.answer, "ironic");
        assert!(feedback.explanation_html.contains("<strong>ironic</strong>"));
        assert_eq!(vm.next_label, "See results");
    }

    #[test]
    fn correct_pick_is_marked() {
        let mut session = session(2);
        session.select_answer("ironic");
        let vm = question_vm(&session).unwrap();
        assert_eq!(vm.choices[1].state, ChoiceState::Correct);
        assert_eq!(vm.feedback.unwrap().heading, "Correct!");
        assert_eq!(vm.score, 1);
    }

    #[test]
    fn no_model_outside_the_quiz() {
        assert!(question_vm(&Session::new()).is_none());
    }
}

use uuid::Uuid;

use crate::model::question::Question;
use crate::model::result::ResultContent;

//
// ─── SCREENS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingPhase {
    GeneratingQuestions,
    GeneratingImages,
    AnalyzingResults,
}

impl LoadingPhase {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::GeneratingQuestions => "Creating your English quiz...",
            Self::GeneratingImages => "Drawing pictures for each question...",
            Self::AnalyzingResults => "Analyzing your results...",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Start,
    Loading(LoadingPhase),
    Quiz,
    Result,
    Error,
}

impl Screen {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Loading(_) => "Loading",
            Self::Quiz => "Quiz",
            Self::Result => "Result",
            Self::Error => "Error",
        }
    }

    #[must_use]
    pub fn is_loading(self) -> bool {
        matches!(self, Self::Loading(_))
    }
}

//
// ─── TRANSITION OUTCOMES ───────────────────────────────────────────────────────
//

/// Identifies one in-flight generation job.
///
/// A completion is applied only while its token is still the session's pending one,
/// so results that arrive after a reset are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadToken(Uuid);

impl LoadToken {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Ignored,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Ignored,
    NextQuestion {
        index: usize,
    },
    /// The last question was answered; the closing message must be generated.
    Finished {
        token: LoadToken,
        score: usize,
        total: usize,
    },
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State of one game, from the start screen to the result screen.
///
/// Every mutation goes through a command method. Commands issued from the wrong
/// screen are ignored, never errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    screen: Screen,
    questions: Vec<Question>,
    current_index: usize,
    score: usize,
    selected_answer: Option<String>,
    answered: bool,
    loading_message: String,
    error_message: String,
    result: Option<ResultContent>,
    pending: Option<LoadToken>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// 1-based position of the current question.
    #[must_use]
    pub fn question_number(&self) -> usize {
        self.current_index + 1
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<&str> {
        self.selected_answer.as_deref()
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.answered
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    /// Whether the committed answer for the current question was correct.
    #[must_use]
    pub fn last_answer_correct(&self) -> Option<bool> {
        let selected = self.selected_answer.as_deref()?;
        self.current_question().map(|q| q.is_correct(selected))
    }

    #[must_use]
    pub fn loading_message(&self) -> &str {
        &self.loading_message
    }

    #[must_use]
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    #[must_use]
    pub fn result(&self) -> Option<&ResultContent> {
        self.result.as_ref()
    }

    /// True while a generation job is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Start → Loading(questions). Returns the token for the job, or `None` when
    /// not on the start screen.
    pub fn begin_start(&mut self) -> Option<LoadToken> {
        if self.screen != Screen::Start {
            return None;
        }
        Some(self.enter_loading(LoadingPhase::GeneratingQuestions))
    }

    /// Loading(questions) → Loading(images).
    pub fn questions_generated(&mut self, token: LoadToken) -> bool {
        if !self.accepts(token, &[LoadingPhase::GeneratingQuestions]) {
            return false;
        }
        self.screen = Screen::Loading(LoadingPhase::GeneratingImages);
        self.loading_message = LoadingPhase::GeneratingImages.message().to_string();
        true
    }

    /// Loading(questions | images) → Error.
    pub fn fail_start(&mut self, token: LoadToken, message: impl Into<String>) -> bool {
        if !self.accepts(token, START_PHASES) {
            return false;
        }
        self.questions.clear();
        self.pending = None;
        self.loading_message.clear();
        self.error_message = message.into();
        self.screen = Screen::Error;
        true
    }

    /// Loading(questions | images) → Quiz with a fresh tally.
    ///
    /// An empty batch is routed to the error screen so the quiz screen never
    /// renders without a question.
    pub fn begin_quiz(&mut self, token: LoadToken, questions: Vec<Question>) -> bool {
        if !self.accepts(token, START_PHASES) {
            return false;
        }
        if questions.is_empty() {
            return self.fail_start(token, EMPTY_BATCH_MESSAGE);
        }
        self.questions = questions;
        self.current_index = 0;
        self.score = 0;
        self.selected_answer = None;
        self.answered = false;
        self.pending = None;
        self.loading_message.clear();
        self.screen = Screen::Quiz;
        true
    }

    /// Commit an answer for the current question.
    ///
    /// Ignored once the question is answered, outside the quiz screen, or when
    /// `choice` is not one of the current question's choices.
    pub fn select_answer(&mut self, choice: &str) -> AnswerOutcome {
        if self.screen != Screen::Quiz || self.answered {
            return AnswerOutcome::Ignored;
        }
        let Some(question) = self.questions.get(self.current_index) else {
            return AnswerOutcome::Ignored;
        };
        if !question.has_choice(choice) {
            return AnswerOutcome::Ignored;
        }

        let correct = question.is_correct(choice);
        self.selected_answer = Some(choice.to_string());
        self.answered = true;
        if correct {
            self.score += 1;
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Incorrect
        }
    }

    /// Move past an answered question. After the last one the session enters
    /// Loading(results) and the caller must deliver the closing message.
    pub fn advance(&mut self) -> Advance {
        if self.screen != Screen::Quiz || !self.answered {
            return Advance::Ignored;
        }

        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            self.selected_answer = None;
            self.answered = false;
            return Advance::NextQuestion {
                index: self.current_index,
            };
        }

        let token = self.enter_loading(LoadingPhase::AnalyzingResults);
        Advance::Finished {
            token,
            score: self.score,
            total: self.questions.len(),
        }
    }

    /// Loading(results) → Result.
    pub fn finish(&mut self, token: LoadToken, content: ResultContent) -> bool {
        if !self.accepts(token, &[LoadingPhase::AnalyzingResults]) {
            return false;
        }
        self.result = Some(content);
        self.pending = None;
        self.loading_message.clear();
        self.screen = Screen::Result;
        true
    }

    /// Back to a fresh start screen. Allowed from Result and Error, and from any
    /// Loading phase, where it abandons the in-flight job.
    pub fn reset(&mut self) -> bool {
        match self.screen {
            Screen::Result | Screen::Error | Screen::Loading(_) => {
                *self = Self::default();
                true
            }
            Screen::Start | Screen::Quiz => false,
        }
    }

    fn enter_loading(&mut self, phase: LoadingPhase) -> LoadToken {
        let token = LoadToken::new();
        self.pending = Some(token);
        self.screen = Screen::Loading(phase);
        self.loading_message = phase.message().to_string();
        token
    }

    fn accepts(&self, token: LoadToken, phases: &[LoadingPhase]) -> bool {
        self.pending == Some(token)
            && matches!(self.screen, Screen::Loading(phase) if phases.contains(&phase))
    }
}

const START_PHASES: &[LoadingPhase] = &[
    LoadingPhase::GeneratingQuestions,
    LoadingPhase::GeneratingImages,
];

const EMPTY_BATCH_MESSAGE: &str = "The quiz came back empty. Please try again.";

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

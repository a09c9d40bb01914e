use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use quiz_core::model::{Advance, AnswerOutcome, Question, Session};

use crate::gateway::ContentGateway;

/// Mutation seam for the session.
///
/// The orchestrator never holds a borrow across a suspension point; each
/// transition is applied through one `update` call.
pub trait SessionStore {
    fn update<R>(&mut self, f: impl FnOnce(&mut Session) -> R) -> R;
}

impl SessionStore for Session {
    fn update<R>(&mut self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Not on the start screen.
    Ignored,
    Started { questions: usize },
    /// The session moved to the error screen.
    Failed,
    /// The session was reset while generating; the result was dropped.
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Ignored,
    NextQuestion { index: usize },
    Finished { score: usize, total: usize },
    Discarded,
}

/// Sequences gateway calls around the session's transitions.
#[derive(Clone)]
pub struct QuizOrchestrator {
    gateway: Arc<dyn ContentGateway>,
}

impl QuizOrchestrator {
    #[must_use]
    pub fn new(gateway: Arc<dyn ContentGateway>) -> Self {
        Self { gateway }
    }

    #[must_use]
    pub fn gateway(&self) -> Arc<dyn ContentGateway> {
        Arc::clone(&self.gateway)
    }

    /// Generate a batch, illustrate it and enter the quiz.
    pub async fn start_quiz<S: SessionStore>(&self, store: &mut S) -> StartOutcome {
        let Some(token) = store.update(Session::begin_start) else {
            debug!("start ignored outside the start screen");
            return StartOutcome::Ignored;
        };

        info!(count = self.gateway.question_count(), "generating questions");
        let questions = match self.gateway.generate_questions().await {
            Ok(questions) => questions,
            Err(err) => {
                warn!(error = %err, "question generation failed");
                let message = err.user_message();
                return if store.update(|s| s.fail_start(token, message)) {
                    StartOutcome::Failed
                } else {
                    StartOutcome::Discarded
                };
            }
        };

        if !store.update(|s| s.questions_generated(token)) {
            return StartOutcome::Discarded;
        }

        info!(count = questions.len(), "generating images");
        let questions = illustrate(self.gateway.as_ref(), questions).await;
        let count = questions.len();

        if !store.update(|s| s.begin_quiz(token, questions)) {
            return StartOutcome::Discarded;
        }
        if count == 0 {
            return StartOutcome::Failed;
        }
        info!(count, "quiz started");
        StartOutcome::Started { questions: count }
    }

    pub fn select_answer<S: SessionStore>(&self, store: &mut S, choice: &str) -> AnswerOutcome {
        let outcome = store.update(|s| s.select_answer(choice));
        if outcome == AnswerOutcome::Ignored {
            debug!(choice, "answer ignored");
        }
        outcome
    }

    /// Next question, or the closing message after the last one.
    pub async fn advance<S: SessionStore>(&self, store: &mut S) -> AdvanceOutcome {
        match store.update(Session::advance) {
            Advance::Ignored => {
                debug!("advance ignored");
                AdvanceOutcome::Ignored
            }
            Advance::NextQuestion { index } => AdvanceOutcome::NextQuestion { index },
            Advance::Finished { token, score, total } => {
                info!(score, total, "analyzing results");
                let content = self.gateway.generate_closing_message(score, total).await;
                if store.update(|s| s.finish(token, content)) {
                    AdvanceOutcome::Finished { score, total }
                } else {
                    AdvanceOutcome::Discarded
                }
            }
        }
    }

    pub fn reset<S: SessionStore>(&self, store: &mut S) -> bool {
        let reset = store.update(Session::reset);
        if !reset {
            debug!("reset ignored");
        }
        reset
    }
}

/// Fetch one image per question concurrently and attach them by position.
pub async fn illustrate(gateway: &dyn ContentGateway, questions: Vec<Question>) -> Vec<Question> {
    let images = join_all(
        questions
            .iter()
            .map(|question| gateway.generate_image(question.image_prompt())),
    )
    .await;

    questions
        .into_iter()
        .zip(images)
        .map(|(question, image)| question.with_image(image))
        .collect()
}

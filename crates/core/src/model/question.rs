use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::image::ImageRef;
use crate::model::prompt::Prompt;

/// Every question offers exactly this many choices.
pub const CHOICE_COUNT: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("expected {expected} choices, got {actual}")]
    ChoiceCount { expected: usize, actual: usize },

    #[error("choice {index} is empty")]
    EmptyChoice { index: usize },

    #[error("duplicate choice: {0:?}")]
    DuplicateChoice(String),

    #[error("answer {0:?} is not one of the choices")]
    AnswerNotInChoices(String),
}

//
// ─── DRAFT (unvalidated, as produced by the generator) ─────────────────────────
//

/// Raw question as it comes back from the content generator.
///
/// Field names follow the JSON schema sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub question: String,
    pub choices: Vec<String>,
    pub answer: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub image_prompt: String,
}

impl QuestionDraft {
    /// Validate the draft into a `Question`.
    ///
    /// Choices and the answer are reduced to plain text (markup stripped, entities
    /// decoded) and trimmed before comparison. Choice order is kept as-is; callers
    /// shuffle before validating.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the text is empty, the choice set is not exactly
    /// `CHOICE_COUNT` distinct non-empty strings, or the answer is not among them.
    pub fn validate(self) -> Result<Question, QuestionError> {
        if self.question.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }

        if self.choices.len() != CHOICE_COUNT {
            return Err(QuestionError::ChoiceCount {
                expected: CHOICE_COUNT,
                actual: self.choices.len(),
            });
        }

        let mut choices = Vec::with_capacity(CHOICE_COUNT);
        let mut seen = HashSet::with_capacity(CHOICE_COUNT);
        for (index, raw) in self.choices.into_iter().enumerate() {
            let choice = plain_label(&raw);
            if choice.is_empty() {
                return Err(QuestionError::EmptyChoice { index });
            }
            if !seen.insert(choice.clone()) {
                return Err(QuestionError::DuplicateChoice(choice));
            }
            choices.push(choice);
        }

        let answer = plain_label(&self.answer);
        if !seen.contains(&answer) {
            return Err(QuestionError::AnswerNotInChoices(answer));
        }

        Ok(Question {
            prompt: Prompt::parse(&self.question),
            choices,
            answer,
            explanation: self.explanation.trim().to_string(),
            image_prompt: self.image_prompt.trim().to_string(),
            image: None,
        })
    }
}

fn plain_label(raw: &str) -> String {
    Prompt::parse(raw).plain_text().trim().to_string()
}

//
// ─── VALIDATED QUESTION ────────────────────────────────────────────────────────
//

/// A validated multiple-choice question.
///
/// `answer` is always one of `choices`; the choice order is fixed once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: Prompt,
    choices: Vec<String>,
    answer: String,
    explanation: String,
    image_prompt: String,
    image: Option<ImageRef>,
}

impl Question {
    #[must_use]
    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn image_prompt(&self) -> &str {
        &self.image_prompt
    }

    /// Resolved illustration, `None` until the image batch settles.
    #[must_use]
    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn has_choice(&self, choice: &str) -> bool {
        self.choices.iter().any(|c| c == choice)
    }

    #[must_use]
    pub fn is_correct(&self, choice: &str) -> bool {
        self.answer == choice
    }

    /// Position of the correct answer within `choices`.
    #[must_use]
    pub fn answer_position(&self) -> usize {
        self.choices
            .iter()
            .position(|c| *c == self.answer)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.image = Some(image);
        self
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{ImageError, QuestionError};

/// Errors emitted by a `ContentGateway` while producing a question batch.
///
/// Image and closing-message failures never surface as errors; the gateway
/// substitutes fallbacks and logs the cause.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("content generation is not configured")]
    Disabled,
    #[error("content generation returned an empty response")]
    EmptyResponse,
    #[error("content generation request failed with status {status}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("malformed generator response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected {expected} questions, got {actual}")]
    WrongCount { expected: usize, actual: usize },
    #[error("question {index} is invalid: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },
    #[error(transparent)]
    InvalidImage(#[from] ImageError),
}

impl GatewayError {
    /// Copy shown on the error screen. Details stay in the log.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Disabled => {
                "No API key is configured. Set QUIZ_AI_API_KEY (or GEMINI_API_KEY) and restart."
            }
            Self::Http(_) | Self::HttpStatus { .. } => {
                "We couldn't reach the quiz generator. Please try again."
            }
            _ => "We couldn't create the quiz. Please try again.",
        }
    }
}

use async_trait::async_trait;

use quiz_core::model::{ImageRef, Question, ResultContent};

use crate::error::GatewayError;

/// Boundary to the generative content provider.
#[async_trait]
pub trait ContentGateway: Send + Sync {
    /// Number of questions every batch contains.
    fn question_count(&self) -> usize;

    /// Produce a batch of exactly `question_count()` validated questions with
    /// shuffled choices and no images yet.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` when the provider fails or the batch is malformed.
    async fn generate_questions(&self) -> Result<Vec<Question>, GatewayError>;

    /// Illustrate one question. Never fails: a placeholder stands in on error.
    async fn generate_image(&self, prompt: &str) -> ImageRef;

    /// Rank and message for the final score. Never fails: falls back to
    /// `ResultContent::fallback()`.
    async fn generate_closing_message(&self, score: usize, total: usize) -> ResultContent;
}

use serde::{Deserialize, Serialize};

pub const FALLBACK_RANK: &str = "English Challenger";
pub const FALLBACK_MESSAGE: &str =
    "Great work! Keep practicing and your results will keep getting better!";

/// Closing assessment shown on the result screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultContent {
    pub rank: String,
    pub message: String,
}

impl ResultContent {
    #[must_use]
    pub fn new(rank: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rank: rank.into(),
            message: message.into(),
        }
    }

    /// Used whenever the generator cannot produce an assessment.
    #[must_use]
    pub fn fallback() -> Self {
        Self::new(FALLBACK_RANK, FALLBACK_MESSAGE)
    }

    /// True when both fields carry visible text.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.rank.trim().is_empty() && !self.message.trim().is_empty()
    }
}

use std::env;
use std::time::Duration;

use quiz_core::model::ImageRef;
use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-3.0-generate-002";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_QUESTION_COUNT: usize = 3;

const API_KEY_VARS: [&str; 3] = ["QUIZ_AI_API_KEY", "GEMINI_API_KEY", "API_KEY"];

/// Connection settings for the Gemini REST API.
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    pub base_url: String,
    pub api_key: String,
    pub text_model: String,
    pub image_model: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    /// `None` when no API key is set, which leaves the gateway disabled.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let api_key = API_KEY_VARS
            .iter()
            .filter_map(|key| lookup(*key))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())?;

        let base_url = non_empty(&lookup, "QUIZ_AI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let text_model = non_empty(&lookup, "QUIZ_AI_TEXT_MODEL")
            .unwrap_or_else(|| DEFAULT_TEXT_MODEL.into());
        let image_model = non_empty(&lookup, "QUIZ_AI_IMAGE_MODEL")
            .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.into());
        let timeout_secs = parse_or(&lookup, "QUIZ_AI_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);

        Some(Self {
            base_url,
            api_key,
            text_model,
            image_model,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            text_model: DEFAULT_TEXT_MODEL.into(),
            image_model: DEFAULT_IMAGE_MODEL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Game settings that apply regardless of the provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSettings {
    pub question_count: usize,
    pub placeholder: ImageRef,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            placeholder: ImageRef::default_placeholder(),
        }
    }
}

impl QuizSettings {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Invalid values are logged and replaced by their defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        let count = parse_or(&lookup, "QUIZ_QUESTION_COUNT", DEFAULT_QUESTION_COUNT);
        settings = settings.with_question_count(count);

        if let Some(raw) = non_empty(&lookup, "QUIZ_PLACEHOLDER_IMAGE") {
            match ImageRef::placeholder(&raw) {
                Ok(image) => settings.placeholder = image,
                Err(err) => warn!(error = %err, value = %raw, "ignoring QUIZ_PLACEHOLDER_IMAGE"),
            }
        }

        settings
    }

    /// Zero is not a playable batch and keeps the current count.
    #[must_use]
    pub fn with_question_count(mut self, count: usize) -> Self {
        if count == 0 {
            warn!("question count must be at least 1, keeping {}", self.question_count);
        } else {
            self.question_count = count;
        }
        self
    }
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    let Some(raw) = non_empty(lookup, key) else {
        return default;
    };
    raw.parse().unwrap_or_else(|_| {
        warn!(value = %raw, "ignoring invalid {key}");
        default
    })
}

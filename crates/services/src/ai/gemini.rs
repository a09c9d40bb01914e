use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use quiz_core::model::{ImageRef, Question, QuestionDraft, ResultContent};

use crate::ai::config::{GeminiConfig, QuizSettings};
use crate::ai::prompts;
use crate::batch::validate_batch;
use crate::error::GatewayError;
use crate::gateway::ContentGateway;

const API_KEY_HEADER: &str = "x-goog-api-key";
const ERROR_BODY_LIMIT: usize = 512;

/// `ContentGateway` backed by Gemini (text) and Imagen (images).
///
/// Without a `GeminiConfig` the gateway is disabled: question generation fails
/// with `GatewayError::Disabled`, images and closing messages use fallbacks.
#[derive(Clone)]
pub struct GeminiGateway {
    client: Client,
    config: Option<GeminiConfig>,
    settings: QuizSettings,
}

impl GeminiGateway {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(GeminiConfig::from_env(), QuizSettings::from_env())
    }

    #[must_use]
    pub fn new(config: Option<GeminiConfig>, settings: QuizSettings) -> Self {
        let mut builder = Client::builder();
        if let Some(config) = &config {
            builder = builder.timeout(config.timeout);
        }
        let client = builder.build().unwrap_or_else(|err| {
            warn!(error = %err, "falling back to default http client");
            Client::new()
        });
        Self {
            client,
            config,
            settings,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// Closing message without the fallback applied.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` when the service is disabled, the request fails,
    /// or the response is not a complete `{rank, message}` object.
    pub async fn try_closing_message(
        &self,
        score: usize,
        total: usize,
    ) -> Result<ResultContent, GatewayError> {
        let prompt = prompts::closing_prompt(score, total);
        let text = self
            .generate_content(&prompt, prompts::result_schema())
            .await?;
        parse_result(&text)
    }

    /// Illustration without the placeholder applied.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` when the service is disabled, the request fails,
    /// or no image bytes come back.
    pub async fn try_image(&self, subject: &str) -> Result<ImageRef, GatewayError> {
        let config = self.config.as_ref().ok_or(GatewayError::Disabled)?;

        let url = model_url(config, &config.image_model, "predict");
        let payload = json!({
            "instances": [{ "prompt": prompts::image_prompt(subject) }],
            "parameters": {
                "sampleCount": 1,
                "aspectRatio": "16:9",
                "outputOptions": { "mimeType": "image/jpeg" }
            }
        });

        let body: PredictResponse = self.post(config, url, &payload).await?;
        image_from_predictions(body)
    }

    async fn generate_content(&self, prompt: &str, schema: Value) -> Result<String, GatewayError> {
        let config = self.config.as_ref().ok_or(GatewayError::Disabled)?;

        let url = model_url(config, &config.text_model, "generateContent");
        let payload = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema
            }
        });

        let body: GenerateContentResponse = self.post(config, url, &payload).await?;
        response_text(body)
    }

    async fn post<T>(&self, config: &GeminiConfig, url: String, payload: &Value) -> Result<T, GatewayError>
    where
        T: for<'de> Deserialize<'de>,
    {
        debug!(%url, "calling generator");
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &config.api_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            truncate(&mut body, ERROR_BODY_LIMIT);
            return Err(GatewayError::HttpStatus { status, body });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ContentGateway for GeminiGateway {
    fn question_count(&self) -> usize {
        self.settings.question_count
    }

    async fn generate_questions(&self) -> Result<Vec<Question>, GatewayError> {
        let count = self.question_count();
        let prompt = prompts::questions_prompt(count);
        let text = self
            .generate_content(&prompt, prompts::questions_schema())
            .await?;
        let questions = parse_questions(&text, count, &mut rand::rng())?;
        info!(count = questions.len(), "question batch generated");
        Ok(questions)
    }

    async fn generate_image(&self, prompt: &str) -> ImageRef {
        match self.try_image(prompt).await {
            Ok(image) => image,
            Err(err) => {
                warn!(error = %err, "image generation failed, using placeholder");
                self.settings.placeholder.clone()
            }
        }
    }

    async fn generate_closing_message(&self, score: usize, total: usize) -> ResultContent {
        match self.try_closing_message(score, total).await {
            Ok(content) => content,
            Err(err) => {
                warn!(error = %err, "closing message failed, using fallback");
                ResultContent::fallback()
            }
        }
    }
}

//
// ─── RESPONSE PARSING ──────────────────────────────────────────────────────────
//

/// Parse the generator's JSON text into a validated, shuffled batch.
///
/// # Errors
///
/// Returns `GatewayError::Json` for malformed JSON, or the batch validation error.
pub fn parse_questions<R: Rng + ?Sized>(
    text: &str,
    expected: usize,
    rng: &mut R,
) -> Result<Vec<Question>, GatewayError> {
    let drafts: Vec<QuestionDraft> = serde_json::from_str(strip_code_fence(text))?;
    validate_batch(drafts, expected, rng)
}

/// # Errors
///
/// Returns `GatewayError::Json` for malformed JSON and
/// `GatewayError::EmptyResponse` when rank or message is blank.
pub fn parse_result(text: &str) -> Result<ResultContent, GatewayError> {
    let content: ResultContent = serde_json::from_str(strip_code_fence(text))?;
    if !content.is_complete() {
        return Err(GatewayError::EmptyResponse);
    }
    Ok(ResultContent::new(content.rank.trim(), content.message.trim()))
}

/// Drop a surrounding Markdown code fence such as ```` ```json ... ``` ````.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

fn response_text(body: GenerateContentResponse) -> Result<String, GatewayError> {
    let text: String = body
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GatewayError::EmptyResponse);
    }
    Ok(text)
}

fn image_from_predictions(body: PredictResponse) -> Result<ImageRef, GatewayError> {
    let prediction = body
        .predictions
        .into_iter()
        .next()
        .ok_or(GatewayError::EmptyResponse)?;
    let bytes = prediction
        .bytes_base64_encoded
        .ok_or(GatewayError::EmptyResponse)?;
    let mime = prediction.mime_type.unwrap_or_default();
    Ok(ImageRef::from_base64(&mime, &bytes)?)
}

fn model_url(config: &GeminiConfig, model: &str, method: &str) -> String {
    format!(
        "{}/models/{}:{}",
        config.base_url.trim_end_matches('/'),
        model,
        method
    )
}

fn truncate(text: &mut String, limit: usize) {
    if text.len() <= limit {
        return;
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

//! Client for the Gemini `generateContent` endpoint.
//!
//! Only the first candidate's text parts are read; safety ratings, usage
//! metadata and the like are ignored.

use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;

use crate::error::IntegrationError;
use crate::http::{env_opt, parse_response};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Connection settings for Gemini.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl GeminiConfig {
    /// Load from `GEMINI_API_KEY`, `GEMINI_MODEL` and `GEMINI_BASE_URL`.
    /// A missing key is not an error until a request is made.
    pub fn from_env() -> Self {
        Self {
            api_key: env_opt("GEMINI_API_KEY"),
            model: env_opt("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: env_opt("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

/// Anything that turns a prompt into text. Lets jobs run against a fake.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String, IntegrationError>;
}

/// HTTP client for Gemini text and vision generation.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Reuse an existing [`reqwest::Client`] for connection pooling.
    pub fn with_client(client: reqwest::Client, config: GeminiConfig) -> Self {
        Self { client, config }
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Generate text from an image plus an instruction.
    pub async fn generate_with_image(
        &self,
        prompt: &str,
        mime_type: &str,
        image: &[u8],
    ) -> Result<String, IntegrationError> {
        let data = base64::engine::general_purpose::STANDARD.encode(image);
        self.generate(json!([
            { "text": prompt },
            { "inline_data": { "mime_type": mime_type, "data": data } },
        ]))
        .await
    }

    async fn generate(&self, parts: serde_json::Value) -> Result<String, IntegrationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(IntegrationError::MissingApiKey("GEMINI_API_KEY"))?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );
        let body = json!({ "contents": [{ "parts": parts }] });

        tracing::debug!(model = %self.config.model, "Calling Gemini generateContent");
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let parsed: GenerateResponse = parse_response(response).await?;
        extract_text(parsed)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, IntegrationError> {
        self.generate(json!([{ "text": prompt }])).await
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateResponse) -> Result<String, IntegrationError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(IntegrationError::Parse(
            "Gemini response contained no text".to_string(),
        ));
    }
    Ok(text)
}

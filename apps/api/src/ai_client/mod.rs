//! AI Client — the single point of entry for all Gemini API calls in Styllen.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! Everything goes through a `GenerativeModel`, so pipelines can be driven
//! by a scripted backend in tests.
//!
//! No retries: a failed call is terminal for that invocation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::assets::ImageAsset;

pub mod prompts;

/// Model used for chat, styling analysis and script relay.
pub const TEXT_MODEL: &str = "gemini-2.5-flash";
/// Model used for virtual try-on image synthesis.
pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image";

#[derive(Debug, Error)]
pub enum AiError {
    #[error("API key required")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("AI returned empty content")]
    EmptyContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (Gemini generateContent)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// A single-turn user request made of the given parts.
    pub fn single_turn(parts: Vec<Part>) -> Self {
        Self {
            system_instruction: None,
            contents: vec![Content::with_role("user", parts)],
        }
    }

    pub fn with_system_instruction(mut self, instruction: &str) -> Self {
        self.system_instruction = Some(Content {
            role: None,
            parts: vec![Part::text(instruction)],
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn with_role(role: &str, parts: Vec<Part>) -> Self {
        Self {
            role: Some(role.to_string()),
            parts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn image(asset: &ImageAsset) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: asset.mime_type().to_string(),
                data: asset.base64_payload(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or(&[])
    }

    /// Concatenated text of the first candidate, `None` when there is none.
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// First inline image of the first candidate.
    pub fn first_inline_image(&self) -> Option<&InlineData> {
        self.first_parts()
            .iter()
            .find_map(|p| p.inline_data.as_ref())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Backend trait
// ────────────────────────────────────────────────────────────────────────────

/// A generative model backend. `AppState` carries an `Arc<dyn GenerativeModel>`.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AiError>;

    /// Calls the model and returns its text, or `EmptyContent` if it produced none.
    async fn generate_text(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String, AiError> {
        let response = self.generate_content(model, request).await?;
        response.text().ok_or(AiError::EmptyContent)
    }
}

/// Calls the model and deserializes its text response as JSON.
/// An empty response is parsed as `{}`.
pub async fn generate_json<T: DeserializeOwned>(
    ai: &dyn GenerativeModel,
    model: &str,
    request: &GenerateContentRequest,
) -> Result<T, AiError> {
    let text = match ai.generate_text(model, request).await {
        Ok(text) => text,
        Err(AiError::EmptyContent) => "{}".to_string(),
        Err(e) => return Err(e),
    };
    parse_json(&text)
}

/// Parses model output as JSON after stripping a ```json fence.
pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, AiError> {
    serde_json::from_str(strip_json_fences(text)).map_err(AiError::Parse)
}

/// Strips a leading ```json marker and a trailing ``` marker, if present.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix("```json").unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini HTTP client
// ────────────────────────────────────────────────────────────────────────────

/// Gemini `generateContent` over HTTPS, authenticated by a single API key.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AiError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url: base_url.into(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AiError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            warn!("GEMINI_API_KEY is missing");
            AiError::MissingApiKey
        })?;

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("Gemini API returned {}: {}", status, message);
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &body.usage_metadata {
            debug!(
                "Gemini call succeeded: model={}, prompt_tokens={}, output_tokens={}",
                model, usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(body)
    }
}

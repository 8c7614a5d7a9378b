//! GeminiClient - Direct REST API implementation of the generation
//! service.
//!
//! Calls the Gemini `generateContent` endpoint without any CLI
//! dependency. Structured operations request `application/json` output
//! with a response schema and parse the candidate text into the domain
//! shapes; anything that fails to parse surfaces as a response-format
//! error, never as a silently coerced value.

use fanforge_core::error::{ForgeError, Result};
use fanforge_core::generation::GenerationService;
use fanforge_core::session::{Analysis, Risk, Twists};
use fanforge_infrastructure::ForgeConfig;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::prompts;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Generation service implementation backed by the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Creates a new client with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Builds a client from loaded configuration.
    ///
    /// Fails with a config error when no API key is available (neither
    /// `config.toml` nor `GEMINI_API_KEY`).
    pub fn from_config(config: &ForgeConfig) -> Result<Self> {
        let api_key = config
            .gemini
            .api_key
            .clone()
            .ok_or_else(|| ForgeError::config("Gemini API key not configured"))?;
        Ok(Self::new(api_key, config.gemini.model.clone()))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sends one generateContent exchange and returns the candidate text.
    async fn send_request(
        &self,
        prompt: String,
        generation_config: Option<GenerationConfig>,
    ) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part { text: prompt }],
            }],
            generation_config,
        };

        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            model = self.model,
            api_key = self.api_key
        );

        debug!(model = %self.model, "sending generateContent request");
        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|err| ForgeError::Api {
                status: None,
                message: format!("Gemini API request failed: {err}"),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(|err| {
                ForgeError::response_format(format!("Failed to parse Gemini response: {err}"))
            })?;

        extract_text_response(parsed)
    }

    /// Runs a structured operation: prompt in, schema-constrained JSON
    /// out, parsed into `T`.
    async fn structured<T: DeserializeOwned>(
        &self,
        prompt: String,
        schema: serde_json::Value,
    ) -> Result<T> {
        let text = self
            .send_request(prompt, Some(GenerationConfig::json_with_schema(schema)))
            .await?;
        parse_json_response(&text)
    }
}

#[async_trait::async_trait]
impl GenerationService for GeminiClient {
    async fn analyze(&self, ip_input: &str) -> Result<Analysis> {
        self.structured(prompts::analysis(ip_input), schemas::analysis())
            .await
    }

    async fn list_tropes(&self, ip_input: &str) -> Result<Vec<String>> {
        let envelope: TropesEnvelope = self
            .structured(prompts::tropes(ip_input), schemas::tropes())
            .await?;
        Ok(envelope.tropes)
    }

    async fn generate_twists(&self, ip_input: &str) -> Result<Twists> {
        self.structured(prompts::twists(ip_input), schemas::twists())
            .await
    }

    async fn generate_narrative(&self, ip_input: &str, instruction: &str) -> Result<String> {
        // Free-form text; no response schema.
        self.send_request(prompts::narrative(ip_input, instruction), None)
            .await
    }

    async fn assess_risk(&self, original: &str, generated: &str) -> Result<Risk> {
        self.structured(prompts::risk(original, generated), schemas::risk())
            .await
    }
}

/// Response schemas sent alongside structured prompts, mirroring the
/// shapes in `fanforge_core::session`.
mod schemas {
    use serde_json::{Value, json};

    pub fn analysis() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "characteristics": { "type": "STRING" },
                "tropes": { "type": "STRING" },
                "motifs": { "type": "STRING" },
                "copyrightableElements": { "type": "STRING" },
            },
        })
    }

    pub fn tropes() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "tropes": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                },
            },
        })
    }

    pub fn twists() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "conceptualBlending": { "type": "STRING" },
                "dimensionalThinking": { "type": "STRING" },
                "multiPerspective": { "type": "STRING" },
                "coreInversion": { "type": "STRING" },
            },
        })
    }

    pub fn risk() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "riskScore": { "type": "STRING" },
                "explanation": { "type": "STRING" },
                "similarPassages": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                },
            },
        })
    }
}

#[derive(Deserialize)]
struct TropesEnvelope {
    tropes: Vec<String>,
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

impl GenerationConfig {
    fn json_with_schema(schema: serde_json::Value) -> Self {
        Self {
            response_mime_type: "application/json".to_string(),
            response_schema: schema,
        }
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| {
            ForgeError::response_format("Gemini API returned no text in the response candidates")
        })
}

/// Strips optional ```json fences and parses the remainder into `T`.
fn parse_json_response<T: DeserializeOwned>(text: &str) -> Result<T> {
    let cleaned = strip_json_fences(text);
    serde_json::from_str(cleaned).map_err(|err| {
        ForgeError::response_format(format!(
            "Gemini returned data that does not match the expected shape: {err}"
        ))
    })
}

fn strip_json_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

fn map_http_error(status: StatusCode, body: String) -> ForgeError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    ForgeError::Api {
        status: Some(status.as_u16()),
        message,
    }
}

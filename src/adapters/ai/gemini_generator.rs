//! Gemini text-generation adapter.
//!
//! Implements the TextGenerator port for one Gemini model tier over the
//! `generateContent` HTTP API. The fallback chain is built by creating
//! one adapter per tier with [`build_tier_chain`].
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key).with_model("gemini-3-pro-preview");
//! let generator = GeminiGenerator::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::config::AiConfig;
use crate::domain::generation::GenerationPrompt;
use crate::ports::{GeneratorError, TextGenerator};

/// Configuration for one Gemini model tier.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model tier to use (e.g., "gemini-3-pro-preview").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the model tier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API adapter for one model tier.
pub struct GeminiGenerator {
    config: GeminiConfig,
    client: Client,
}

impl GeminiGenerator {
    /// Creates a new generator with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the generateContent endpoint URL.
    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Converts our prompt to the Gemini request format.
    fn to_gemini_request(&self, prompt: &GenerationPrompt) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.text.clone(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: prompt.sampling.temperature,
                top_p: prompt.sampling.top_p,
                max_output_tokens: prompt.sampling.max_output_tokens,
                response_mime_type: prompt
                    .sampling
                    .json_output
                    .then(|| "application/json".to_string()),
            },
        }
    }

    /// Sends the request, mapping transport failures.
    async fn send_request(&self, prompt: &GenerationPrompt) -> Result<Response, GeneratorError> {
        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&self.to_gemini_request(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeneratorError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    GeneratorError::network(format!("Connection failed: {}", e))
                } else {
                    GeneratorError::network(e.to_string())
                }
            })
    }

    /// Maps the response status to a port error.
    async fn handle_response_status(&self, response: Response) -> Result<Response, GeneratorError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(GeneratorError::AuthenticationFailed),
            429 => Err(GeneratorError::rate_limited(parse_retry_after(&error_body))),
            400 => Err(GeneratorError::InvalidRequest(error_body)),
            500..=599 => Err(GeneratorError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(GeneratorError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }
}

/// Parses a retry delay from an error body, defaulting to 60s.
fn parse_retry_after(error_body: &str) -> u32 {
    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) {
        if let Some(details) = parsed
            .get("error")
            .and_then(|e| e.get("details"))
            .and_then(|d| d.as_array())
        {
            for detail in details {
                if let Some(delay) = detail.get("retryDelay").and_then(|d| d.as_str()) {
                    if let Ok(secs) = delay.trim_end_matches('s').parse::<u32>() {
                        return secs;
                    }
                }
            }
        }
    }
    60
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &GenerationPrompt) -> Result<String, GeneratorError> {
        let response = self.send_request(prompt).await?;
        let response = self.handle_response_status(response).await?;

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::network(format!("Failed to read response: {}", e)))?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GeneratorError::EmptyCompletion);
        }

        Ok(text)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

/// Builds the default tier chain from configuration, highest capability
/// first. Returns an empty chain when no API key is configured, which
/// the generation service reports as a configuration failure before any
/// tier attempt.
pub fn build_tier_chain(config: &AiConfig) -> Vec<Arc<dyn TextGenerator>> {
    let Some(api_key) = config.gemini_api_key.as_deref().filter(|k| !k.is_empty()) else {
        return Vec::new();
    };

    config
        .model_chain
        .iter()
        .map(|model| {
            Arc::new(GeminiGenerator::new(
                GeminiConfig::new(api_key)
                    .with_model(model)
                    .with_base_url(&config.base_url)
                    .with_timeout(config.timeout()),
            )) as Arc<dyn TextGenerator>
        })
        .collect()
}

// ───────────────────────────────────────────────────────────────────
// Wire types
// ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

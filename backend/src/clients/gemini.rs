//! Google Gemini client
//!
//! Calls the REST `models/{model}:generateContent` endpoint with the API key
//! as a query parameter. The system prompt travels in `systemInstruction`;
//! the user context, history and message form a single user turn.

use super::{clip_body, ClientError, LanguageModel};
use crate::config::AiConfig;
use crate::telemetry;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

const PROVIDER: &str = "gemini";
const TOP_P: f32 = 0.95;
const TOP_K: u32 = 40;

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Client
// ============================================================================

pub struct GeminiClient {
    api_key: SecretString,
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiClient {
    /// Build a client; `None` when no API key is configured
    pub fn from_config(config: &AiConfig) -> Result<Option<Self>, ClientError> {
        let Some(api_key) = config.api_key.clone().filter(|k| !k.trim().is_empty()) else {
            return Ok(None);
        };
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Some(Self {
            api_key: SecretString::new(api_key),
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        }))
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn request_body(&self, system: &str, prompt: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![ContentPart {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: (!system.is_empty()).then(|| GeminiContent {
                role: None,
                parts: vec![ContentPart {
                    text: system.to_string(),
                }],
            }),
            generation_config: GenerationConfig {
                temperature: self.temperature,
                top_p: TOP_P,
                top_k: TOP_K,
                max_output_tokens: self.max_output_tokens,
            },
        }
    }

    async fn call(&self, system: &str, prompt: &str) -> Result<String, ClientError> {
        let response = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.expose_secret().as_str())])
            .json(&self.request_body(system, prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(ClientError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
                body: clip_body(&body),
            });
        }

        let parsed: GeminiResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::Api {
                provider: PROVIDER,
                message: format!("unreadable response: {}", e),
            })?;

        if let Some(err) = parsed.error {
            return Err(ClientError::Api {
                provider: PROVIDER,
                message: err.message,
            });
        }

        let text: String = parsed
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ClientError::EmptyResponse(PROVIDER));
        }
        Ok(text)
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    #[instrument(skip(self, system, prompt), fields(model = %self.model, prompt_chars = prompt.len()))]
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, ClientError> {
        debug!("Sending request to Gemini API");
        let result = self.call(system, prompt).await;
        telemetry::llm_request(if result.is_ok() { "success" } else { "error" });
        result
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

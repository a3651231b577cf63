//! Gemini Adapter
//!
//! Implements [`AnalysisPort`] against the Gemini `generateContent` REST
//! endpoint. Each call is one request with JSON output requested; there is no
//! retry, so a failure surfaces to the enrichment client straight away.
//!
//! # Error Handling
//!
//! HTTP and transport failures are mapped to `PortError` variants:
//! - 401/403 -> `PortError::Unauthorized`
//! - 429 -> `PortError::RateLimited`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - Timeouts -> `PortError::Timeout`
//! - Connect failures -> `PortError::Connection`
//! - Unreadable bodies -> `PortError::Transformation`
//! - Other -> `PortError::Internal`

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use core_kernel::{DomainPort, PortError};
use domain_claims::AnalysisPort;

use crate::config::LlmConfig;
use crate::error::LlmError;

const SERVICE_NAME: &str = "gemini";
const OPERATION: &str = "generateContent";
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
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
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    /// Text of the first candidate, parts joined in order
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().map(|p| p.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Gemini REST adapter
#[derive(Debug, Clone)]
pub struct GeminiAdapter {
    config: LlmConfig,
    client: Client,
}

impl GeminiAdapter {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(LlmError::InvalidBaseUrl(config.base_url));
        }
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model.trim(),
            OPERATION
        )
    }

    fn request_body<'a>(&self, prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                response_mime_type: "application/json",
            },
        }
    }

    fn map_transport_error(&self, error: reqwest::Error) -> PortError {
        if error.is_timeout() {
            PortError::Timeout {
                operation: OPERATION.to_string(),
                duration_ms: self.config.timeout().as_millis() as u64,
            }
        } else if error.is_connect() {
            PortError::Connection {
                message: format!("Could not reach {}", SERVICE_NAME),
                source: Some(Box::new(error)),
            }
        } else if error.is_decode() {
            PortError::transformation(format!("Unreadable response body: {}", error))
        } else {
            PortError::Internal {
                message: format!("{} request failed", SERVICE_NAME),
                source: Some(Box::new(error)),
            }
        }
    }
}

/// Maps a non-success status to a port error
fn map_status(status: StatusCode, retry_after: Option<u64>, body: &str) -> PortError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortError::Unauthorized {
            message: format!("{} rejected the API key ({})", SERVICE_NAME, status),
        },
        StatusCode::TOO_MANY_REQUESTS => PortError::RateLimited {
            retry_after_secs: retry_after.unwrap_or(0),
        },
        s if s.is_server_error() => PortError::ServiceUnavailable {
            service: SERVICE_NAME.to_string(),
        },
        s => PortError::internal(format!("{} returned {}: {}", SERVICE_NAME, s, body)),
    }
}

impl DomainPort for GeminiAdapter {}

#[async_trait]
impl AnalysisPort for GeminiAdapter {
    fn is_configured(&self) -> bool {
        self.config.has_api_key()
    }

    #[instrument(skip(self, prompt), fields(model = %self.config.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String, PortError> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| PortError::Unauthorized {
            message: "No API key configured".to_string(),
        })?;

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Gemini request rejected");
            return Err(map_status(status, retry_after, &body));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let text = parsed
            .into_text()
            .ok_or_else(|| PortError::transformation("Response carried no candidate text"))?;
        debug!(response_len = text.len(), "Gemini answer received");
        Ok(text)
    }
}

//! Gemini `generateContent` client (direct HTTP, no SDK)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::prompt::{build_prompt, response_schema};
use super::{RecommendError, SongRecommender};
use crate::config::GeminiConfig;
use crate::model::{Criteria, Song};

const USER_AGENT: &str = concat!("karaoke-pal/", env!("CARGO_PKG_VERSION"));
/// Fallback variable checked after the configured one
const LEGACY_KEY_VAR: &str = "API_KEY";
const FINISH_STOP: &str = "STOP";

// Request models
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

// Response models
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Turn a provider response into songs, or the reason it can't be.
///
/// A block or a non-STOP finish wins over any text that came back, so a
/// truncated list is never returned.
pub(crate) fn evaluate_response(
    response: &GenerateContentResponse,
) -> Result<Vec<Song>, RecommendError> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        tracing::warn!("Prompt blocked by provider: {}", reason);
        return Err(RecommendError::SafetyBlocked { reason: reason.to_string() });
    }

    if let Some(reason) = response
        .candidates
        .first()
        .and_then(|c| c.finish_reason.as_deref())
    {
        if reason != FINISH_STOP {
            tracing::warn!("Generation stopped early: {}", reason);
            return Err(RecommendError::SafetyBlocked { reason: reason.to_string() });
        }
    }

    let text = response.text().ok_or(RecommendError::EmptyResponse)?;
    parse_songs(&text)
}

pub(crate) fn parse_songs(text: &str) -> Result<Vec<Song>, RecommendError> {
    serde_json::from_str::<Vec<Song>>(text).map_err(|e| {
        tracing::warn!("Song JSON did not match schema: {}", e);
        tracing::debug!("Raw text: {}", text);
        RecommendError::Parse(e.to_string())
    })
}

pub struct GeminiClient {
    http_client: HttpClient,
    endpoint: String,
    model: String,
    song_count: usize,
    /// Environment variables tried in order for the API key
    key_vars: Vec<String>,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self, RecommendError> {
        let http_client = HttpClient::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RecommendError::Request(e.to_string()))?;

        let mut key_vars = vec![config.api_key_env.clone()];
        if config.api_key_env != LEGACY_KEY_VAR {
            key_vars.push(LEGACY_KEY_VAR.to_string());
        }

        Ok(Self {
            http_client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            song_count: config.song_count,
            key_vars,
        })
    }

    /// Read the key at request time; a missing key fails only this request
    fn api_key(&self) -> Result<String, RecommendError> {
        self.key_vars
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
            .ok_or_else(|| RecommendError::MissingApiKey {
                var: self.key_vars.first().cloned().unwrap_or_default(),
            })
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    fn request_body(&self, criteria: &Criteria) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(build_prompt(criteria, self.song_count)),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        }
    }
}

#[async_trait]
impl SongRecommender for GeminiClient {
    fn name(&self) -> &str {
        &self.model
    }

    async fn recommend(&self, criteria: &Criteria) -> Result<Vec<Song>, RecommendError> {
        let api_key = self.api_key()?;

        tracing::info!(model = %self.model, "Requesting {} songs: {}", self.song_count, criteria.summary());

        let response = self
            .http_client
            .post(self.generate_url())
            .header("x-goog-api-key", api_key)
            .json(&self.request_body(criteria))
            .send()
            .await
            .map_err(|e| RecommendError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown error").to_string());
            tracing::warn!("Gemini returned {}: {}", status, message);
            return Err(RecommendError::Api { status: status.as_u16(), message });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| RecommendError::Parse(e.to_string()))?;

        let songs = evaluate_response(&body)?;
        if songs.len() != self.song_count {
            tracing::warn!("Asked for {} songs, got {}", self.song_count, songs.len());
        }
        tracing::info!("Received {} songs", songs.len());

        Ok(songs)
    }
}

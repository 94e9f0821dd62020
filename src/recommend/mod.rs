//! Song recommendations from a hosted text-generation model.
//!
//! [`SongRecommender`] is the seam the app talks to; [`GeminiClient`] is the
//! production implementation. Every failure surfaces as one
//! [`RecommendError`] so the session can render a single error state.

pub mod gemini;
pub mod prompt;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Criteria, Song};

pub use gemini::GeminiClient;

/// Recommendation failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendError {
    #[error("API key missing: ${var} is not set")]
    MissingApiKey { var: String },

    #[error("Generation blocked by provider ({reason})")]
    SafetyBlocked { reason: String },

    #[error("Empty response from provider")]
    EmptyResponse,

    #[error("Malformed song data: {0}")]
    Parse(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Provider returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
}

impl RecommendError {
    /// Human-readable text for the error banner
    pub fn user_message(&self) -> String {
        match self {
            RecommendError::MissingApiKey { var } => format!(
                "No API key configured. Set the {} environment variable and restart.",
                var
            ),
            RecommendError::SafetyBlocked { reason } => format!(
                "Song generation blocked by the AI safety filter ({}). Try simpler or more generic criteria.",
                reason
            ),
            RecommendError::EmptyResponse => {
                "The AI returned no songs. Please try again.".to_string()
            }
            RecommendError::Parse(_) => {
                "Failed to read the song list from the AI. Please try again.".to_string()
            }
            RecommendError::Request(_) => {
                "Could not reach the AI service. Check your connection and try again.".to_string()
            }
            RecommendError::Api { status, message } => {
                format!("The AI service returned an error ({}): {}", status, message)
            }
        }
    }
}

/// Something that turns criteria into a song list
#[async_trait]
pub trait SongRecommender: Send + Sync {
    /// Human-readable backend name (e.g., "gemini-2.5-flash")
    fn name(&self) -> &str;

    /// One request, no retries
    async fn recommend(&self, criteria: &Criteria) -> Result<Vec<Song>, RecommendError>;
}

//! Clients for the external generative-language and web-search APIs

pub mod gemini;
pub mod search;

pub use gemini::GeminiClient;
pub use search::{build_provider, GoogleCustomSearch, SerperSearch};

use async_trait::async_trait;
use thiserror::Error;
use workout_buddy_shared::workout::ResearchResult;

/// Failure talking to an external API
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} returned {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} error: {message}")]
    Api {
        provider: &'static str,
        message: String,
    },

    #[error("{0} returned no content")]
    EmptyResponse(&'static str),
}

/// A text-generation model
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a completion for `prompt` under the `system` instruction
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, ClientError>;

    fn name(&self) -> &'static str;
}

/// A web-search backend
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Up to ten results for `query`, in provider order
    async fn search(&self, query: &str) -> Result<Vec<ResearchResult>, ClientError>;

    fn name(&self) -> &'static str;
}

/// First 200 characters of an error body
pub(crate) fn clip_body(body: &str) -> String {
    workout_buddy_shared::format::truncate_chars(body, 200)
}

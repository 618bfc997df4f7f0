//! Web search providers
//!
//! Serper (`POST /search`, `X-API-KEY` header) and Google Custom Search
//! (`GET /customsearch/v1`). Both ask for ten results per query.

use super::{clip_body, ClientError, SearchProvider};
use crate::config::SearchConfig;
use crate::telemetry;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use workout_buddy_shared::workout::ResearchResult;

const RESULTS_PER_QUERY: u32 = 10;

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
}

impl From<SearchHit> for ResearchResult {
    fn from(hit: SearchHit) -> Self {
        ResearchResult {
            title: hit.title,
            snippet: hit.snippet,
            link: hit.link,
        }
    }
}

fn http_client(timeout_secs: u64) -> Result<Client, ClientError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

async fn read_body(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<String, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        warn!(provider, status = %status, "Search API error");
        return Err(ClientError::Status {
            provider,
            status: status.as_u16(),
            body: clip_body(&body),
        });
    }
    Ok(body)
}

fn parse<T: for<'de> Deserialize<'de>>(provider: &'static str, body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Api {
        provider,
        message: format!("unreadable response: {}", e),
    })
}

fn record(provider: &'static str, result: &Result<Vec<ResearchResult>, ClientError>) {
    telemetry::search_request(provider, if result.is_ok() { "success" } else { "error" });
}

// ============================================================================
// Serper
// ============================================================================

#[derive(Debug, Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    num: u32,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SearchHit>,
}

pub struct SerperSearch {
    api_key: SecretString,
    client: Client,
    base_url: String,
}

impl SerperSearch {
    pub fn new(api_key: String, base_url: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        Ok(Self {
            api_key: SecretString::new(api_key),
            client: http_client(timeout_secs)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn call(&self, query: &str) -> Result<Vec<ResearchResult>, ClientError> {
        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .header("X-API-KEY", self.api_key.expose_secret().as_str())
            .json(&SerperRequest {
                q: query,
                num: RESULTS_PER_QUERY,
            })
            .send()
            .await?;

        let body = read_body(self.name(), response).await?;
        let parsed: SerperResponse = parse(self.name(), &body)?;
        Ok(parsed.organic.into_iter().map(ResearchResult::from).collect())
    }
}

#[async_trait]
impl SearchProvider for SerperSearch {
    #[instrument(skip(self), fields(provider = "serper"))]
    async fn search(&self, query: &str) -> Result<Vec<ResearchResult>, ClientError> {
        let result = self.call(query).await;
        record(self.name(), &result);
        result
    }

    fn name(&self) -> &'static str {
        "serper"
    }
}

// ============================================================================
// Google Custom Search
// ============================================================================

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    #[serde(default)]
    items: Vec<SearchHit>,
}

pub struct GoogleCustomSearch {
    api_key: SecretString,
    cx: String,
    client: Client,
    base_url: String,
}

impl GoogleCustomSearch {
    pub fn new(
        api_key: String,
        cx: String,
        base_url: &str,
        timeout_secs: u64,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            api_key: SecretString::new(api_key),
            cx,
            client: http_client(timeout_secs)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn call(&self, query: &str) -> Result<Vec<ResearchResult>, ClientError> {
        let num = RESULTS_PER_QUERY.to_string();
        let response = self
            .client
            .get(format!("{}/customsearch/v1", self.base_url))
            .query(&[
                ("key", self.api_key.expose_secret().as_str()),
                ("cx", self.cx.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let body = read_body(self.name(), response).await?;
        let parsed: GoogleResponse = parse(self.name(), &body)?;
        Ok(parsed.items.into_iter().map(ResearchResult::from).collect())
    }
}

#[async_trait]
impl SearchProvider for GoogleCustomSearch {
    #[instrument(skip(self), fields(provider = "google"))]
    async fn search(&self, query: &str) -> Result<Vec<ResearchResult>, ClientError> {
        let result = self.call(query).await;
        record(self.name(), &result);
        result
    }

    fn name(&self) -> &'static str {
        "google"
    }
}

/// The configured provider, preferring Serper; `None` when neither is set
pub fn build_provider(
    config: &SearchConfig,
) -> Result<Option<Arc<dyn SearchProvider>>, ClientError> {
    let non_blank = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());

    if let Some(key) = non_blank(&config.serper_api_key) {
        debug!("Using Serper for web search");
        let provider = SerperSearch::new(key, &config.serper_url, config.timeout_secs)?;
        return Ok(Some(Arc::new(provider)));
    }

    if let (Some(key), Some(cx)) = (non_blank(&config.google_api_key), non_blank(&config.google_cx)) {
        debug!("Using Google Custom Search for web search");
        let provider = GoogleCustomSearch::new(key, cx, &config.google_url, config.timeout_secs)?;
        return Ok(Some(Arc::new(provider)));
    }

    Ok(None)
}

//! Web search tool for the research unit.
//!
//! Wraps the Serper search API and flattens organic results into a text
//! block suitable for prompt context. A failed search is not fatal: the
//! research unit is instructed to fall back to general domain knowledge.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const SERPER_API_URL: &str = "https://google.serper.dev/search";
const MAX_RESULTS: usize = 5;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Search returned no results")]
    NoResults,
}

/// Search capability consumed by the orchestrator. Trait seam so tests can
/// script search behavior (including failure).
#[async_trait]
pub trait SearchTool: Send + Sync {
    async fn search(&self, query: &str) -> Result<String, SearchError>;
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    title: String,
    link: String,
    #[serde(default)]
    snippet: String,
}

/// Serper-backed search client.
#[derive(Clone)]
pub struct SerperClient {
    client: Client,
    api_key: String,
}

impl SerperClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl SearchTool for SerperClient {
    async fn search(&self, query: &str) -> Result<String, SearchError> {
        debug!("Search query: {query}");

        let response = self
            .client
            .post(SERPER_API_URL)
            .header("X-API-KEY", &self.api_key)
            .json(&serde_json::json!({ "q": query }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: SerperResponse = response.json().await?;
        if parsed.organic.is_empty() {
            return Err(SearchError::NoResults);
        }

        Ok(format_results(&parsed.organic))
    }
}

/// Flattens organic results into a numbered text block for the prompt.
fn format_results(results: &[OrganicResult]) -> String {
    results
        .iter()
        .take(MAX_RESULTS)
        .enumerate()
        .map(|(i, r)| format!("{}. {} ({})\n   {}", i + 1, r.title, r.link, r.snippet))
        .collect::<Vec<_>>()
        .join("\n")
}

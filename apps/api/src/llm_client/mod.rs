/// LLM Client — the single point of entry for all model calls in this service.
///
/// ARCHITECTURAL RULE: No other module may call a model API directly.
/// All LLM interactions MUST go through this module.
///
/// Two endpoints are configured per run: the research endpoint (Gemini) and
/// the logic endpoint (Groq). Both speak the OpenAI-compatible
/// chat-completions wire format, so one client type covers both.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Research endpoint (OpenAI-compatible surface of the Gemini API).
const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions";
pub const GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Logic endpoint (Groq).
const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const GROQ_MODEL: &str = "llama-3.3-70b-versatile";

const MAX_TOKENS: u32 = 4096;
const MAX_RETRIES: u32 = 3;
/// Deterministic output — both endpoints run at temperature zero.
const TEMPERATURE: f32 = 0.0;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Prompt-in, text-out model capability. The orchestrator depends on this
/// seam rather than on `LlmClient` so tests can script model behavior.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// One configured chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct ModelEndpoint {
    pub base_url: String,
    pub model: String,
    api_key: String,
}

impl ModelEndpoint {
    /// The research endpoint used by the research and profile units.
    pub fn gemini(api_key: String) -> Self {
        Self {
            base_url: GEMINI_API_URL.to_string(),
            model: GEMINI_MODEL.to_string(),
            api_key,
        }
    }

    /// The logic endpoint used by the strategy and interview-prep units.
    pub fn groq(api_key: String) -> Self {
        Self {
            base_url: GROQ_API_URL.to_string(),
            model: GROQ_MODEL.to_string(),
            api_key,
        }
    }
}

/// Chat-completions client with retry logic, shared by both endpoints.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    endpoint: ModelEndpoint,
}

impl LlmClient {
    pub fn new(endpoint: ModelEndpoint) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
        }
    }

    /// Makes a chat-completions call and returns the assistant text.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn call(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: &self.endpoint.model,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.endpoint.base_url)
                .bearer_auth(&self.endpoint.api_key)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API ({}) returned {}: {}", self.endpoint.model, status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                // Try to parse error message
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let chat_response: ChatResponse = response.json().await?;

            if let Some(usage) = &chat_response.usage {
                debug!(
                    "LLM call succeeded ({}): prompt_tokens={}, completion_tokens={}",
                    self.endpoint.model, usage.prompt_tokens, usage.completion_tokens
                );
            }

            let text = chat_response
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
                .filter(|t| !t.trim().is_empty())
                .ok_or(LlmError::EmptyContent)?;

            return Ok(text);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl ChatModel for LlmClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        self.call(system, prompt).await
    }
}

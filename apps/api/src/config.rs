use anyhow::{Context, Result};

use crate::errors::AppError;

/// Application configuration loaded from environment variables.
///
/// The three API credentials load as `Option` on purpose: a missing model
/// key must block *a run* with a user-visible message, not prevent the
/// server from starting at all.
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the research model endpoint (Gemini).
    pub gemini_api_key: Option<String>,
    /// Credential for the logic model endpoint (Groq).
    pub groq_api_key: Option<String>,
    /// Credential for the web-search tool used by the research unit.
    pub serper_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

/// Both model credentials, resolved at run start.
#[derive(Debug, Clone)]
pub struct ModelCredentials {
    pub gemini_api_key: String,
    pub groq_api_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            groq_api_key: optional_env("GROQ_API_KEY"),
            serper_api_key: optional_env("SERPER_API_KEY"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Resolves both model credentials or fails with the configuration
    /// error shown to the user. Called before any external request is made.
    pub fn model_credentials(&self) -> Result<ModelCredentials, AppError> {
        let gemini_api_key = self
            .gemini_api_key
            .clone()
            .ok_or_else(|| AppError::Config("GEMINI_API_KEY is not set".to_string()))?;
        let groq_api_key = self
            .groq_api_key
            .clone()
            .ok_or_else(|| AppError::Config("GROQ_API_KEY is not set".to_string()))?;
        Ok(ModelCredentials {
            gemini_api_key,
            groq_api_key,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
